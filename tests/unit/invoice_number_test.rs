// Invoice number generation: INV- followed by exactly 8 digits, strictly
// increasing within a process and never repeated

use std::collections::HashSet;
use std::sync::Arc;
use std::thread;

use ledgerline::invoices::services::{is_valid_invoice_number, InvoiceNumberGenerator};
use proptest::prelude::*;

fn digits(number: &str) -> u64 {
    number.trim_start_matches("INV-").parse().unwrap()
}

#[test]
fn test_concurrent_numbers_are_unique() {
    let generator = Arc::new(InvoiceNumberGenerator::starting_at(42));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let generator = Arc::clone(&generator);
            thread::spawn(move || (0..250).map(|_| generator.next()).collect::<Vec<_>>())
        })
        .collect();

    let mut seen = HashSet::new();
    for handle in handles {
        for number in handle.join().unwrap() {
            assert!(is_valid_invoice_number(&number), "bad format: {}", number);
            assert!(seen.insert(number), "duplicate invoice number");
        }
    }

    assert_eq!(seen.len(), 2000);
}

proptest! {
    /// Property: consecutive numbers match the format and strictly increase
    #[test]
    fn test_sequence_is_monotonic(seed in 0u64..99_999_000u64, count in 2usize..50) {
        let generator = InvoiceNumberGenerator::starting_at(seed);
        let numbers: Vec<String> = (0..count).map(|_| generator.next()).collect();

        for number in &numbers {
            prop_assert!(is_valid_invoice_number(number));
        }
        for pair in numbers.windows(2) {
            prop_assert!(digits(&pair[1]) > digits(&pair[0]));
        }
    }
}
