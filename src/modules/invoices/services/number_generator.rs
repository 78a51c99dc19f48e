use std::sync::atomic::{AtomicU64, Ordering};

use crate::core::Clock;

const NUMBER_PREFIX: &str = "INV-";
const NUMBER_DIGITS: usize = 8;
const NUMBER_SPACE: u64 = 100_000_000;

/// Hands out `INV-########` invoice numbers.
///
/// The sequence is seeded once from the low-order digits of the clock and then
/// incremented atomically, so numbers issued by one process never repeat until
/// the 8-digit space wraps. Cross-process uniqueness is enforced by the
/// repository (check before insert plus a unique index).
#[derive(Debug)]
pub struct InvoiceNumberGenerator {
    next: AtomicU64,
}

impl InvoiceNumberGenerator {
    /// Seed from the low-order 8 digits of the current time in milliseconds
    pub fn from_clock(clock: &dyn Clock) -> Self {
        let millis = clock.now().timestamp_millis().unsigned_abs();
        Self::starting_at(millis % NUMBER_SPACE)
    }

    pub fn starting_at(seed: u64) -> Self {
        Self {
            next: AtomicU64::new(seed % NUMBER_SPACE),
        }
    }

    /// Next number in the sequence
    pub fn next(&self) -> String {
        let value = self.next.fetch_add(1, Ordering::Relaxed) % NUMBER_SPACE;
        format!("{}{:0width$}", NUMBER_PREFIX, value, width = NUMBER_DIGITS)
    }
}

/// True for strings shaped like `INV-` plus exactly 8 ASCII digits
pub fn is_valid_invoice_number(candidate: &str) -> bool {
    candidate
        .strip_prefix(NUMBER_PREFIX)
        .map(|digits| digits.len() == NUMBER_DIGITS && digits.bytes().all(|b| b.is_ascii_digit()))
        .unwrap_or(false)
}
