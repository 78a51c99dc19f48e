use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported currencies with their display rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// Indian Rupee (2 decimal places, lakh/crore grouping)
    #[default]
    INR,
    /// US Dollar (2 decimal places)
    USD,
    /// Euro (2 decimal places)
    EUR,
}

impl Currency {
    /// Returns the decimal scale for this currency
    pub fn scale(&self) -> u32 {
        2
    }

    /// Fixed label printed in front of every formatted amount
    pub fn label(&self) -> &'static str {
        match self {
            Currency::INR => "Rs.",
            Currency::USD => "USD",
            Currency::EUR => "EUR",
        }
    }

    /// Rounds a value for presentation (half away from zero).
    ///
    /// Only formatting code should call this; stored totals keep full precision.
    pub fn round(&self, amount: Decimal) -> Decimal {
        amount.round_dp_with_strategy(self.scale(), RoundingStrategy::MidpointAwayFromZero)
    }

    /// Formats an amount with the currency label, thousands separators and
    /// exactly `scale()` fraction digits, e.g. `Rs. 12,34,567.50`
    pub fn format_amount(&self, amount: Decimal) -> String {
        let rounded = self.round(amount);
        let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
            "-"
        } else {
            ""
        };

        let plain = format!("{:.width$}", rounded.abs(), width = self.scale() as usize);
        let (integer, fraction) = plain.split_once('.').unwrap_or((plain.as_str(), ""));
        let grouped = self.group_digits(integer);

        if fraction.is_empty() {
            format!("{}{} {}", sign, self.label(), grouped)
        } else {
            format!("{}{} {}.{}", sign, self.label(), grouped, fraction)
        }
    }

    /// Inserts group separators into a string of integer digits
    fn group_digits(&self, digits: &str) -> String {
        match self {
            // en-IN: last three digits, then groups of two
            Currency::INR => {
                if digits.len() <= 3 {
                    return digits.to_string();
                }
                let (head, tail) = digits.split_at(digits.len() - 3);
                let mut groups: Vec<&str> = head
                    .as_bytes()
                    .rchunks(2)
                    .rev()
                    .filter_map(|chunk| std::str::from_utf8(chunk).ok())
                    .collect();
                groups.push(tail);
                groups.join(",")
            }
            Currency::USD | Currency::EUR => digits
                .as_bytes()
                .rchunks(3)
                .rev()
                .filter_map(|chunk| std::str::from_utf8(chunk).ok())
                .collect::<Vec<_>>()
                .join(","),
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Currency::INR => write!(f, "INR"),
            Currency::USD => write!(f, "USD"),
            Currency::EUR => write!(f, "EUR"),
        }
    }
}

impl std::str::FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "INR" => Ok(Currency::INR),
            "USD" => Ok(Currency::USD),
            "EUR" => Ok(Currency::EUR),
            _ => Err(format!("Invalid currency: {}", s)),
        }
    }
}
