//! Parsing of numeric form fields.
//!
//! Form values arrive either as JSON numbers or as the raw text of an input
//! box. Absent and blank values mean "not provided"; anything else must parse
//! as a decimal or the whole request is rejected with `AppError::InvalidInput`.

use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::{AppError, Result};

/// A numeric field as typed by the user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumericInput {
    Number(serde_json::Number),
    Text(String),
}

impl NumericInput {
    /// Parses the value, returning `None` for blank text.
    pub fn parse(&self, field: &str) -> Result<Option<Decimal>> {
        match self {
            NumericInput::Number(n) => parse_decimal(field, &n.to_string()).map(Some),
            NumericInput::Text(s) if s.trim().is_empty() => Ok(None),
            NumericInput::Text(s) => parse_decimal(field, s.trim()).map(Some),
        }
    }
}

impl From<Decimal> for NumericInput {
    fn from(value: Decimal) -> Self {
        NumericInput::Text(value.to_string())
    }
}

impl From<&str> for NumericInput {
    fn from(value: &str) -> Self {
        NumericInput::Text(value.to_string())
    }
}

impl From<i64> for NumericInput {
    fn from(value: i64) -> Self {
        NumericInput::Number(value.into())
    }
}

/// Parses an optional field, substituting `default` when absent or blank
pub fn parse_or(field: &str, input: Option<&NumericInput>, default: Decimal) -> Result<Decimal> {
    match input {
        Some(value) => Ok(value.parse(field)?.unwrap_or(default)),
        None => Ok(default),
    }
}

/// Parses an optional whole-number field (e.g. quantity)
pub fn parse_integer_or(field: &str, input: Option<&NumericInput>, default: i32) -> Result<i32> {
    let Some(value) = input.map(|v| v.parse(field)).transpose()?.flatten() else {
        return Ok(default);
    };

    if !value.fract().is_zero() {
        return Err(AppError::validation(format!(
            "{} must be a whole number, got: {}",
            field, value
        )));
    }

    value
        .to_i32()
        .ok_or_else(|| AppError::validation(format!("{} is out of range: {}", field, value)))
}

/// Precision and scale a stored decimal column can hold exactly
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecimalBounds {
    pub integer_digits: u32,
    pub scale: u32,
}

/// Prices and discounts: DECIMAL(20, 6)
pub const MONEY: DecimalBounds = DecimalBounds {
    integer_digits: 14,
    scale: 6,
};

/// Tax rate percentages: DECIMAL(9, 4)
pub const RATE: DecimalBounds = DecimalBounds {
    integer_digits: 5,
    scale: 4,
};

/// Calculated line totals and invoice totals: DECIMAL(32, 12)
pub const COMPUTED: DecimalBounds = DecimalBounds {
    integer_digits: 20,
    scale: 12,
};

impl DecimalBounds {
    /// Rejects values the column would round or overflow
    pub fn check(&self, field: &str, value: Decimal) -> Result<Decimal> {
        let normalized = value.normalize();

        if normalized.scale() > self.scale {
            return Err(AppError::validation(format!(
                "{} allows at most {} decimal places, got: {}",
                field, self.scale, value
            )));
        }

        let limit = Decimal::from_i128_with_scale(10i128.pow(self.integer_digits), 0);
        if normalized.abs() >= limit {
            return Err(AppError::validation(format!(
                "{} is out of range, got: {}",
                field, value
            )));
        }

        Ok(value)
    }
}

fn parse_decimal(field: &str, raw: &str) -> Result<Decimal> {
    Decimal::from_str(raw)
        .or_else(|_| Decimal::from_scientific(raw))
        .map_err(|_| AppError::invalid_input(field, raw))
}
