use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::line_item::{LineItem, RawLineItem};
use crate::core::numeric::parse_or;
use crate::core::{AppError, Currency, NumericInput, Result, MONEY, RATE};

/// Fully resolved financial breakdown of an invoice.
///
/// `subtotal = Σ line_total`, `tax_amount = subtotal × tax_rate / 100`,
/// `total = subtotal + tax_amount − discount`. A discount larger than
/// subtotal + tax produces a negative total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceTotals {
    pub subtotal: Decimal,
    /// Percentage, e.g. 18 for 18%
    pub tax_rate: Decimal,
    pub tax_amount: Decimal,
    /// Flat amount subtracted after tax
    pub discount: Decimal,
    pub total: Decimal,
}

/// Immutable input to the invoice calculator
#[derive(Debug, Clone, PartialEq)]
pub struct TotalsRequest {
    pub items: Vec<LineItem>,
    pub tax_rate: Decimal,
    pub discount: Decimal,
}

/// Totals form as submitted by the UI (live preview or invoice creation)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawTotalsInput {
    #[serde(default)]
    pub items: Vec<RawLineItem>,
    #[serde(default)]
    pub tax_rate: Option<NumericInput>,
    #[serde(default)]
    pub discount: Option<NumericInput>,
}

/// Totals rendered for display, two fraction digits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TotalsResponse {
    pub subtotal: String,
    pub tax_rate: String,
    pub tax_amount: String,
    pub discount: String,
    pub total: String,
    pub formatted_total: String,
    pub item_count: usize,
}

impl TotalsRequest {
    pub fn new(items: Vec<LineItem>, tax_rate: Decimal, discount: Decimal) -> Result<Self> {
        if tax_rate < Decimal::ZERO {
            return Err(AppError::validation(format!(
                "Tax rate cannot be negative, got: {}",
                tax_rate
            )));
        }

        if discount < Decimal::ZERO {
            return Err(AppError::validation(format!(
                "Discount cannot be negative, got: {}",
                discount
            )));
        }

        RATE.check("tax_rate", tax_rate)?;
        MONEY.check("discount", discount)?;

        Ok(Self {
            items,
            tax_rate,
            discount,
        })
    }

    /// Parse the raw form. Blank tax rate / discount mean 0, rows without a
    /// description are ignored, anything non-numeric is an error.
    pub fn from_raw(raw: &RawTotalsInput) -> Result<Self> {
        let tax_rate = parse_or("tax_rate", raw.tax_rate.as_ref(), Decimal::ZERO)?;
        let discount = parse_or("discount", raw.discount.as_ref(), Decimal::ZERO)?;

        let items = raw
            .items
            .iter()
            .filter(|item| !item.is_blank())
            .map(LineItem::from_raw)
            .collect::<Result<Vec<_>>>()?;

        Self::new(items, tax_rate, discount)
    }
}

impl TotalsResponse {
    pub fn from_totals(totals: &InvoiceTotals, item_count: usize, currency: Currency) -> Self {
        let display = |amount: Decimal| format!("{:.2}", currency.round(amount));

        Self {
            subtotal: display(totals.subtotal),
            tax_rate: totals.tax_rate.normalize().to_string(),
            tax_amount: display(totals.tax_amount),
            discount: display(totals.discount),
            total: display(totals.total),
            formatted_total: currency.format_amount(totals.total),
            item_count,
        }
    }
}
