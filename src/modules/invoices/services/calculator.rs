use rust_decimal::Decimal;

use crate::core::{AppError, Result, COMPUTED};
use crate::modules::invoices::models::{InvoiceTotals, LineItem, TotalsRequest};

const ONE_HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// InvoiceCalculator resolves the financial breakdown of an invoice.
///
/// Shared by the live form preview, invoice creation and the PDF export so all
/// three agree on the numbers. All arithmetic is exact decimal math; nothing
/// is rounded here. Results that would not fit the stored totals columns are
/// rejected with a validation error.
#[derive(Debug, Clone, Copy)]
pub struct InvoiceCalculator;

impl InvoiceCalculator {
    pub fn new() -> Self {
        Self
    }

    /// subtotal = Σ(quantity × unit_price)
    /// tax_amount = subtotal × tax_rate / 100
    /// total = subtotal + tax_amount − discount
    pub fn compute_totals(&self, request: &TotalsRequest) -> Result<InvoiceTotals> {
        let subtotal = self.subtotal(&request.items)?;
        let tax_amount = self.tax_amount(subtotal, request.tax_rate)?;
        let total = subtotal
            .checked_add(tax_amount)
            .and_then(|sum| sum.checked_sub(request.discount))
            .ok_or_else(out_of_range)?;

        Ok(InvoiceTotals {
            subtotal,
            tax_rate: request.tax_rate,
            tax_amount,
            discount: request.discount,
            total: COMPUTED.check("total", total)?,
        })
    }

    /// Sum of line totals in item order
    pub fn subtotal(&self, items: &[LineItem]) -> Result<Decimal> {
        let subtotal = items
            .iter()
            .try_fold(Decimal::ZERO, |sum, item| sum.checked_add(item.line_total()))
            .ok_or_else(out_of_range)?;

        COMPUTED.check("subtotal", subtotal)
    }

    /// Tax on the subtotal for a percentage rate
    pub fn tax_amount(&self, subtotal: Decimal, tax_rate: Decimal) -> Result<Decimal> {
        if tax_rate.is_zero() {
            return Ok(Decimal::ZERO);
        }

        let tax_amount = subtotal
            .checked_mul(tax_rate)
            .and_then(|product| product.checked_div(ONE_HUNDRED))
            .ok_or_else(out_of_range)?;

        COMPUTED.check("tax_amount", tax_amount)
    }
}

impl Default for InvoiceCalculator {
    fn default() -> Self {
        Self::new()
    }
}

fn out_of_range() -> AppError {
    AppError::validation("Invoice totals are out of range")
}
