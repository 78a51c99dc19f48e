// A line item is one billable row on an invoice. Its total is always
// quantity × unit_price at full precision; rounding belongs to presentation.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::numeric::{parse_integer_or, parse_or};
use crate::core::{AppError, NumericInput, Result, COMPUTED, MONEY};

/// Represents a single line item in an invoice
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineItem {
    /// Unique identifier for the line item
    pub id: Option<String>,

    /// Foreign key to the invoice
    pub invoice_id: Option<String>,

    /// Catalog service this row was billed from, if any
    pub service_id: Option<String>,

    /// Description of the product or service
    pub description: String,

    /// Quantity of items (at least 1)
    pub quantity: i32,

    /// Price per unit
    pub unit_price: Decimal,

    /// quantity × unit_price, computed once on construction
    total: Decimal,
}

/// A line item exactly as it was typed into the invoice form
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawLineItem {
    #[serde(default)]
    pub service_id: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub quantity: Option<NumericInput>,
    #[serde(default)]
    pub unit_price: Option<NumericInput>,
}

impl LineItem {
    /// Create a new line item with validation
    ///
    /// # Arguments
    /// * `description` - Product/service description (max 255 chars)
    /// * `quantity` - Must be at least 1
    /// * `unit_price` - Non-negative, at most 14 integer digits and 6 decimals
    pub fn new(description: impl Into<String>, quantity: i32, unit_price: Decimal) -> Result<Self> {
        let description = description.into();

        Self::validate_description(&description)?;
        Self::validate_quantity(quantity)?;
        Self::validate_unit_price(unit_price)?;

        let total = Decimal::from(quantity)
            .checked_mul(unit_price)
            .ok_or_else(|| AppError::validation("Line total is out of range"))?;
        COMPUTED.check("line total", total)?;

        Ok(Self {
            id: None,
            invoice_id: None,
            service_id: None,
            description: description.trim().to_string(),
            quantity,
            unit_price,
            total,
        })
    }

    /// Parse and validate a form row. Quantity defaults to 1 and unit price to 0
    /// when left blank; non-numeric text is rejected.
    pub fn from_raw(raw: &RawLineItem) -> Result<Self> {
        let quantity = parse_integer_or("quantity", raw.quantity.as_ref(), 1)?;
        let unit_price = parse_or("unit_price", raw.unit_price.as_ref(), Decimal::ZERO)?;

        Ok(Self::new(raw.description.clone(), quantity, unit_price)?
            .with_service(raw.service_id.clone()))
    }

    /// Rebuild a row read back from storage
    pub fn stored(
        id: String,
        invoice_id: String,
        service_id: Option<String>,
        description: String,
        quantity: i32,
        unit_price: Decimal,
    ) -> Result<Self> {
        let mut item = Self::new(description, quantity, unit_price)?.with_service(service_id);
        item.id = Some(id);
        item.invoice_id = Some(invoice_id);
        Ok(item)
    }

    pub fn with_service(mut self, service_id: Option<String>) -> Self {
        self.service_id = service_id.filter(|id| !id.trim().is_empty());
        self
    }

    /// quantity × unit_price, unrounded
    pub fn line_total(&self) -> Decimal {
        self.total
    }

    fn validate_description(description: &str) -> Result<()> {
        if description.trim().is_empty() {
            return Err(AppError::validation("Line item description cannot be empty"));
        }

        if description.len() > 255 {
            return Err(AppError::validation(
                "Line item description cannot exceed 255 characters",
            ));
        }

        Ok(())
    }

    fn validate_quantity(quantity: i32) -> Result<()> {
        if quantity < 1 {
            return Err(AppError::validation(format!(
                "Quantity must be at least 1, got: {}",
                quantity
            )));
        }

        Ok(())
    }

    fn validate_unit_price(unit_price: Decimal) -> Result<()> {
        if unit_price < Decimal::ZERO {
            return Err(AppError::validation(format!(
                "Unit price must be non-negative, got: {}",
                unit_price
            )));
        }

        MONEY.check("unit_price", unit_price)?;
        Ok(())
    }
}

impl RawLineItem {
    /// Rows the user added but never filled in
    pub fn is_blank(&self) -> bool {
        self.description.trim().is_empty()
            && self
                .service_id
                .as_deref()
                .map_or(true, |id| id.trim().is_empty())
    }
}
