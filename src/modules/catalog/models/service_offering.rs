use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::numeric::parse_or;
use crate::core::{AppError, NumericInput, Result, MONEY};

/// A service the business sells. Inactive services stay on old invoices but
/// cannot be billed again.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceOffering {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    /// Default unit price for new invoice rows
    pub base_price: Decimal,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request body for POST /services
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateServiceRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub base_price: Option<NumericInput>,
    #[serde(default = "active_by_default")]
    pub is_active: bool,
}

fn active_by_default() -> bool {
    true
}

/// Request body for PUT /services/{id}; absent fields are left unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateServiceRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub base_price: Option<NumericInput>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

/// Query string for GET /services
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListServicesQuery {
    #[serde(default)]
    pub active: Option<bool>,
    #[serde(default)]
    pub search: Option<String>,
}

impl ServiceOffering {
    pub fn new(request: CreateServiceRequest, now: DateTime<Utc>) -> Result<Self> {
        Ok(Self {
            id: Uuid::new_v4().to_string(),
            name: validate_name(&request.name)?,
            description: non_blank(request.description),
            base_price: parse_base_price(request.base_price.as_ref())?,
            is_active: request.is_active,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn apply(&mut self, update: UpdateServiceRequest, now: DateTime<Utc>) -> Result<()> {
        if let Some(name) = &update.name {
            self.name = validate_name(name)?;
        }
        if update.description.is_some() {
            self.description = non_blank(update.description);
        }
        if let Some(price) = &update.base_price {
            self.base_price = parse_base_price(Some(price))?;
        }
        if let Some(is_active) = update.is_active {
            self.is_active = is_active;
        }
        self.updated_at = now;
        Ok(())
    }

    /// Case-insensitive match on name or description
    pub fn matches(&self, term: &str) -> bool {
        let term = term.trim().to_lowercase();
        term.is_empty()
            || self.name.to_lowercase().contains(&term)
            || self
                .description
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(&term))
    }
}

fn validate_name(name: &str) -> Result<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::validation("Service name cannot be empty"));
    }
    if name.len() > 255 {
        return Err(AppError::validation("Service name cannot exceed 255 characters"));
    }
    Ok(name.to_string())
}

fn parse_base_price(input: Option<&NumericInput>) -> Result<Decimal> {
    let price = parse_or("base_price", input, Decimal::ZERO)?;
    if price < Decimal::ZERO {
        return Err(AppError::validation(format!(
            "Base price cannot be negative, got: {}",
            price
        )));
    }
    MONEY.check("base_price", price)
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
