use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::{AppError, Result};

/// A billable customer, usually converted from a lead
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    pub id: String,

    /// Lead this client was converted from, if any
    pub lead_id: Option<String>,

    pub name: String,

    pub phone: Option<String>,

    /// Postal address; invoices fall back to the issuer's default jurisdiction
    pub address: Option<String>,

    pub email: Option<String>,

    pub billing_details: Option<String>,

    pub notes: Option<String>,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

/// Request body for POST /clients
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateClientRequest {
    pub name: String,
    #[serde(default)]
    pub lead_id: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub billing_details: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl Client {
    pub fn new(request: CreateClientRequest, now: DateTime<Utc>) -> Result<Self> {
        let name = request.name.trim().to_string();
        if name.is_empty() {
            return Err(AppError::validation("Client name cannot be empty"));
        }

        if name.len() > 255 {
            return Err(AppError::validation("Client name cannot exceed 255 characters"));
        }

        Ok(Self {
            id: Uuid::new_v4().to_string(),
            lead_id: request.lead_id,
            name,
            phone: non_blank(request.phone),
            address: non_blank(request.address),
            email: non_blank(request.email),
            billing_details: non_blank(request.billing_details),
            notes: non_blank(request.notes),
            created_at: now,
            updated_at: now,
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
