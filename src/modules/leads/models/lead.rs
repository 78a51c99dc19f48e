use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::{AppError, Result};
use crate::modules::clients::models::CreateClientRequest;

/// Where a lead came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeadSource {
    GoogleSheet,
    Manual,
}

impl LeadSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            LeadSource::GoogleSheet => "google_sheet",
            LeadSource::Manual => "manual",
        }
    }

    pub fn parse(value: &str) -> Result<Self> {
        match value {
            "google_sheet" => Ok(LeadSource::GoogleSheet),
            "manual" => Ok(LeadSource::Manual),
            other => Err(AppError::Internal(format!("Unknown lead source '{}'", other))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeadStatus {
    #[default]
    New,
    Contacted,
    Converted,
}

impl LeadStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LeadStatus::New => "new",
            LeadStatus::Contacted => "contacted",
            LeadStatus::Converted => "converted",
        }
    }

    pub fn parse(value: &str) -> Result<Self> {
        match value {
            "new" => Ok(LeadStatus::New),
            "contacted" => Ok(LeadStatus::Contacted),
            "converted" => Ok(LeadStatus::Converted),
            other => Err(AppError::Internal(format!("Unknown lead status '{}'", other))),
        }
    }

    /// Manual status changes between new and contacted. Converted is only
    /// reached by converting the lead and is terminal.
    pub fn can_transition_to(&self, next: LeadStatus) -> bool {
        *self != LeadStatus::Converted && next != LeadStatus::Converted
    }
}

/// A stored lead; `phone` is the key spreadsheet rows are matched on
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lead {
    pub id: String,
    pub name: String,
    pub phone: String,
    pub service_interested: String,
    pub address: Option<String>,
    pub status: LeadStatus,
    pub lead_source: LeadSource,
    pub notes: Option<String>,
    /// `row_<n>` for leads imported from the sheet
    pub sheet_row_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Lead {
    /// A lead for one sheet row. Rows without a phone number cannot be matched
    /// on later syncs and are rejected.
    pub fn from_import(imported: ImportedLead, now: DateTime<Utc>) -> Result<Self> {
        let phone = imported.phone.trim().to_string();
        if phone.is_empty() {
            return Err(AppError::validation(format!(
                "Sheet {} has no phone number",
                imported.sheet_row_id
            )));
        }

        Ok(Self {
            id: Uuid::new_v4().to_string(),
            name: imported.name,
            phone,
            service_interested: imported.service_interested,
            address: non_blank(Some(imported.address)),
            status: imported.status,
            lead_source: imported.lead_source,
            notes: None,
            sheet_row_id: Some(imported.sheet_row_id),
            created_at: now,
            updated_at: now,
        })
    }

    /// A lead entered by hand
    pub fn new(request: CreateLeadRequest, now: DateTime<Utc>) -> Result<Self> {
        let name = request.name.trim().to_string();
        let phone = request.phone.trim().to_string();
        if phone.is_empty() {
            return Err(AppError::validation("Lead phone number cannot be empty"));
        }
        if name.len() > 255 {
            return Err(AppError::validation("Lead name cannot exceed 255 characters"));
        }

        Ok(Self {
            id: Uuid::new_v4().to_string(),
            name,
            phone,
            service_interested: request
                .service_interested
                .map(|s| s.trim().to_string())
                .unwrap_or_default(),
            address: non_blank(request.address),
            status: LeadStatus::New,
            lead_source: LeadSource::Manual,
            notes: non_blank(request.notes),
            sheet_row_id: None,
            created_at: now,
            updated_at: now,
        })
    }

    /// The name, or the phone number when the name is blank
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            &self.phone
        } else {
            &self.name
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Request body for POST /leads
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateLeadRequest {
    #[serde(default)]
    pub name: String,
    pub phone: String,
    #[serde(default)]
    pub service_interested: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Request body for PATCH /leads/{id}/status
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateLeadStatusRequest {
    pub status: LeadStatus,
}

/// Query string for GET /leads
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListLeadsQuery {
    #[serde(default)]
    pub status: Option<LeadStatus>,
}

/// A lead read from one spreadsheet row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportedLead {
    pub name: String,
    pub phone: String,
    pub service_interested: String,
    pub address: String,
    pub lead_source: LeadSource,
    pub status: LeadStatus,
    /// `row_<n>` where n is the 1-based sheet row
    pub sheet_row_id: String,
}

/// Response body for POST /leads/sync
#[derive(Debug, Clone, Serialize)]
pub struct LeadSyncResponse {
    pub success: bool,
    pub message: String,
    pub leads: Vec<Lead>,
    pub total: usize,
    /// Sheet rows left out because they had no phone number
    pub skipped: usize,
}

impl LeadSyncResponse {
    pub fn from_leads(leads: Vec<Lead>, skipped: usize) -> Self {
        let message = if leads.is_empty() {
            "No data found in sheet".to_string()
        } else {
            format!(
                "Successfully processed {} leads from Google Sheets",
                leads.len()
            )
        };

        Self {
            success: true,
            message,
            total: leads.len(),
            leads,
            skipped,
        }
    }
}

/// Request body for POST /leads/convert
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConvertLeadRequest {
    #[serde(default)]
    pub lead_id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub service_interested: Option<String>,
}

impl ConvertLeadRequest {
    /// Fill fields the caller left blank from the stored lead
    pub fn merge_lead(mut self, lead: &Lead) -> Self {
        if self.name.trim().is_empty() {
            self.name = lead.name.clone();
        }
        if self.phone.trim().is_empty() {
            self.phone = lead.phone.clone();
        }
        if self.address.as_deref().map_or(true, |a| a.trim().is_empty()) {
            self.address = lead.address.clone();
        }
        if self
            .service_interested
            .as_deref()
            .map_or(true, |s| s.trim().is_empty())
        {
            self.service_interested = Some(lead.service_interested.clone());
        }
        self
    }

    /// The lead's name, or its phone number when the name is blank
    pub fn display_name(&self) -> &str {
        let name = self.name.trim();
        if name.is_empty() {
            self.phone.trim()
        } else {
            name
        }
    }

    pub fn to_client_request(&self) -> CreateClientRequest {
        let service = self
            .service_interested
            .as_deref()
            .map(str::trim)
            .unwrap_or_default();

        CreateClientRequest {
            name: self.display_name().to_string(),
            lead_id: self.lead_id.clone(),
            phone: Some(self.phone.clone()),
            address: self.address.clone(),
            email: None,
            billing_details: None,
            notes: Some(format!(
                "Converted from lead. Service interested: {}",
                service
            )),
        }
    }
}
