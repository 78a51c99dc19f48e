use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

/// Kinds of events written to the activity feed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActivityAction {
    GoogleSheetsSync,
    LeadConverted,
    LeadDeleted,
    InvoiceCreated,
    InvoicePaid,
    InvoiceDeleted,
    /// Actions written by older versions or other tools
    Other(String),
}

impl ActivityAction {
    pub fn as_str(&self) -> &str {
        match self {
            ActivityAction::GoogleSheetsSync => "google_sheets_sync",
            ActivityAction::LeadConverted => "lead_converted",
            ActivityAction::LeadDeleted => "lead_deleted",
            ActivityAction::InvoiceCreated => "invoice_created",
            ActivityAction::InvoicePaid => "invoice_paid",
            ActivityAction::InvoiceDeleted => "invoice_deleted",
            ActivityAction::Other(action) => action,
        }
    }

    pub fn parse(action: &str) -> Self {
        match action {
            "google_sheets_sync" => ActivityAction::GoogleSheetsSync,
            "lead_converted" => ActivityAction::LeadConverted,
            "lead_deleted" => ActivityAction::LeadDeleted,
            "invoice_created" => ActivityAction::InvoiceCreated,
            "invoice_paid" => ActivityAction::InvoicePaid,
            "invoice_deleted" => ActivityAction::InvoiceDeleted,
            other => ActivityAction::Other(other.to_string()),
        }
    }

    /// Human label for the dashboard feed
    pub fn label(&self) -> String {
        match self {
            ActivityAction::GoogleSheetsSync => "Google Sheets Sync".to_string(),
            ActivityAction::LeadConverted => "Lead Converted to Client".to_string(),
            ActivityAction::InvoiceCreated => "Invoice Created".to_string(),
            ActivityAction::InvoicePaid => "Invoice Marked as Paid".to_string(),
            _ => title_case(self.as_str()),
        }
    }
}

impl Serialize for ActivityAction {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ActivityAction {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let action = String::deserialize(deserializer)?;
        Ok(ActivityAction::parse(&action))
    }
}

/// `invoice_deleted` -> `Invoice Deleted`
fn title_case(action: &str) -> String {
    action
        .split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// A single entry in the activity feed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityLog {
    pub id: String,
    pub lead_id: Option<String>,
    pub client_id: Option<String>,
    pub invoice_id: Option<String>,
    pub action: ActivityAction,
    pub details: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl ActivityLog {
    pub fn new(action: ActivityAction, details: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            lead_id: None,
            client_id: None,
            invoice_id: None,
            action,
            details: Some(details.into()),
            created_at: now,
        }
    }

    pub fn for_invoice(mut self, invoice_id: impl Into<String>) -> Self {
        self.invoice_id = Some(invoice_id.into());
        self
    }

    pub fn for_client(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = Some(client_id.into());
        self
    }

    pub fn for_lead(mut self, lead_id: Option<String>) -> Self {
        self.lead_id = lead_id;
        self
    }
}

/// Activity entry as returned by GET /activity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityResponse {
    pub id: String,
    pub action: String,
    pub label: String,
    pub details: Option<String>,
    pub invoice_id: Option<String>,
    pub client_id: Option<String>,
    pub lead_id: Option<String>,
    pub created_at: String,
}

impl From<ActivityLog> for ActivityResponse {
    fn from(log: ActivityLog) -> Self {
        Self {
            id: log.id,
            action: log.action.as_str().to_string(),
            label: log.action.label(),
            details: log.details,
            invoice_id: log.invoice_id,
            client_id: log.client_id,
            lead_id: log.lead_id,
            created_at: log.created_at.to_rfc3339(),
        }
    }
}
