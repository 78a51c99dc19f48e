// An invoice bills one client for an ordered list of line items. It is
// created once in `draft`, its items never change afterwards, and its status
// only moves forward.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::line_item::{LineItem, RawLineItem};
use super::totals::{InvoiceTotals, TotalsResponse};
use crate::core::{AppError, Currency, NumericInput, Result};

/// Invoice status lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvoiceStatus {
    /// Created, not yet sent to the client
    Draft,

    /// Delivered to the client, awaiting payment
    Sent,

    /// Past due date without payment
    Overdue,

    /// Payment received (terminal)
    Paid,
}

impl Default for InvoiceStatus {
    fn default() -> Self {
        InvoiceStatus::Draft
    }
}

impl InvoiceStatus {
    pub const ALL: [InvoiceStatus; 4] = [
        InvoiceStatus::Draft,
        InvoiceStatus::Sent,
        InvoiceStatus::Overdue,
        InvoiceStatus::Paid,
    ];

    /// Forward-only: every status can be reached from an earlier one,
    /// nothing leaves `Paid`.
    pub fn can_transition_to(self, next: InvoiceStatus) -> bool {
        self == next || (self != InvoiceStatus::Paid && next > self)
    }

    /// Still awaiting payment and counted as pending revenue
    pub fn is_pending(self) -> bool {
        matches!(self, InvoiceStatus::Draft | InvoiceStatus::Sent)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            InvoiceStatus::Draft => "draft",
            InvoiceStatus::Sent => "sent",
            InvoiceStatus::Overdue => "overdue",
            InvoiceStatus::Paid => "paid",
        }
    }
}

impl std::fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for InvoiceStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "draft" => Ok(InvoiceStatus::Draft),
            "sent" => Ok(InvoiceStatus::Sent),
            "overdue" => Ok(InvoiceStatus::Overdue),
            "paid" => Ok(InvoiceStatus::Paid),
            _ => Err(format!("Invalid invoice status: {}", s)),
        }
    }
}

/// Represents a client invoice
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Invoice {
    /// Unique invoice ID (UUID)
    pub id: String,

    /// Client being billed
    pub client_id: String,

    /// Human-readable number, `INV-` followed by 8 digits
    pub invoice_number: String,

    pub invoice_date: NaiveDate,

    pub due_date: NaiveDate,

    pub status: InvoiceStatus,

    #[serde(flatten)]
    pub totals: InvoiceTotals,

    pub notes: Option<String>,

    /// Line items in the order they were entered
    pub line_items: Vec<LineItem>,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl Invoice {
    /// Assemble a new draft invoice from already computed totals
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        invoice_number: String,
        client_id: String,
        invoice_date: NaiveDate,
        due_date: NaiveDate,
        totals: InvoiceTotals,
        line_items: Vec<LineItem>,
        notes: Option<String>,
        now: DateTime<Utc>,
    ) -> Result<Self> {
        if client_id.trim().is_empty() {
            return Err(AppError::validation("Client ID cannot be empty"));
        }

        let id = Uuid::new_v4().to_string();
        let line_items = line_items
            .into_iter()
            .map(|mut item| {
                item.invoice_id = Some(id.clone());
                item
            })
            .collect();

        Ok(Self {
            id,
            client_id,
            invoice_number,
            invoice_date,
            due_date,
            status: InvoiceStatus::Draft,
            totals,
            notes: notes.filter(|n| !n.trim().is_empty()),
            line_items,
            created_at: now,
            updated_at: now,
        })
    }

    /// Move the invoice forward in its lifecycle
    pub fn update_status(&mut self, new_status: InvoiceStatus, now: DateTime<Utc>) -> Result<()> {
        if !self.status.can_transition_to(new_status) {
            return Err(AppError::validation(format!(
                "Invalid status transition from {} to {}",
                self.status, new_status
            )));
        }

        if self.status != new_status {
            self.status = new_status;
            self.updated_at = now;
        }

        Ok(())
    }

    /// File name used for the PDF download
    pub fn document_file_name(&self) -> String {
        format!("Invoice_{}.pdf", self.invoice_number)
    }
}

/// Request body for POST /invoices
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateInvoiceRequest {
    pub client_id: String,
    pub due_date: NaiveDate,
    #[serde(default)]
    pub tax_rate: Option<NumericInput>,
    #[serde(default)]
    pub discount: Option<NumericInput>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub items: Vec<RawLineItem>,
}

/// Request body for PATCH /invoices/{id}/status
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: InvoiceStatus,
}

/// Invoice as returned by the API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceResponse {
    pub id: String,
    pub invoice_number: String,
    pub client_id: String,
    pub client_name: Option<String>,
    pub invoice_date: NaiveDate,
    pub due_date: NaiveDate,
    pub status: InvoiceStatus,
    pub currency: Currency,
    pub totals: TotalsResponse,
    pub notes: Option<String>,
    pub line_items: Vec<LineItemResponse>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineItemResponse {
    pub service_id: Option<String>,
    pub description: String,
    pub quantity: i32,
    pub unit_price: String,
    pub total: String,
}

impl InvoiceResponse {
    pub fn from_invoice(invoice: Invoice, client_name: Option<String>, currency: Currency) -> Self {
        let display = |amount| format!("{:.2}", currency.round(amount));
        let totals = TotalsResponse::from_totals(&invoice.totals, invoice.line_items.len(), currency);

        Self {
            id: invoice.id,
            invoice_number: invoice.invoice_number,
            client_id: invoice.client_id,
            client_name,
            invoice_date: invoice.invoice_date,
            due_date: invoice.due_date,
            status: invoice.status,
            currency,
            totals,
            notes: invoice.notes,
            line_items: invoice
                .line_items
                .iter()
                .map(|item| LineItemResponse {
                    service_id: item.service_id.clone(),
                    description: item.description.clone(),
                    quantity: item.quantity,
                    unit_price: display(item.unit_price),
                    total: display(item.line_total()),
                })
                .collect(),
            created_at: invoice.created_at.to_rfc3339(),
            updated_at: invoice.updated_at.to_rfc3339(),
        }
    }
}
