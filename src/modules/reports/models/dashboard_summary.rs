use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::core::Currency;
use crate::modules::invoices::models::InvoiceStatus;
use crate::modules::invoices::repositories::StatusAggregate;

/// Dashboard figures aggregated from all invoices
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub total_clients: i64,
    pub total_invoices: i64,
    /// Invoices still awaiting payment (draft + sent)
    pub pending_invoices: i64,
    /// Count per status, every status present
    pub status_counts: BTreeMap<InvoiceStatus, i64>,
    /// Sum of paid invoice totals
    pub total_revenue: Decimal,
    /// Sum of draft + sent invoice totals
    pub pending_revenue: Decimal,
    pub formatted_revenue: String,
    pub formatted_pending_revenue: String,
}

impl DashboardSummary {
    pub fn from_aggregates(
        total_clients: i64,
        aggregates: &[StatusAggregate],
        currency: Currency,
    ) -> Self {
        let mut status_counts: BTreeMap<InvoiceStatus, i64> =
            InvoiceStatus::ALL.iter().map(|&s| (s, 0)).collect();

        let mut total_invoices = 0;
        let mut pending_invoices = 0;
        let mut total_revenue = Decimal::ZERO;
        let mut pending_revenue = Decimal::ZERO;

        for aggregate in aggregates {
            *status_counts.entry(aggregate.status).or_insert(0) += aggregate.count;
            total_invoices += aggregate.count;

            if aggregate.status == InvoiceStatus::Paid {
                total_revenue += aggregate.total;
            }
            if aggregate.status.is_pending() {
                pending_invoices += aggregate.count;
                pending_revenue += aggregate.total;
            }
        }

        Self {
            total_clients,
            total_invoices,
            pending_invoices,
            status_counts,
            total_revenue,
            pending_revenue,
            formatted_revenue: currency.format_amount(total_revenue),
            formatted_pending_revenue: currency.format_amount(pending_revenue),
        }
    }
}
