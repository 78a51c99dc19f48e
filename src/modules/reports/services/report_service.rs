use std::sync::Arc;

use tracing::info;

use crate::core::{Currency, Result};
use crate::modules::clients::repositories::ClientRepository;
use crate::modules::invoices::repositories::InvoiceRepository;
use crate::modules::reports::models::DashboardSummary;

/// Service for dashboard reporting
pub struct ReportService {
    invoice_repo: Arc<dyn InvoiceRepository>,
    client_repo: Arc<dyn ClientRepository>,
    currency: Currency,
}

impl ReportService {
    pub fn new(
        invoice_repo: Arc<dyn InvoiceRepository>,
        client_repo: Arc<dyn ClientRepository>,
        currency: Currency,
    ) -> Self {
        Self {
            invoice_repo,
            client_repo,
            currency,
        }
    }

    /// Revenue counts paid invoices; pending counts draft and sent
    pub async fn dashboard_summary(&self) -> Result<DashboardSummary> {
        let total_clients = self.client_repo.count().await?;
        let aggregates = self.invoice_repo.aggregate_by_status().await?;

        let summary = DashboardSummary::from_aggregates(total_clients, &aggregates, self.currency);

        info!(
            total_invoices = summary.total_invoices,
            revenue = %summary.total_revenue,
            pending = %summary.pending_revenue,
            "Dashboard summary generated"
        );

        Ok(summary)
    }
}
