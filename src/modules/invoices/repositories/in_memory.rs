use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::invoice_repository::{InvoiceRepository, StatusAggregate};
use crate::core::{AppError, Result};
use crate::modules::invoices::models::{Invoice, InvoiceStatus};

/// In-process invoice store for tests and `STORAGE=memory`
#[derive(Default)]
pub struct InMemoryInvoiceRepository {
    invoices: RwLock<HashMap<String, Invoice>>,
}

impl InMemoryInvoiceRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl InvoiceRepository for InMemoryInvoiceRepository {
    async fn create(&self, invoice: &Invoice) -> Result<Invoice> {
        let mut invoices = self.invoices.write().await;

        if invoices
            .values()
            .any(|existing| existing.invoice_number == invoice.invoice_number)
        {
            return Err(AppError::conflict(format!(
                "Invoice number '{}' already exists",
                invoice.invoice_number
            )));
        }

        let mut created = invoice.clone();
        for item in created.line_items.iter_mut() {
            item.id.get_or_insert_with(|| Uuid::new_v4().to_string());
            item.invoice_id = Some(invoice.id.clone());
        }

        invoices.insert(created.id.clone(), created.clone());
        Ok(created)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Invoice>> {
        Ok(self.invoices.read().await.get(id).cloned())
    }

    async fn number_exists(&self, invoice_number: &str) -> Result<bool> {
        Ok(self
            .invoices
            .read()
            .await
            .values()
            .any(|invoice| invoice.invoice_number == invoice_number))
    }

    async fn list(&self, status: Option<InvoiceStatus>) -> Result<Vec<Invoice>> {
        let mut matching: Vec<Invoice> = self
            .invoices
            .read()
            .await
            .values()
            .filter(|invoice| status.map_or(true, |s| invoice.status == s))
            .cloned()
            .collect();

        matching.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.invoice_number.cmp(&a.invoice_number))
        });
        Ok(matching)
    }

    async fn update_status(
        &self,
        id: &str,
        status: InvoiceStatus,
        updated_at: DateTime<Utc>,
    ) -> Result<()> {
        let mut invoices = self.invoices.write().await;
        let invoice = invoices
            .get_mut(id)
            .ok_or_else(|| AppError::not_found("Invoice not found"))?;

        invoice.status = status;
        invoice.updated_at = updated_at;
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        Ok(self.invoices.write().await.remove(id).is_some())
    }

    async fn aggregate_by_status(&self) -> Result<Vec<StatusAggregate>> {
        let invoices = self.invoices.read().await;

        Ok(InvoiceStatus::ALL
            .iter()
            .filter_map(|&status| {
                let (count, total) = invoices
                    .values()
                    .filter(|invoice| invoice.status == status)
                    .fold((0i64, Decimal::ZERO), |(count, total), invoice| {
                        (count + 1, total + invoice.totals.total)
                    });
                (count > 0).then_some(StatusAggregate {
                    status,
                    count,
                    total,
                })
            })
            .collect())
    }
}
