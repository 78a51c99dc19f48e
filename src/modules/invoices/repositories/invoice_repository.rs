use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, MySql, MySqlPool, Transaction};
use uuid::Uuid;

use crate::core::{AppError, Result};
use crate::modules::invoices::models::{Invoice, InvoiceStatus, InvoiceTotals, LineItem};

/// Invoice count and summed totals for one status
#[derive(Debug, Clone, PartialEq)]
pub struct StatusAggregate {
    pub status: InvoiceStatus,
    pub count: i64,
    pub total: Decimal,
}

/// Storage for invoices and their line items
#[async_trait]
pub trait InvoiceRepository: Send + Sync {
    /// Persist an invoice with all of its line items as one unit.
    /// A taken invoice number yields `AppError::Conflict`.
    async fn create(&self, invoice: &Invoice) -> Result<Invoice>;

    async fn find_by_id(&self, id: &str) -> Result<Option<Invoice>>;

    async fn number_exists(&self, invoice_number: &str) -> Result<bool>;

    /// Newest first, optionally restricted to one status
    async fn list(&self, status: Option<InvoiceStatus>) -> Result<Vec<Invoice>>;

    async fn update_status(
        &self,
        id: &str,
        status: InvoiceStatus,
        updated_at: DateTime<Utc>,
    ) -> Result<()>;

    /// Remove an invoice and its line items. Returns false if nothing matched.
    async fn delete(&self, id: &str) -> Result<bool>;

    async fn aggregate_by_status(&self) -> Result<Vec<StatusAggregate>>;
}

/// MySQL-backed invoice repository
pub struct MySqlInvoiceRepository {
    pool: MySqlPool,
}

impl MySqlInvoiceRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    async fn insert_with_tx(
        &self,
        tx: &mut Transaction<'_, MySql>,
        invoice: &Invoice,
    ) -> Result<Invoice> {
        sqlx::query(
            r#"
            INSERT INTO invoices (
                id, client_id, invoice_number, invoice_date, due_date, status,
                subtotal, tax_rate, tax_amount, discount, total, notes,
                created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&invoice.id)
        .bind(&invoice.client_id)
        .bind(&invoice.invoice_number)
        .bind(invoice.invoice_date)
        .bind(invoice.due_date)
        .bind(invoice.status.as_str())
        .bind(invoice.totals.subtotal)
        .bind(invoice.totals.tax_rate)
        .bind(invoice.totals.tax_amount)
        .bind(invoice.totals.discount)
        .bind(invoice.totals.total)
        .bind(&invoice.notes)
        .bind(invoice.created_at)
        .bind(invoice.updated_at)
        .execute(&mut **tx)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AppError::conflict(format!(
                        "Invoice number '{}' already exists",
                        invoice.invoice_number
                    ));
                }
            }
            AppError::Internal(format!("Failed to create invoice: {}", e))
        })?;

        let mut created = invoice.clone();

        for (position, item) in created.line_items.iter_mut().enumerate() {
            let line_id = item
                .id
                .clone()
                .unwrap_or_else(|| Uuid::new_v4().to_string());

            sqlx::query(
                r#"
                INSERT INTO invoice_items (
                    id, invoice_id, service_id, position, description, quantity,
                    unit_price, total
                ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(&line_id)
            .bind(&invoice.id)
            .bind(&item.service_id)
            .bind(position as u32)
            .bind(&item.description)
            .bind(item.quantity)
            .bind(item.unit_price)
            .bind(item.line_total())
            .execute(&mut **tx)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to create line item: {}", e)))?;

            item.id = Some(line_id);
            item.invoice_id = Some(invoice.id.clone());
        }

        Ok(created)
    }

    async fn load_line_items(&self, invoice_ids: &[String]) -> Result<Vec<LineItemRow>> {
        if invoice_ids.is_empty() {
            return Ok(Vec::new());
        }

        let placeholders = vec!["?"; invoice_ids.len()].join(", ");
        let sql = format!(
            r#"
            SELECT id, invoice_id, service_id, description, quantity, unit_price
            FROM invoice_items
            WHERE invoice_id IN ({})
            ORDER BY invoice_id, position ASC
            "#,
            placeholders
        );

        let mut query = sqlx::query_as::<_, LineItemRow>(&sql);
        for id in invoice_ids {
            query = query.bind(id);
        }

        query
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to fetch line items: {}", e)))
    }
}

#[derive(Debug, FromRow)]
struct InvoiceRow {
    id: String,
    client_id: String,
    invoice_number: String,
    invoice_date: NaiveDate,
    due_date: NaiveDate,
    status: String,
    subtotal: Decimal,
    tax_rate: Decimal,
    tax_amount: Decimal,
    discount: Decimal,
    total: Decimal,
    notes: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl InvoiceRow {
    fn into_invoice(self, line_items: Vec<LineItem>) -> Result<Invoice> {
        let status = self
            .status
            .parse::<InvoiceStatus>()
            .map_err(AppError::Internal)?;

        Ok(Invoice {
            id: self.id,
            client_id: self.client_id,
            invoice_number: self.invoice_number,
            invoice_date: self.invoice_date,
            due_date: self.due_date,
            status,
            totals: InvoiceTotals {
                subtotal: self.subtotal,
                tax_rate: self.tax_rate,
                tax_amount: self.tax_amount,
                discount: self.discount,
                total: self.total,
            },
            notes: self.notes,
            line_items,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(Debug, FromRow)]
struct LineItemRow {
    id: String,
    invoice_id: String,
    service_id: Option<String>,
    description: String,
    quantity: i32,
    unit_price: Decimal,
}

impl TryFrom<LineItemRow> for LineItem {
    type Error = AppError;

    fn try_from(row: LineItemRow) -> Result<Self> {
        LineItem::stored(
            row.id,
            row.invoice_id,
            row.service_id,
            row.description,
            row.quantity,
            row.unit_price,
        )
    }
}

#[derive(Debug, FromRow)]
struct AggregateRow {
    status: String,
    invoice_count: i64,
    total_sum: Option<Decimal>,
}

const INVOICE_COLUMNS: &str = r#"
    id, client_id, invoice_number, invoice_date, due_date, status,
    subtotal, tax_rate, tax_amount, discount, total, notes,
    created_at, updated_at
"#;

#[async_trait]
impl InvoiceRepository for MySqlInvoiceRepository {
    async fn create(&self, invoice: &Invoice) -> Result<Invoice> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::Internal(format!("Failed to start transaction: {}", e)))?;

        let created = self.insert_with_tx(&mut tx, invoice).await?;

        tx.commit()
            .await
            .map_err(|e| AppError::Internal(format!("Failed to commit transaction: {}", e)))?;

        Ok(created)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Invoice>> {
        let sql = format!("SELECT {} FROM invoices WHERE id = ?", INVOICE_COLUMNS);
        let row = sqlx::query_as::<_, InvoiceRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to fetch invoice: {}", e)))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let items = self
            .load_line_items(&[row.id.clone()])
            .await?
            .into_iter()
            .map(LineItem::try_from)
            .collect::<Result<Vec<_>>>()?;

        row.into_invoice(items).map(Some)
    }

    async fn number_exists(&self, invoice_number: &str) -> Result<bool> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM invoices WHERE invoice_number = ?")
                .bind(invoice_number)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| {
                    AppError::Internal(format!("Failed to check invoice number: {}", e))
                })?;

        Ok(count > 0)
    }

    async fn list(&self, status: Option<InvoiceStatus>) -> Result<Vec<Invoice>> {
        let rows = match status {
            Some(status) => {
                let sql = format!(
                    "SELECT {} FROM invoices WHERE status = ? ORDER BY created_at DESC",
                    INVOICE_COLUMNS
                );
                sqlx::query_as::<_, InvoiceRow>(&sql)
                    .bind(status.as_str())
                    .fetch_all(&self.pool)
                    .await
            }
            None => {
                let sql = format!(
                    "SELECT {} FROM invoices ORDER BY created_at DESC",
                    INVOICE_COLUMNS
                );
                sqlx::query_as::<_, InvoiceRow>(&sql)
                    .fetch_all(&self.pool)
                    .await
            }
        }
        .map_err(|e| AppError::Internal(format!("Failed to list invoices: {}", e)))?;

        let ids: Vec<String> = rows.iter().map(|r| r.id.clone()).collect();
        let mut items_by_invoice: HashMap<String, Vec<LineItem>> = HashMap::new();
        for row in self.load_line_items(&ids).await? {
            items_by_invoice
                .entry(row.invoice_id.clone())
                .or_default()
                .push(LineItem::try_from(row)?);
        }

        rows.into_iter()
            .map(|row| {
                let own = items_by_invoice.remove(&row.id).unwrap_or_default();
                row.into_invoice(own)
            })
            .collect()
    }

    async fn update_status(
        &self,
        id: &str,
        status: InvoiceStatus,
        updated_at: DateTime<Utc>,
    ) -> Result<()> {
        let result = sqlx::query("UPDATE invoices SET status = ?, updated_at = ? WHERE id = ?")
            .bind(status.as_str())
            .bind(updated_at)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to update invoice status: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Invoice not found"));
        }

        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::Internal(format!("Failed to start transaction: {}", e)))?;

        sqlx::query("DELETE FROM invoice_items WHERE invoice_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to delete line items: {}", e)))?;

        let result = sqlx::query("DELETE FROM invoices WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to delete invoice: {}", e)))?;

        tx.commit()
            .await
            .map_err(|e| AppError::Internal(format!("Failed to commit transaction: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }

    async fn aggregate_by_status(&self) -> Result<Vec<StatusAggregate>> {
        let rows = sqlx::query_as::<_, AggregateRow>(
            r#"
            SELECT status, COUNT(*) AS invoice_count, SUM(total) AS total_sum
            FROM invoices
            GROUP BY status
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to aggregate invoices: {}", e)))?;

        rows.into_iter()
            .map(|row| {
                Ok(StatusAggregate {
                    status: row.status.parse().map_err(AppError::Internal)?,
                    count: row.invoice_count,
                    total: row.total_sum.unwrap_or(Decimal::ZERO),
                })
            })
            .collect()
    }
}
