use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, MySqlPool};
use tokio::sync::RwLock;

use crate::core::{AppError, Result};
use crate::modules::leads::models::{Lead, LeadSource, LeadStatus};

/// Storage for leads
#[async_trait]
pub trait LeadRepository: Send + Sync {
    /// Insert a new lead. A phone number that is already stored yields `AppError::Conflict`.
    async fn create(&self, lead: &Lead) -> Result<Lead>;

    /// Insert the lead, or refresh the sheet fields of the lead with the same
    /// phone number. An existing lead keeps its id, status and creation time.
    async fn upsert_by_phone(&self, lead: &Lead) -> Result<Lead>;

    async fn find_by_id(&self, id: &str) -> Result<Option<Lead>>;

    /// Newest first
    async fn list(&self, status: Option<LeadStatus>) -> Result<Vec<Lead>>;

    async fn update_status(
        &self,
        id: &str,
        status: LeadStatus,
        updated_at: DateTime<Utc>,
    ) -> Result<()>;

    /// Returns false if nothing matched
    async fn delete(&self, id: &str) -> Result<bool>;
}

/// MySQL-backed lead repository
pub struct MySqlLeadRepository {
    pool: MySqlPool,
}

impl MySqlLeadRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    async fn find_by_phone(&self, phone: &str) -> Result<Option<Lead>> {
        let row = sqlx::query_as::<_, LeadRow>(&format!("{} WHERE phone = ?", SELECT_LEADS))
            .bind(phone)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to fetch lead: {}", e)))?;

        row.map(Lead::try_from).transpose()
    }
}

const SELECT_LEADS: &str = r#"
    SELECT id, name, phone, service_interested, address, status, lead_source, notes,
           sheet_row_id, created_at, updated_at
    FROM leads
"#;

#[derive(Debug, FromRow)]
struct LeadRow {
    id: String,
    name: String,
    phone: String,
    service_interested: String,
    address: Option<String>,
    status: String,
    lead_source: String,
    notes: Option<String>,
    sheet_row_id: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<LeadRow> for Lead {
    type Error = AppError;

    fn try_from(row: LeadRow) -> Result<Self> {
        Ok(Lead {
            id: row.id,
            name: row.name,
            phone: row.phone,
            service_interested: row.service_interested,
            address: row.address,
            status: LeadStatus::parse(&row.status)?,
            lead_source: LeadSource::parse(&row.lead_source)?,
            notes: row.notes,
            sheet_row_id: row.sheet_row_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[async_trait]
impl LeadRepository for MySqlLeadRepository {
    async fn create(&self, lead: &Lead) -> Result<Lead> {
        sqlx::query(
            r#"
            INSERT INTO leads (
                id, name, phone, service_interested, address, status, lead_source,
                notes, sheet_row_id, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&lead.id)
        .bind(&lead.name)
        .bind(&lead.phone)
        .bind(&lead.service_interested)
        .bind(&lead.address)
        .bind(lead.status.as_str())
        .bind(lead.lead_source.as_str())
        .bind(&lead.notes)
        .bind(&lead.sheet_row_id)
        .bind(lead.created_at)
        .bind(lead.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AppError::conflict(format!(
                        "A lead with phone '{}' already exists",
                        lead.phone
                    ));
                }
            }
            AppError::Internal(format!("Failed to create lead: {}", e))
        })?;

        Ok(lead.clone())
    }

    async fn upsert_by_phone(&self, lead: &Lead) -> Result<Lead> {
        sqlx::query(
            r#"
            INSERT INTO leads (
                id, name, phone, service_interested, address, status, lead_source,
                notes, sheet_row_id, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            ON DUPLICATE KEY UPDATE
                name = VALUES(name),
                service_interested = VALUES(service_interested),
                address = VALUES(address),
                sheet_row_id = VALUES(sheet_row_id),
                updated_at = VALUES(updated_at)
            "#,
        )
        .bind(&lead.id)
        .bind(&lead.name)
        .bind(&lead.phone)
        .bind(&lead.service_interested)
        .bind(&lead.address)
        .bind(lead.status.as_str())
        .bind(lead.lead_source.as_str())
        .bind(&lead.notes)
        .bind(&lead.sheet_row_id)
        .bind(lead.created_at)
        .bind(lead.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to upsert lead: {}", e)))?;

        self.find_by_phone(&lead.phone)
            .await?
            .ok_or_else(|| AppError::Internal("Upserted lead could not be read back".to_string()))
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Lead>> {
        let row = sqlx::query_as::<_, LeadRow>(&format!("{} WHERE id = ?", SELECT_LEADS))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to fetch lead: {}", e)))?;

        row.map(Lead::try_from).transpose()
    }

    async fn list(&self, status: Option<LeadStatus>) -> Result<Vec<Lead>> {
        let rows = match status {
            Some(status) => {
                sqlx::query_as::<_, LeadRow>(&format!(
                    "{} WHERE status = ? ORDER BY created_at DESC",
                    SELECT_LEADS
                ))
                .bind(status.as_str())
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query_as::<_, LeadRow>(&format!("{} ORDER BY created_at DESC", SELECT_LEADS))
                    .fetch_all(&self.pool)
                    .await
            }
        }
        .map_err(|e| AppError::Internal(format!("Failed to list leads: {}", e)))?;

        rows.into_iter().map(Lead::try_from).collect()
    }

    async fn update_status(
        &self,
        id: &str,
        status: LeadStatus,
        updated_at: DateTime<Utc>,
    ) -> Result<()> {
        let result = sqlx::query("UPDATE leads SET status = ?, updated_at = ? WHERE id = ?")
            .bind(status.as_str())
            .bind(updated_at)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to update lead status: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Lead not found"));
        }

        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM leads WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to delete lead: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }
}

/// In-process lead store for tests and `STORAGE=memory`
#[derive(Default)]
pub struct InMemoryLeadRepository {
    leads: RwLock<HashMap<String, Lead>>,
}

impl InMemoryLeadRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LeadRepository for InMemoryLeadRepository {
    async fn create(&self, lead: &Lead) -> Result<Lead> {
        let mut leads = self.leads.write().await;
        if leads.values().any(|existing| existing.phone == lead.phone) {
            return Err(AppError::conflict(format!(
                "A lead with phone '{}' already exists",
                lead.phone
            )));
        }
        leads.insert(lead.id.clone(), lead.clone());
        Ok(lead.clone())
    }

    async fn upsert_by_phone(&self, lead: &Lead) -> Result<Lead> {
        let mut leads = self.leads.write().await;

        if let Some(existing) = leads.values_mut().find(|l| l.phone == lead.phone) {
            existing.name = lead.name.clone();
            existing.service_interested = lead.service_interested.clone();
            existing.address = lead.address.clone();
            existing.sheet_row_id = lead.sheet_row_id.clone();
            existing.updated_at = lead.updated_at;
            return Ok(existing.clone());
        }

        leads.insert(lead.id.clone(), lead.clone());
        Ok(lead.clone())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Lead>> {
        Ok(self.leads.read().await.get(id).cloned())
    }

    async fn list(&self, status: Option<LeadStatus>) -> Result<Vec<Lead>> {
        let mut leads: Vec<Lead> = self
            .leads
            .read()
            .await
            .values()
            .filter(|lead| status.map_or(true, |s| lead.status == s))
            .cloned()
            .collect();

        leads.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| a.name.cmp(&b.name))
        });
        Ok(leads)
    }

    async fn update_status(
        &self,
        id: &str,
        status: LeadStatus,
        updated_at: DateTime<Utc>,
    ) -> Result<()> {
        let mut leads = self.leads.write().await;
        let lead = leads
            .get_mut(id)
            .ok_or_else(|| AppError::not_found("Lead not found"))?;
        lead.status = status;
        lead.updated_at = updated_at;
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        Ok(self.leads.write().await.remove(id).is_some())
    }
}
