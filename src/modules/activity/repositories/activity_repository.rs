use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, MySqlPool};
use tokio::sync::RwLock;
use tracing::warn;

use crate::core::{AppError, Result};
use crate::modules::activity::models::{ActivityAction, ActivityLog};

/// Append-only storage for the activity feed
#[async_trait]
pub trait ActivityRepository: Send + Sync {
    async fn insert(&self, entry: &ActivityLog) -> Result<()>;

    /// Most recent entries first
    async fn recent(&self, limit: usize) -> Result<Vec<ActivityLog>>;
}

/// Write an activity entry without failing the surrounding operation.
///
/// The feed is informational: a failed insert is logged and swallowed.
pub async fn record_activity(repo: &dyn ActivityRepository, entry: ActivityLog) {
    if let Err(e) = repo.insert(&entry).await {
        warn!(
            action = entry.action.as_str(),
            error = %e,
            "Failed to record activity"
        );
    }
}

pub struct MySqlActivityRepository {
    pool: MySqlPool,
}

impl MySqlActivityRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ActivityRow {
    id: String,
    lead_id: Option<String>,
    client_id: Option<String>,
    invoice_id: Option<String>,
    action: String,
    details: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<ActivityRow> for ActivityLog {
    fn from(row: ActivityRow) -> Self {
        ActivityLog {
            id: row.id,
            lead_id: row.lead_id,
            client_id: row.client_id,
            invoice_id: row.invoice_id,
            action: ActivityAction::parse(&row.action),
            details: row.details,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl ActivityRepository for MySqlActivityRepository {
    async fn insert(&self, entry: &ActivityLog) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO activity_logs (
                id, lead_id, client_id, invoice_id, action, details, created_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&entry.id)
        .bind(&entry.lead_id)
        .bind(&entry.client_id)
        .bind(&entry.invoice_id)
        .bind(entry.action.as_str())
        .bind(&entry.details)
        .bind(entry.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to insert activity: {}", e)))?;

        Ok(())
    }

    async fn recent(&self, limit: usize) -> Result<Vec<ActivityLog>> {
        let rows = sqlx::query_as::<_, ActivityRow>(
            r#"
            SELECT id, lead_id, client_id, invoice_id, action, details, created_at
            FROM activity_logs
            ORDER BY created_at DESC
            LIMIT ?
            "#,
        )
        .bind(limit as u64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to fetch activity: {}", e)))?;

        Ok(rows.into_iter().map(ActivityLog::from).collect())
    }
}

/// In-process activity feed
#[derive(Default)]
pub struct InMemoryActivityRepository {
    entries: RwLock<Vec<ActivityLog>>,
}

impl InMemoryActivityRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ActivityRepository for InMemoryActivityRepository {
    async fn insert(&self, entry: &ActivityLog) -> Result<()> {
        self.entries.write().await.push(entry.clone());
        Ok(())
    }

    async fn recent(&self, limit: usize) -> Result<Vec<ActivityLog>> {
        let entries = self.entries.read().await;
        Ok(entries.iter().rev().take(limit).cloned().collect())
    }
}
