use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, MySqlPool};
use tokio::sync::RwLock;

use crate::core::{AppError, Result};
use crate::modules::catalog::models::ServiceOffering;

/// Storage for the service catalog
#[async_trait]
pub trait ServiceRepository: Send + Sync {
    async fn create(&self, service: &ServiceOffering) -> Result<ServiceOffering>;

    async fn find_by_id(&self, id: &str) -> Result<Option<ServiceOffering>>;

    /// Newest first, optionally restricted by the active flag
    async fn list(&self, active: Option<bool>) -> Result<Vec<ServiceOffering>>;

    /// Overwrite every editable field. Returns `AppError::NotFound` if the id is unknown.
    async fn update(&self, service: &ServiceOffering) -> Result<ServiceOffering>;
}

/// MySQL-backed service catalog
pub struct MySqlServiceRepository {
    pool: MySqlPool,
}

impl MySqlServiceRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

const SERVICE_COLUMNS: &str =
    "id, name, description, base_price, is_active, created_at, updated_at";

#[derive(Debug, FromRow)]
struct ServiceRow {
    id: String,
    name: String,
    description: Option<String>,
    base_price: Decimal,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ServiceRow> for ServiceOffering {
    fn from(row: ServiceRow) -> Self {
        ServiceOffering {
            id: row.id,
            name: row.name,
            description: row.description,
            base_price: row.base_price,
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl ServiceRepository for MySqlServiceRepository {
    async fn create(&self, service: &ServiceOffering) -> Result<ServiceOffering> {
        sqlx::query(
            r#"
            INSERT INTO services (
                id, name, description, base_price, is_active, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&service.id)
        .bind(&service.name)
        .bind(&service.description)
        .bind(service.base_price)
        .bind(service.is_active)
        .bind(service.created_at)
        .bind(service.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to create service: {}", e)))?;

        Ok(service.clone())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<ServiceOffering>> {
        let sql = format!("SELECT {} FROM services WHERE id = ?", SERVICE_COLUMNS);
        let row = sqlx::query_as::<_, ServiceRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to fetch service: {}", e)))?;

        Ok(row.map(ServiceOffering::from))
    }

    async fn list(&self, active: Option<bool>) -> Result<Vec<ServiceOffering>> {
        let rows = match active {
            Some(active) => {
                let sql = format!(
                    "SELECT {} FROM services WHERE is_active = ? ORDER BY created_at DESC",
                    SERVICE_COLUMNS
                );
                sqlx::query_as::<_, ServiceRow>(&sql)
                    .bind(active)
                    .fetch_all(&self.pool)
                    .await
            }
            None => {
                let sql = format!(
                    "SELECT {} FROM services ORDER BY created_at DESC",
                    SERVICE_COLUMNS
                );
                sqlx::query_as::<_, ServiceRow>(&sql)
                    .fetch_all(&self.pool)
                    .await
            }
        }
        .map_err(|e| AppError::Internal(format!("Failed to list services: {}", e)))?;

        Ok(rows.into_iter().map(ServiceOffering::from).collect())
    }

    async fn update(&self, service: &ServiceOffering) -> Result<ServiceOffering> {
        let result = sqlx::query(
            r#"
            UPDATE services
            SET name = ?, description = ?, base_price = ?, is_active = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&service.name)
        .bind(&service.description)
        .bind(service.base_price)
        .bind(service.is_active)
        .bind(service.updated_at)
        .bind(&service.id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to update service: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Service not found"));
        }

        Ok(service.clone())
    }
}

/// In-process service catalog for tests and `STORAGE=memory`
#[derive(Default)]
pub struct InMemoryServiceRepository {
    services: RwLock<HashMap<String, ServiceOffering>>,
}

impl InMemoryServiceRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ServiceRepository for InMemoryServiceRepository {
    async fn create(&self, service: &ServiceOffering) -> Result<ServiceOffering> {
        let mut services = self.services.write().await;
        if services.contains_key(&service.id) {
            return Err(AppError::conflict(format!(
                "Service '{}' already exists",
                service.id
            )));
        }
        services.insert(service.id.clone(), service.clone());
        Ok(service.clone())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<ServiceOffering>> {
        Ok(self.services.read().await.get(id).cloned())
    }

    async fn list(&self, active: Option<bool>) -> Result<Vec<ServiceOffering>> {
        let mut services: Vec<ServiceOffering> = self
            .services
            .read()
            .await
            .values()
            .filter(|service| active.map_or(true, |a| service.is_active == a))
            .cloned()
            .collect();

        services.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| a.name.cmp(&b.name))
        });
        Ok(services)
    }

    async fn update(&self, service: &ServiceOffering) -> Result<ServiceOffering> {
        let mut services = self.services.write().await;
        let stored = services
            .get_mut(&service.id)
            .ok_or_else(|| AppError::not_found("Service not found"))?;
        *stored = service.clone();
        Ok(service.clone())
    }
}
