use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, MySqlPool};
use tokio::sync::RwLock;

use crate::core::{AppError, Result};
use crate::modules::clients::models::Client;

/// Storage for client records
#[async_trait]
pub trait ClientRepository: Send + Sync {
    async fn create(&self, client: &Client) -> Result<Client>;

    async fn find_by_id(&self, id: &str) -> Result<Option<Client>>;

    async fn count(&self) -> Result<i64>;
}

/// MySQL-backed client repository
pub struct MySqlClientRepository {
    pool: MySqlPool,
}

impl MySqlClientRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ClientRow {
    id: String,
    lead_id: Option<String>,
    name: String,
    phone: Option<String>,
    address: Option<String>,
    email: Option<String>,
    billing_details: Option<String>,
    notes: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ClientRow> for Client {
    fn from(row: ClientRow) -> Self {
        Client {
            id: row.id,
            lead_id: row.lead_id,
            name: row.name,
            phone: row.phone,
            address: row.address,
            email: row.email,
            billing_details: row.billing_details,
            notes: row.notes,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[async_trait]
impl ClientRepository for MySqlClientRepository {
    async fn create(&self, client: &Client) -> Result<Client> {
        sqlx::query(
            r#"
            INSERT INTO clients (
                id, lead_id, name, phone, address, email, billing_details, notes,
                created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&client.id)
        .bind(&client.lead_id)
        .bind(&client.name)
        .bind(&client.phone)
        .bind(&client.address)
        .bind(&client.email)
        .bind(&client.billing_details)
        .bind(&client.notes)
        .bind(client.created_at)
        .bind(client.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to create client: {}", e)))?;

        Ok(client.clone())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Client>> {
        let row = sqlx::query_as::<_, ClientRow>(
            r#"
            SELECT id, lead_id, name, phone, address, email, billing_details, notes,
                   created_at, updated_at
            FROM clients
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to fetch client: {}", e)))?;

        Ok(row.map(Client::from))
    }

    async fn count(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM clients")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to count clients: {}", e)))?;

        Ok(count)
    }
}

/// In-process client store for tests and `STORAGE=memory`
#[derive(Default)]
pub struct InMemoryClientRepository {
    clients: RwLock<HashMap<String, Client>>,
}

impl InMemoryClientRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ClientRepository for InMemoryClientRepository {
    async fn create(&self, client: &Client) -> Result<Client> {
        let mut clients = self.clients.write().await;
        if clients.contains_key(&client.id) {
            return Err(AppError::conflict(format!(
                "Client '{}' already exists",
                client.id
            )));
        }
        clients.insert(client.id.clone(), client.clone());
        Ok(client.clone())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Client>> {
        Ok(self.clients.read().await.get(id).cloned())
    }

    async fn count(&self) -> Result<i64> {
        Ok(self.clients.read().await.len() as i64)
    }
}
