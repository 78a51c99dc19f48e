use std::sync::Arc;

use tracing::info;

use crate::core::{AppError, Clock, Result};
use crate::modules::clients::models::{Client, CreateClientRequest};
use crate::modules::clients::repositories::ClientRepository;

/// Service for client records
pub struct ClientService {
    client_repo: Arc<dyn ClientRepository>,
    clock: Arc<dyn Clock>,
}

impl ClientService {
    pub fn new(client_repo: Arc<dyn ClientRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { client_repo, clock }
    }

    /// Validate and store a new client
    pub async fn create_client(&self, request: CreateClientRequest) -> Result<Client> {
        let client = Client::new(request, self.clock.now())?;
        let created = self.client_repo.create(&client).await?;

        info!(client_id = %created.id, name = %created.name, "Client created");

        Ok(created)
    }

    pub async fn get_client(&self, id: &str) -> Result<Client> {
        self.client_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Client not found"))
    }
}
