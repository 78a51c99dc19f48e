use std::sync::Arc;

use tracing::info;

use crate::core::{AppError, Clock, Result};
use crate::modules::catalog::models::{
    CreateServiceRequest, ServiceOffering, UpdateServiceRequest,
};
use crate::modules::catalog::repositories::ServiceRepository;

/// Maintains the service catalog
pub struct CatalogService {
    service_repo: Arc<dyn ServiceRepository>,
    clock: Arc<dyn Clock>,
}

impl CatalogService {
    pub fn new(service_repo: Arc<dyn ServiceRepository>, clock: Arc<dyn Clock>) -> Self {
        Self {
            service_repo,
            clock,
        }
    }

    pub async fn create_service(&self, request: CreateServiceRequest) -> Result<ServiceOffering> {
        let service = ServiceOffering::new(request, self.clock.now())?;
        let created = self.service_repo.create(&service).await?;

        info!(service_id = %created.id, name = %created.name, "Service created");

        Ok(created)
    }

    pub async fn get_service(&self, id: &str) -> Result<ServiceOffering> {
        self.service_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Service not found"))
    }

    /// Catalog listing. The active-only view is what the invoice form offers,
    /// so it is sorted by name; otherwise newest first.
    pub async fn list_services(
        &self,
        active: Option<bool>,
        search: Option<&str>,
    ) -> Result<Vec<ServiceOffering>> {
        let mut services = self.service_repo.list(active).await?;

        if let Some(term) = search {
            services.retain(|service| service.matches(term));
        }
        if active == Some(true) {
            services.sort_by_key(|service| service.name.to_lowercase());
        }

        Ok(services)
    }

    pub async fn update_service(
        &self,
        id: &str,
        request: UpdateServiceRequest,
    ) -> Result<ServiceOffering> {
        let mut service = self.get_service(id).await?;
        service.apply(request, self.clock.now())?;
        let updated = self.service_repo.update(&service).await?;

        info!(
            service_id = %updated.id,
            is_active = updated.is_active,
            "Service updated"
        );

        Ok(updated)
    }
}
