use std::sync::Arc;

use actix_web::{web, HttpResponse};

use crate::core::AppError;
use crate::modules::clients::models::CreateClientRequest;
use crate::modules::clients::services::ClientService;

/// Create a client
/// POST /clients
pub async fn create_client(
    service: web::Data<Arc<ClientService>>,
    request: web::Json<CreateClientRequest>,
) -> Result<HttpResponse, AppError> {
    let client = service.create_client(request.into_inner()).await?;

    Ok(HttpResponse::Created().json(client))
}

/// Get client by ID
/// GET /clients/{id}
pub async fn get_client(
    service: web::Data<Arc<ClientService>>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let client = service.get_client(&path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(client))
}

/// Configure client routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/clients")
            .route("", web::post().to(create_client))
            .route("/{id}", web::get().to(get_client)),
    );
}
