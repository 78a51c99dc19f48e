use std::sync::Arc;

use actix_web::{web, HttpResponse};

use crate::core::AppError;
use crate::modules::catalog::models::{
    CreateServiceRequest, ListServicesQuery, UpdateServiceRequest,
};
use crate::modules::catalog::services::CatalogService;

/// POST /services
pub async fn create_service(
    service: web::Data<Arc<CatalogService>>,
    request: web::Json<CreateServiceRequest>,
) -> Result<HttpResponse, AppError> {
    let created = service.create_service(request.into_inner()).await?;

    Ok(HttpResponse::Created().json(created))
}

/// GET /services?active=&search=
pub async fn list_services(
    service: web::Data<Arc<CatalogService>>,
    query: web::Query<ListServicesQuery>,
) -> Result<HttpResponse, AppError> {
    let services = service
        .list_services(query.active, query.search.as_deref())
        .await?;

    Ok(HttpResponse::Ok().json(services))
}

/// GET /services/{id}
pub async fn get_service(
    service: web::Data<Arc<CatalogService>>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let found = service.get_service(&path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(found))
}

/// PUT /services/{id}
pub async fn update_service(
    service: web::Data<Arc<CatalogService>>,
    path: web::Path<String>,
    request: web::Json<UpdateServiceRequest>,
) -> Result<HttpResponse, AppError> {
    let updated = service
        .update_service(&path.into_inner(), request.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(updated))
}

/// Configure service catalog routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/services")
            .route("", web::post().to(create_service))
            .route("", web::get().to(list_services))
            .route("/{id}", web::get().to(get_service))
            .route("/{id}", web::put().to(update_service)),
    );
}
