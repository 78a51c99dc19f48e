use std::sync::Arc;

use actix_web::{web, HttpResponse};

use crate::core::AppError;
use crate::modules::leads::models::{
    ConvertLeadRequest, CreateLeadRequest, ListLeadsQuery, UpdateLeadStatusRequest,
};
use crate::modules::leads::services::LeadService;

/// Import leads from the spreadsheet
/// POST /leads/sync
pub async fn sync_leads(service: web::Data<Arc<LeadService>>) -> Result<HttpResponse, AppError> {
    let response = service.sync_from_sheet().await?;

    Ok(HttpResponse::Ok().json(response))
}

/// Turn a lead into a client
/// POST /leads/convert
pub async fn convert_lead(
    service: web::Data<Arc<LeadService>>,
    request: web::Json<ConvertLeadRequest>,
) -> Result<HttpResponse, AppError> {
    let client = service.convert_to_client(request.into_inner()).await?;

    Ok(HttpResponse::Created().json(client))
}

/// POST /leads
pub async fn create_lead(
    service: web::Data<Arc<LeadService>>,
    request: web::Json<CreateLeadRequest>,
) -> Result<HttpResponse, AppError> {
    let lead = service.create_lead(request.into_inner()).await?;

    Ok(HttpResponse::Created().json(lead))
}

/// GET /leads?status=
pub async fn list_leads(
    service: web::Data<Arc<LeadService>>,
    query: web::Query<ListLeadsQuery>,
) -> Result<HttpResponse, AppError> {
    let leads = service.list_leads(query.status).await?;

    Ok(HttpResponse::Ok().json(leads))
}

/// GET /leads/{id}
pub async fn get_lead(
    service: web::Data<Arc<LeadService>>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let lead = service.get_lead(&path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(lead))
}

/// PATCH /leads/{id}/status
pub async fn update_lead_status(
    service: web::Data<Arc<LeadService>>,
    path: web::Path<String>,
    request: web::Json<UpdateLeadStatusRequest>,
) -> Result<HttpResponse, AppError> {
    let lead = service
        .update_status(&path.into_inner(), request.status)
        .await?;

    Ok(HttpResponse::Ok().json(lead))
}

/// DELETE /leads/{id}
pub async fn delete_lead(
    service: web::Data<Arc<LeadService>>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    service.delete_lead(&path.into_inner()).await?;

    Ok(HttpResponse::NoContent().finish())
}

/// Configure lead routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/leads")
            .route("", web::post().to(create_lead))
            .route("", web::get().to(list_leads))
            .route("/sync", web::post().to(sync_leads))
            .route("/convert", web::post().to(convert_lead))
            .route("/{id}", web::get().to(get_lead))
            .route("/{id}", web::delete().to(delete_lead))
            .route("/{id}/status", web::patch().to(update_lead_status)),
    );
}
