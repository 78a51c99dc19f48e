use std::sync::Arc;

use actix_web::http::header::{ContentDisposition, DispositionParam, DispositionType};
use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::core::AppError;
use crate::modules::invoices::models::{
    CreateInvoiceRequest, InvoiceStatus, RawTotalsInput, UpdateStatusRequest,
};
use crate::modules::invoices::services::InvoiceService;

/// Query parameters for listing invoices
#[derive(Debug, Deserialize)]
pub struct ListInvoicesQuery {
    pub status: Option<InvoiceStatus>,
    pub search: Option<String>,
}

/// Live totals for the invoice form
/// POST /invoices/preview
pub async fn preview_totals(
    service: web::Data<Arc<InvoiceService>>,
    request: web::Json<RawTotalsInput>,
) -> Result<HttpResponse, AppError> {
    let totals = service.preview_totals(request.into_inner()).await?;

    Ok(HttpResponse::Ok().json(totals))
}

/// Create a new invoice
/// POST /invoices
pub async fn create_invoice(
    service: web::Data<Arc<InvoiceService>>,
    request: web::Json<CreateInvoiceRequest>,
) -> Result<HttpResponse, AppError> {
    let invoice = service.create_invoice(request.into_inner()).await?;

    Ok(HttpResponse::Created().json(invoice))
}

/// List invoices
/// GET /invoices
pub async fn list_invoices(
    service: web::Data<Arc<InvoiceService>>,
    query: web::Query<ListInvoicesQuery>,
) -> Result<HttpResponse, AppError> {
    let invoices = service
        .list_invoices(query.status, query.search.as_deref())
        .await?;

    Ok(HttpResponse::Ok().json(invoices))
}

/// Get invoice by ID
/// GET /invoices/{id}
pub async fn get_invoice(
    service: web::Data<Arc<InvoiceService>>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let invoice = service.get_invoice(&path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(invoice))
}

/// PATCH /invoices/{id}/status
pub async fn update_status(
    service: web::Data<Arc<InvoiceService>>,
    path: web::Path<String>,
    request: web::Json<UpdateStatusRequest>,
) -> Result<HttpResponse, AppError> {
    let invoice = service
        .update_status(&path.into_inner(), request.status)
        .await?;

    Ok(HttpResponse::Ok().json(invoice))
}

/// DELETE /invoices/{id}
pub async fn delete_invoice(
    service: web::Data<Arc<InvoiceService>>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    service.delete_invoice(&path.into_inner()).await?;

    Ok(HttpResponse::NoContent().finish())
}

/// Download the invoice as a PDF attachment
/// GET /invoices/{id}/pdf
pub async fn download_pdf(
    service: web::Data<Arc<InvoiceService>>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let rendered = service.render_invoice(&path.into_inner()).await?;

    Ok(HttpResponse::Ok()
        .content_type("application/pdf")
        .insert_header(ContentDisposition {
            disposition: DispositionType::Attachment,
            parameters: vec![DispositionParam::Filename(rendered.file_name)],
        })
        .body(rendered.bytes))
}

/// Configure invoice routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/invoices")
            .route("", web::post().to(create_invoice))
            .route("", web::get().to(list_invoices))
            .route("/preview", web::post().to(preview_totals))
            .route("/{id}", web::get().to(get_invoice))
            .route("/{id}", web::delete().to(delete_invoice))
            .route("/{id}/status", web::patch().to(update_status))
            .route("/{id}/pdf", web::get().to(download_pdf)),
    );
}
