use std::sync::Arc;

use actix_web::{web, HttpResponse};

use crate::core::AppError;
use crate::modules::reports::services::ReportService;

/// Dashboard summary
/// GET /reports/summary
pub async fn get_summary(
    service: web::Data<Arc<ReportService>>,
) -> Result<HttpResponse, AppError> {
    let summary = service.dashboard_summary().await?;

    Ok(HttpResponse::Ok().json(summary))
}

/// Configure report routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/reports").route("/summary", web::get().to(get_summary)));
}
