use actix_web::{
    error::{JsonPayloadError, PathError, QueryPayloadError},
    web, HttpRequest,
};

use crate::core::AppError;

/// Malformed request bodies get the same JSON error shape as service errors
pub fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    log_rejection(req, &err.to_string());
    AppError::validation(format!("Invalid request body: {}", err)).into()
}

pub fn query_error_handler(err: QueryPayloadError, req: &HttpRequest) -> actix_web::Error {
    log_rejection(req, &err.to_string());
    AppError::validation(format!("Invalid query string: {}", err)).into()
}

pub fn path_error_handler(err: PathError, req: &HttpRequest) -> actix_web::Error {
    log_rejection(req, &err.to_string());
    AppError::validation(format!("Invalid path: {}", err)).into()
}

fn log_rejection(req: &HttpRequest, reason: &str) {
    tracing::warn!(
        method = %req.method(),
        path = %req.path(),
        reason,
        "Request rejected"
    );
}

/// Extractor configs wiring the handlers above into an app
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::QueryConfig::default().error_handler(query_error_handler))
        .app_data(web::PathConfig::default().error_handler(path_error_handler));
}
