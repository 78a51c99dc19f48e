use std::sync::Arc;

use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::core::AppError;
use crate::modules::activity::models::ActivityResponse;
use crate::modules::activity::repositories::ActivityRepository;

const MAX_LIMIT: usize = 100;

/// Query parameters for the activity feed
#[derive(Debug, Deserialize)]
pub struct RecentActivityQuery {
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_limit() -> usize {
    10
}

/// Recent activity, newest first
/// GET /activity
pub async fn recent_activity(
    repo: web::Data<Arc<dyn ActivityRepository>>,
    query: web::Query<RecentActivityQuery>,
) -> Result<HttpResponse, AppError> {
    let limit = query.limit.clamp(1, MAX_LIMIT);
    let entries = repo.recent(limit).await?;

    let response: Vec<ActivityResponse> = entries.into_iter().map(ActivityResponse::from).collect();
    Ok(HttpResponse::Ok().json(response))
}

/// Configure activity routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/activity", web::get().to(recent_activity));
}
