use std::sync::Arc;

use actix_web::{web, HttpResponse};

use crate::core::AppError;
use crate::modules::tasks::models::{CreateTaskRequest, ListTasksQuery, UpdateTaskRequest};
use crate::modules::tasks::services::TaskService;

/// POST /tasks
pub async fn create_task(
    service: web::Data<Arc<TaskService>>,
    request: web::Json<CreateTaskRequest>,
) -> Result<HttpResponse, AppError> {
    let task = service.create_task(request.into_inner()).await?;

    Ok(HttpResponse::Created().json(task))
}

/// GET /tasks?status=
pub async fn list_tasks(
    service: web::Data<Arc<TaskService>>,
    query: web::Query<ListTasksQuery>,
) -> Result<HttpResponse, AppError> {
    let tasks = service.list_tasks(query.status).await?;

    Ok(HttpResponse::Ok().json(tasks))
}

/// GET /tasks/{id}
pub async fn get_task(
    service: web::Data<Arc<TaskService>>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let task = service.get_task(&path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(task))
}

/// PATCH /tasks/{id}
pub async fn update_task(
    service: web::Data<Arc<TaskService>>,
    path: web::Path<String>,
    request: web::Json<UpdateTaskRequest>,
) -> Result<HttpResponse, AppError> {
    let task = service
        .update_task(&path.into_inner(), request.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(task))
}

/// DELETE /tasks/{id}
pub async fn delete_task(
    service: web::Data<Arc<TaskService>>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    service.delete_task(&path.into_inner()).await?;

    Ok(HttpResponse::NoContent().finish())
}

/// Configure task routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/tasks")
            .route("", web::post().to(create_task))
            .route("", web::get().to(list_tasks))
            .route("/{id}", web::get().to(get_task))
            .route("/{id}", web::patch().to(update_task))
            .route("/{id}", web::delete().to(delete_task)),
    );
}
