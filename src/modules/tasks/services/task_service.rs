use std::sync::Arc;

use tracing::info;

use crate::core::{AppError, Clock, Result};
use crate::modules::clients::repositories::ClientRepository;
use crate::modules::leads::repositories::LeadRepository;
use crate::modules::tasks::models::{
    CreateTaskRequest, Task, TaskResponse, TaskStatus, UpdateTaskRequest,
};
use crate::modules::tasks::repositories::TaskRepository;

/// Task board operations
pub struct TaskService {
    task_repo: Arc<dyn TaskRepository>,
    lead_repo: Arc<dyn LeadRepository>,
    client_repo: Arc<dyn ClientRepository>,
    clock: Arc<dyn Clock>,
}

impl TaskService {
    pub fn new(
        task_repo: Arc<dyn TaskRepository>,
        lead_repo: Arc<dyn LeadRepository>,
        client_repo: Arc<dyn ClientRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            task_repo,
            lead_repo,
            client_repo,
            clock,
        }
    }

    /// Store a new pending task. Linked leads and clients must exist.
    pub async fn create_task(&self, request: CreateTaskRequest) -> Result<TaskResponse> {
        let task = Task::new(request, self.clock.now())?;

        if let Some(lead_id) = &task.lead_id {
            if self.lead_repo.find_by_id(lead_id).await?.is_none() {
                return Err(AppError::not_found("Lead not found"));
            }
        }
        if let Some(client_id) = &task.client_id {
            if self.client_repo.find_by_id(client_id).await?.is_none() {
                return Err(AppError::not_found("Client not found"));
            }
        }

        let created = self.task_repo.create(&task).await?;

        info!(task_id = %created.id, priority = created.priority.as_str(), "Task created");

        Ok(self.respond(created))
    }

    pub async fn get_task(&self, id: &str) -> Result<TaskResponse> {
        self.find(id).await.map(|task| self.respond(task))
    }

    pub async fn list_tasks(&self, status: Option<TaskStatus>) -> Result<Vec<TaskResponse>> {
        let tasks = self.task_repo.list(status).await?;
        Ok(tasks.into_iter().map(|task| self.respond(task)).collect())
    }

    pub async fn update_task(&self, id: &str, request: UpdateTaskRequest) -> Result<TaskResponse> {
        let mut task = self.find(id).await?;
        task.apply(request, self.clock.now())?;
        let updated = self.task_repo.update(&task).await?;

        info!(task_id = %updated.id, status = updated.status.as_str(), "Task updated");

        Ok(self.respond(updated))
    }

    pub async fn delete_task(&self, id: &str) -> Result<()> {
        if !self.task_repo.delete(id).await? {
            return Err(AppError::not_found("Task not found"));
        }

        info!(task_id = %id, "Task deleted");

        Ok(())
    }

    async fn find(&self, id: &str) -> Result<Task> {
        self.task_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Task not found"))
    }

    fn respond(&self, task: Task) -> TaskResponse {
        TaskResponse::new(task, self.clock.today())
    }
}
