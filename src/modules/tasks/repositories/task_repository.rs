use std::cmp::Ordering;
use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::{FromRow, MySqlPool};
use tokio::sync::RwLock;

use crate::core::{AppError, Result};
use crate::modules::tasks::models::{Task, TaskPriority, TaskStatus};

/// Storage for tasks
#[async_trait]
pub trait TaskRepository: Send + Sync {
    async fn create(&self, task: &Task) -> Result<Task>;

    async fn find_by_id(&self, id: &str) -> Result<Option<Task>>;

    /// Earliest due date first; undated tasks last
    async fn list(&self, status: Option<TaskStatus>) -> Result<Vec<Task>>;

    async fn update(&self, task: &Task) -> Result<Task>;

    /// Returns false if nothing matched
    async fn delete(&self, id: &str) -> Result<bool>;
}

/// MySQL-backed task repository
pub struct MySqlTaskRepository {
    pool: MySqlPool,
}

impl MySqlTaskRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

const TASK_COLUMNS: &str = "id, title, description, due_date, priority, status, lead_id, \
                            client_id, created_at, updated_at";

const TASK_ORDER: &str = "ORDER BY due_date IS NULL, due_date ASC, created_at DESC";

#[derive(Debug, FromRow)]
struct TaskRow {
    id: String,
    title: String,
    description: Option<String>,
    due_date: Option<NaiveDate>,
    priority: String,
    status: String,
    lead_id: Option<String>,
    client_id: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<TaskRow> for Task {
    type Error = AppError;

    fn try_from(row: TaskRow) -> Result<Self> {
        Ok(Task {
            id: row.id,
            title: row.title,
            description: row.description,
            due_date: row.due_date,
            priority: TaskPriority::parse(&row.priority)?,
            status: TaskStatus::parse(&row.status)?,
            lead_id: row.lead_id,
            client_id: row.client_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[async_trait]
impl TaskRepository for MySqlTaskRepository {
    async fn create(&self, task: &Task) -> Result<Task> {
        sqlx::query(
            r#"
            INSERT INTO tasks (
                id, title, description, due_date, priority, status, lead_id, client_id,
                created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&task.id)
        .bind(&task.title)
        .bind(&task.description)
        .bind(task.due_date)
        .bind(task.priority.as_str())
        .bind(task.status.as_str())
        .bind(&task.lead_id)
        .bind(&task.client_id)
        .bind(task.created_at)
        .bind(task.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to create task: {}", e)))?;

        Ok(task.clone())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Task>> {
        let sql = format!("SELECT {} FROM tasks WHERE id = ?", TASK_COLUMNS);
        let row = sqlx::query_as::<_, TaskRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to fetch task: {}", e)))?;

        row.map(Task::try_from).transpose()
    }

    async fn list(&self, status: Option<TaskStatus>) -> Result<Vec<Task>> {
        let rows = match status {
            Some(status) => {
                let sql = format!(
                    "SELECT {} FROM tasks WHERE status = ? {}",
                    TASK_COLUMNS, TASK_ORDER
                );
                sqlx::query_as::<_, TaskRow>(&sql)
                    .bind(status.as_str())
                    .fetch_all(&self.pool)
                    .await
            }
            None => {
                let sql = format!("SELECT {} FROM tasks {}", TASK_COLUMNS, TASK_ORDER);
                sqlx::query_as::<_, TaskRow>(&sql)
                    .fetch_all(&self.pool)
                    .await
            }
        }
        .map_err(|e| AppError::Internal(format!("Failed to list tasks: {}", e)))?;

        rows.into_iter().map(Task::try_from).collect()
    }

    async fn update(&self, task: &Task) -> Result<Task> {
        let result = sqlx::query(
            r#"
            UPDATE tasks
            SET title = ?, description = ?, due_date = ?, priority = ?, status = ?,
                updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&task.title)
        .bind(&task.description)
        .bind(task.due_date)
        .bind(task.priority.as_str())
        .bind(task.status.as_str())
        .bind(task.updated_at)
        .bind(&task.id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to update task: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Task not found"));
        }

        Ok(task.clone())
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::Internal(format!("Failed to delete task: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }
}

/// In-process task store for tests and `STORAGE=memory`
#[derive(Default)]
pub struct InMemoryTaskRepository {
    tasks: RwLock<HashMap<String, Task>>,
}

impl InMemoryTaskRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Same order as the MySQL query: dated before undated, then newest first
fn due_order(a: &Task, b: &Task) -> Ordering {
    match (a.due_date, b.due_date) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
    .then_with(|| b.created_at.cmp(&a.created_at))
    .then_with(|| a.title.cmp(&b.title))
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn create(&self, task: &Task) -> Result<Task> {
        let mut tasks = self.tasks.write().await;
        if tasks.contains_key(&task.id) {
            return Err(AppError::conflict(format!("Task '{}' already exists", task.id)));
        }
        tasks.insert(task.id.clone(), task.clone());
        Ok(task.clone())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Task>> {
        Ok(self.tasks.read().await.get(id).cloned())
    }

    async fn list(&self, status: Option<TaskStatus>) -> Result<Vec<Task>> {
        let mut tasks: Vec<Task> = self
            .tasks
            .read()
            .await
            .values()
            .filter(|task| status.map_or(true, |s| task.status == s))
            .cloned()
            .collect();

        tasks.sort_by(due_order);
        Ok(tasks)
    }

    async fn update(&self, task: &Task) -> Result<Task> {
        let mut tasks = self.tasks.write().await;
        let stored = tasks
            .get_mut(&task.id)
            .ok_or_else(|| AppError::not_found("Task not found"))?;
        *stored = task.clone();
        Ok(task.clone())
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        Ok(self.tasks.write().await.remove(id).is_some())
    }
}
