// Follow-up tasks, optionally tied to a lead or a client

pub mod controllers;
pub mod models;
pub mod repositories;
pub mod services;

pub use models::{CreateTaskRequest, Task, TaskPriority, TaskStatus, UpdateTaskRequest};
pub use repositories::{InMemoryTaskRepository, MySqlTaskRepository, TaskRepository};
pub use services::TaskService;
