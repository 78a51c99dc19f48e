pub mod task;

pub use task::{
    CreateTaskRequest, ListTasksQuery, Task, TaskPriority, TaskResponse, TaskStatus,
    UpdateTaskRequest,
};
