pub mod task_controller;

pub use task_controller::configure;
