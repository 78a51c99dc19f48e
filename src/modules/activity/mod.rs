// Activity log: an append-only feed of notable CRM events

pub mod controllers;
pub mod models;
pub mod repositories;

pub use models::{ActivityAction, ActivityLog};
pub use repositories::{ActivityRepository, InMemoryActivityRepository, MySqlActivityRepository};
