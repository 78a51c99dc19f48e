pub mod activity_repository;

pub use activity_repository::{
    record_activity, ActivityRepository, InMemoryActivityRepository, MySqlActivityRepository,
};
