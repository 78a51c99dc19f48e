// Service catalog: billable offerings that prefill invoice rows

pub mod controllers;
pub mod models;
pub mod repositories;
pub mod services;

pub use models::{CreateServiceRequest, ServiceOffering, UpdateServiceRequest};
pub use repositories::{InMemoryServiceRepository, MySqlServiceRepository, ServiceRepository};
pub use services::CatalogService;
