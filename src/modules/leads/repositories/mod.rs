pub mod lead_repository;

pub use lead_repository::{InMemoryLeadRepository, LeadRepository, MySqlLeadRepository};
