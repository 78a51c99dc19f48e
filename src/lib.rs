//! Ledgerline CRM invoicing library
//!
//! Invoice totals, invoice PDF documents, lead import, the service catalog,
//! follow-up tasks and the HTTP API around them.

pub mod app;
pub mod config;
pub mod core;
pub mod middleware;
pub mod modules;

// Re-export commonly used types
pub use app::{AppDependencies, AppServices, Repositories};
pub use modules::catalog;
pub use modules::clients;
pub use modules::invoices;
pub use modules::leads;
pub use modules::tasks;
