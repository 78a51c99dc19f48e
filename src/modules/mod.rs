pub mod activity;
pub mod catalog;
pub mod clients;
pub mod health;
pub mod invoices;
pub mod leads;
pub mod reports;
pub mod tasks;
