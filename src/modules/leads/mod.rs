// Leads module: spreadsheet import, lead upkeep and conversion into clients

pub mod controllers;
pub mod models;
pub mod repositories;
pub mod services;

pub use models::{ConvertLeadRequest, CreateLeadRequest, ImportedLead, Lead, LeadSource, LeadStatus};
pub use repositories::{InMemoryLeadRepository, LeadRepository, MySqlLeadRepository};
pub use services::{HttpSheetSource, LeadService, LeadSheetSource, StaticSheetSource};
