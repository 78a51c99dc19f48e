pub mod lead_service;
pub mod sheet_parser;
pub mod sheet_source;

pub use lead_service::LeadService;
pub use sheet_parser::parse_lead_rows;
pub use sheet_source::{HttpSheetSource, LeadSheetSource, StaticSheetSource};
