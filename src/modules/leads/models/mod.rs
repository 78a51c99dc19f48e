pub mod lead;

pub use lead::{
    ConvertLeadRequest, CreateLeadRequest, ImportedLead, Lead, LeadSource, LeadStatus,
    LeadSyncResponse, ListLeadsQuery, UpdateLeadStatusRequest,
};
