pub mod service_offering;

pub use service_offering::{
    CreateServiceRequest, ListServicesQuery, ServiceOffering, UpdateServiceRequest,
};
