pub mod in_memory;
pub mod invoice_repository;

pub use in_memory::InMemoryInvoiceRepository;
pub use invoice_repository::{InvoiceRepository, MySqlInvoiceRepository, StatusAggregate};
