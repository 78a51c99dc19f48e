pub mod calculator;
pub mod invoice_service;
pub mod number_generator;

pub use calculator::InvoiceCalculator;
pub use invoice_service::InvoiceService;
pub use number_generator::{is_valid_invoice_number, InvoiceNumberGenerator};
