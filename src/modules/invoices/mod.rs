// Invoices module

pub mod controllers;
pub mod document;
pub mod models;
pub mod repositories;
pub mod services;

pub use document::{InvoiceDocument, PdfRenderer, RenderedPdf};
pub use models::{Invoice, InvoiceStatus, InvoiceTotals, LineItem, TotalsRequest};
pub use repositories::{InMemoryInvoiceRepository, InvoiceRepository, MySqlInvoiceRepository};
pub use services::{InvoiceCalculator, InvoiceNumberGenerator, InvoiceService};
