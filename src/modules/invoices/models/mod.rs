mod invoice;
mod line_item;
mod totals;

pub use invoice::{
    CreateInvoiceRequest, Invoice, InvoiceResponse, InvoiceStatus, LineItemResponse,
    UpdateStatusRequest,
};
pub use line_item::{LineItem, RawLineItem};
pub use totals::{InvoiceTotals, RawTotalsInput, TotalsRequest, TotalsResponse};
