pub mod layout;
pub mod pdf;

pub use layout::{
    wrap_text, BillTo, DocumentFooter, DocumentHeader, InvoiceDocument, TableRow, TotalsLine,
    DOCUMENT_TITLE, NOTES_WRAP_WIDTH,
};
pub use pdf::{DocumentRenderer, PdfRenderer, RenderedPdf};
