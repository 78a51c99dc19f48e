use crate::config::IssuerProfile;
use crate::core::Currency;
use crate::modules::clients::models::Client;
use crate::modules::invoices::models::Invoice;

pub const DOCUMENT_TITLE: &str = "PROFORMA INVOICE";

/// Column width the notes block is wrapped to
pub const NOTES_WRAP_WIDTH: usize = 60;

/// Header region: issuer identity plus invoice meta
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentHeader {
    pub business_name: String,
    pub title: String,
    pub contact_lines: Vec<String>,
    pub meta_lines: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BillTo {
    pub name: String,
    pub address: String,
    pub phone_line: String,
}

/// One row of the item table, already formatted for display
#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub index: usize,
    pub description: String,
    pub quantity: String,
    pub unit_price: String,
    pub line_total: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TotalsLine {
    pub label: String,
    pub value: String,
    pub emphasized: bool,
}

impl TotalsLine {
    fn plain(label: impl Into<String>, value: String) -> Self {
        Self {
            label: label.into(),
            value,
            emphasized: false,
        }
    }

    /// Rendered text, e.g. `Total: Rs. 2,850.00`
    pub fn text(&self) -> String {
        format!("{}: {}", self.label, self.value)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DocumentFooter {
    pub thank_you: String,
    pub contact_line: String,
    pub payment_terms: String,
    pub bank_lines: Vec<String>,
}

/// Printable layout of a single invoice.
///
/// Pure data: building it touches no I/O, so it can be inspected in tests
/// independently of the PDF backend.
#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceDocument {
    pub file_name: String,
    pub header: DocumentHeader,
    pub bill_to: BillTo,
    pub table_headings: [&'static str; 5],
    pub rows: Vec<TableRow>,
    pub totals: Vec<TotalsLine>,
    /// Wrapped notes; empty when the invoice has no notes
    pub notes: Vec<String>,
    pub footer: DocumentFooter,
}

impl InvoiceDocument {
    pub fn build(
        invoice: &Invoice,
        client: &Client,
        issuer: &IssuerProfile,
        currency: Currency,
    ) -> Self {
        let header = DocumentHeader {
            business_name: issuer.business_name.clone(),
            title: DOCUMENT_TITLE.to_string(),
            contact_lines: vec![
                format!("Company ID: {}", issuer.company_id),
                issuer.address.clone(),
                format!("Phone: {}", issuer.phone),
            ],
            meta_lines: vec![
                format!("Invoice No: {}", invoice.invoice_number),
                format!("Invoice Date: {}", invoice.invoice_date.format("%d-%m-%Y")),
                format!("Due Date: {}", invoice.due_date.format("%d-%m-%Y")),
            ],
        };

        let address = client
            .address
            .as_deref()
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .unwrap_or(&issuer.default_jurisdiction)
            .to_string();

        let bill_to = BillTo {
            name: client.name.clone(),
            address,
            phone_line: format!("Phone: {}", client.phone.as_deref().unwrap_or("")),
        };

        let rows = invoice
            .line_items
            .iter()
            .enumerate()
            .map(|(i, item)| TableRow {
                index: i + 1,
                description: item.description.clone(),
                quantity: item.quantity.to_string(),
                unit_price: currency.format_amount(item.unit_price),
                line_total: currency.format_amount(item.line_total()),
            })
            .collect();

        let t = &invoice.totals;
        let mut total_line = TotalsLine::plain("Total", currency.format_amount(t.total));
        total_line.emphasized = true;

        let totals = vec![
            TotalsLine::plain("Subtotal", currency.format_amount(t.subtotal)),
            TotalsLine::plain("Tax", currency.format_amount(t.tax_amount)),
            TotalsLine::plain("Discount", currency.format_amount(t.discount)),
            total_line,
        ];

        let notes = invoice
            .notes
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .map(|n| wrap_text(n, NOTES_WRAP_WIDTH))
            .unwrap_or_default();

        let bank = &issuer.bank;
        let footer = DocumentFooter {
            thank_you: issuer.thank_you.clone(),
            contact_line: issuer.contact_line.clone(),
            payment_terms: format!("Payment Terms: {}", issuer.payment_terms),
            bank_lines: vec![
                format!("Account Name: {}", bank.account_name),
                format!("Bank: {}", bank.bank_name),
                format!("Account No: {}", bank.account_number),
                format!("Branch: {}", bank.branch),
                format!("IFSC: {}", bank.ifsc),
            ],
        };

        Self {
            file_name: invoice.document_file_name(),
            header,
            bill_to,
            table_headings: ["#", "Description", "Qty", "Unit Price", "Amount"],
            rows,
            totals,
            notes,
            footer,
        }
    }

    /// The emphasised grand total line
    pub fn total_line(&self) -> Option<&TotalsLine> {
        self.totals.last()
    }
}

/// Greedy word wrap. Words longer than `width` are split hard.
/// Explicit line breaks in the input are preserved.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();

    for paragraph in text.lines() {
        let mut current = String::new();

        for word in paragraph.split_whitespace() {
            let mut word = word.to_string();

            while word.chars().count() > width {
                if !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                }
                let split_at = word
                    .char_indices()
                    .nth(width)
                    .map(|(idx, _)| idx)
                    .unwrap_or(word.len());
                let rest = word.split_off(split_at);
                lines.push(word);
                word = rest;
            }

            let needed = if current.is_empty() {
                word.chars().count()
            } else {
                current.chars().count() + 1 + word.chars().count()
            };

            if needed > width && !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(&word);
        }

        if !current.is_empty() {
            lines.push(current);
        }
    }

    lines
}
