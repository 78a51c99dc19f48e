// Invoice document layout and PDF rendering

use chrono::{NaiveDate, TimeZone, Utc};
use ledgerline::clients::{Client, CreateClientRequest};
use ledgerline::config::IssuerProfile;
use ledgerline::core::Currency;
use ledgerline::invoices::document::{
    DocumentRenderer, InvoiceDocument, PdfRenderer, DOCUMENT_TITLE, NOTES_WRAP_WIDTH,
};
use ledgerline::invoices::models::{Invoice, LineItem, TotalsRequest};
use ledgerline::invoices::InvoiceCalculator;
use rust_decimal_macros::dec;

fn client(address: Option<&str>, phone: Option<&str>) -> Client {
    let request = CreateClientRequest {
        name: "Sharma Traders".to_string(),
        phone: phone.map(str::to_string),
        address: address.map(str::to_string),
        ..Default::default()
    };
    Client::new(request, Utc::now()).unwrap()
}

fn license_invoice(notes: Option<&str>) -> Invoice {
    let items = vec![
        LineItem::new("Pro License", 2, dec!(500.00)).unwrap(),
        LineItem::new("Setup Fee", 1, dec!(1500.00)).unwrap(),
    ];
    let request = TotalsRequest::new(items, dec!(18), dec!(100)).unwrap();
    let totals = InvoiceCalculator::new().compute_totals(&request).unwrap();
    let now = Utc.with_ymd_and_hms(2024, 6, 10, 9, 30, 0).unwrap();

    Invoice::new(
        "INV-00123456".to_string(),
        "client-1".to_string(),
        NaiveDate::from_ymd_opt(2024, 6, 10).unwrap(),
        NaiveDate::from_ymd_opt(2024, 6, 25).unwrap(),
        totals,
        request.items,
        notes.map(str::to_string),
        now,
    )
    .unwrap()
}

#[test]
fn test_rows_follow_input_order_and_total_is_last() {
    let invoice = license_invoice(None);
    let document = InvoiceDocument::build(
        &invoice,
        &client(Some("MG Road, Bangalore"), Some("9845012345")),
        &IssuerProfile::default(),
        Currency::INR,
    );

    assert_eq!(document.rows.len(), 2);
    assert_eq!(document.rows[0].index, 1);
    assert_eq!(document.rows[0].description, "Pro License");
    assert_eq!(document.rows[0].line_total, "Rs. 1,000.00");
    assert_eq!(document.rows[1].description, "Setup Fee");

    let total = document.total_line().unwrap();
    assert!(total.emphasized);
    assert_eq!(total.value, Currency::INR.format_amount(invoice.totals.total));
    assert_eq!(total.text(), "Total: Rs. 2,850.00");

    let labels: Vec<&str> = document.totals.iter().map(|l| l.label.as_str()).collect();
    assert_eq!(labels, ["Subtotal", "Tax", "Discount", "Total"]);
}

#[test]
fn test_header_and_footer_come_from_issuer() {
    let issuer = IssuerProfile {
        business_name: "Acme Studio".to_string(),
        ..IssuerProfile::default()
    };
    let document = InvoiceDocument::build(
        &license_invoice(None),
        &client(None, None),
        &issuer,
        Currency::INR,
    );

    assert_eq!(document.header.business_name, "Acme Studio");
    assert_eq!(document.header.title, DOCUMENT_TITLE);
    assert!(document
        .header
        .meta_lines
        .iter()
        .any(|l| l.contains("INV-00123456")));
    assert_eq!(document.footer.bank_lines.len(), 5);
    assert!(document.footer.bank_lines[4].contains("ICIC000109"));
    assert_eq!(document.file_name, "Invoice_INV-00123456.pdf");
}

#[test]
fn test_bill_to_falls_back_to_jurisdiction() {
    let document = InvoiceDocument::build(
        &license_invoice(None),
        &client(None, None),
        &IssuerProfile::default(),
        Currency::INR,
    );

    assert_eq!(document.bill_to.name, "Sharma Traders");
    assert_eq!(document.bill_to.address, "India");
    assert_eq!(document.bill_to.phone_line, "Phone: ");
}

#[test]
fn test_notes_are_wrapped_and_optional() {
    let long_note = "Payment via bank transfer only. Please quote the invoice number \
                     in the transfer reference so that we can reconcile it quickly.";

    let with_notes = InvoiceDocument::build(
        &license_invoice(Some(long_note)),
        &client(None, None),
        &IssuerProfile::default(),
        Currency::INR,
    );
    assert!(with_notes.notes.len() >= 2);
    assert!(with_notes
        .notes
        .iter()
        .all(|l| l.chars().count() <= NOTES_WRAP_WIDTH));

    let without_notes = InvoiceDocument::build(
        &license_invoice(Some("   ")),
        &client(None, None),
        &IssuerProfile::default(),
        Currency::INR,
    );
    assert!(without_notes.notes.is_empty());
}

#[test]
fn test_pdf_render_produces_document_bytes() {
    let document = InvoiceDocument::build(
        &license_invoice(Some("Thanks for choosing us")),
        &client(Some("Jayanagar, Bangalore"), Some("9845012345")),
        &IssuerProfile::default(),
        Currency::INR,
    );

    let rendered = PdfRenderer::new().render(&document).unwrap();

    assert_eq!(rendered.file_name, "Invoice_INV-00123456.pdf");
    assert!(rendered.bytes.starts_with(b"%PDF"));
}

#[test]
fn test_pdf_render_handles_many_rows() {
    let mut invoice = license_invoice(None);
    invoice.line_items = (1..=80)
        .map(|i| LineItem::new(format!("Service hour {}", i), 1, dec!(1200)).unwrap())
        .collect();

    let document = InvoiceDocument::build(
        &invoice,
        &client(None, None),
        &IssuerProfile::default(),
        Currency::INR,
    );
    let rendered = PdfRenderer::new().render(&document).unwrap();

    assert_eq!(document.rows.len(), 80);
    assert!(!rendered.bytes.is_empty());
}
