// End-to-end invoice lifecycle over HTTP: preview, create, list, status,
// PDF download, delete

#[path = "../helpers/mod.rs"]
mod helpers;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use actix_web::{http::StatusCode, test, App};
use helpers::{license_invoice_body, seed_client, test_dependencies, test_services};
use ledgerline::core::error::RENDER_FAILURE_MESSAGE;
use ledgerline::core::{AppError, Result};
use ledgerline::invoices::document::{
    DocumentRenderer, InvoiceDocument, PdfRenderer, RenderedPdf,
};
use ledgerline::invoices::services::is_valid_invoice_number;
use ledgerline::AppServices;
use serde_json::{json, Value};

/// Fails the first render, then behaves like the real renderer
struct FailOnceRenderer {
    failed: AtomicBool,
    inner: PdfRenderer,
}

impl DocumentRenderer for FailOnceRenderer {
    fn render(&self, document: &InvoiceDocument) -> Result<RenderedPdf> {
        if !self.failed.swap(true, Ordering::SeqCst) {
            return Err(AppError::rendering("font table missing"));
        }
        self.inner.render(document)
    }
}

#[actix_web::test]
async fn test_preview_matches_created_invoice() {
    let services = test_services("");
    let client = seed_client(&services, "Sharma Traders").await;
    let app = test::init_service(App::new().configure(|cfg| services.configure(cfg))).await;

    let body = license_invoice_body(&client.id);

    let req = test::TestRequest::post()
        .uri("/invoices/preview")
        .set_json(json!({
            "items": body["items"],
            "tax_rate": body["tax_rate"],
            "discount": body["discount"],
        }))
        .to_request();
    let preview: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(preview["subtotal"], "2500.00");
    assert_eq!(preview["tax_amount"], "450.00");
    assert_eq!(preview["total"], "2850.00");
    assert_eq!(preview["formatted_total"], "Rs. 2,850.00");
    assert_eq!(preview["item_count"], 2);

    let req = test::TestRequest::post()
        .uri("/invoices")
        .set_json(&body)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let invoice: Value = test::read_body_json(resp).await;
    assert_eq!(invoice["status"], "draft");
    assert_eq!(invoice["client_name"], "Sharma Traders");
    assert_eq!(invoice["invoice_date"], "2024-06-10");
    assert_eq!(invoice["totals"], preview);
    assert_eq!(invoice["line_items"].as_array().unwrap().len(), 2);
    assert_eq!(invoice["line_items"][0]["description"], "Pro License");
    assert!(is_valid_invoice_number(invoice["invoice_number"].as_str().unwrap()));
}

#[actix_web::test]
async fn test_malformed_number_blocks_submission() {
    let services = test_services("");
    let client = seed_client(&services, "Sharma Traders").await;
    let app = test::init_service(App::new().configure(|cfg| services.configure(cfg))).await;

    let mut body = license_invoice_body(&client.id);
    body["tax_rate"] = json!("18%");

    let req = test::TestRequest::post()
        .uri("/invoices")
        .set_json(&body)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let error: Value = test::read_body_json(resp).await;
    assert!(error["error"]["message"]
        .as_str()
        .unwrap()
        .contains("tax_rate"));

    let req = test::TestRequest::get().uri("/invoices").to_request();
    let invoices: Vec<Value> = test::call_and_read_body_json(&app, req).await;
    assert!(invoices.is_empty());
}

#[actix_web::test]
async fn test_create_requires_existing_client() {
    let services = test_services("");
    let app = test::init_service(App::new().configure(|cfg| services.configure(cfg))).await;

    let req = test::TestRequest::post()
        .uri("/invoices")
        .set_json(license_invoice_body("missing-client"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_status_moves_forward_only() {
    let services = test_services("");
    let client = seed_client(&services, "Sharma Traders").await;
    let app = test::init_service(App::new().configure(|cfg| services.configure(cfg))).await;

    let req = test::TestRequest::post()
        .uri("/invoices")
        .set_json(license_invoice_body(&client.id))
        .to_request();
    let invoice: Value = test::call_and_read_body_json(&app, req).await;
    let id = invoice["id"].as_str().unwrap();

    let req = test::TestRequest::patch()
        .uri(&format!("/invoices/{}/status", id))
        .set_json(json!({ "status": "paid" }))
        .to_request();
    let paid: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(paid["status"], "paid");

    let req = test::TestRequest::patch()
        .uri(&format!("/invoices/{}/status", id))
        .set_json(json!({ "status": "draft" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::get().uri("/activity").to_request();
    let activity: Vec<Value> = test::call_and_read_body_json(&app, req).await;
    let actions: Vec<&str> = activity
        .iter()
        .map(|a| a["action"].as_str().unwrap())
        .collect();
    assert_eq!(actions, ["invoice_paid", "invoice_created"]);
    assert_eq!(
        activity[1]["details"],
        format!(
            "Invoice {} created for Rs. 2,850.00",
            invoice["invoice_number"].as_str().unwrap()
        )
    );
}

#[actix_web::test]
async fn test_list_filters_by_status_and_search() {
    let services = test_services("");
    let sharma = seed_client(&services, "Sharma Traders").await;
    let iyer = seed_client(&services, "Iyer & Sons").await;
    let app = test::init_service(App::new().configure(|cfg| services.configure(cfg))).await;

    let mut ids = Vec::new();
    for client_id in [&sharma.id, &iyer.id] {
        let req = test::TestRequest::post()
            .uri("/invoices")
            .set_json(license_invoice_body(client_id))
            .to_request();
        let invoice: Value = test::call_and_read_body_json(&app, req).await;
        ids.push(invoice["id"].as_str().unwrap().to_string());
    }

    let req = test::TestRequest::patch()
        .uri(&format!("/invoices/{}/status", ids[1]))
        .set_json(json!({ "status": "sent" }))
        .to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::get().uri("/invoices?search=sharma").to_request();
    let found: Vec<Value> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(found.len(), 1);
    assert_eq!(found[0]["client_name"], "Sharma Traders");

    let req = test::TestRequest::get().uri("/invoices?status=sent").to_request();
    let sent: Vec<Value> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0]["id"], ids[1].as_str());

    let req = test::TestRequest::get().uri("/invoices").to_request();
    let all: Vec<Value> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(all.len(), 2);
}

#[actix_web::test]
async fn test_pdf_download_and_delete() {
    let services = test_services("");
    let client = seed_client(&services, "Sharma Traders").await;
    let app = test::init_service(App::new().configure(|cfg| services.configure(cfg))).await;

    let req = test::TestRequest::post()
        .uri("/invoices")
        .set_json(license_invoice_body(&client.id))
        .to_request();
    let invoice: Value = test::call_and_read_body_json(&app, req).await;
    let id = invoice["id"].as_str().unwrap();
    let number = invoice["invoice_number"].as_str().unwrap();

    let req = test::TestRequest::get()
        .uri(&format!("/invoices/{}/pdf", id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get("content-type").unwrap(),
        "application/pdf"
    );
    let disposition = resp
        .headers()
        .get("content-disposition")
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(disposition.starts_with("attachment"));
    assert!(disposition.contains(&format!("Invoice_{}.pdf", number)));

    let bytes = test::read_body(resp).await;
    assert!(bytes.starts_with(b"%PDF"));

    let req = test::TestRequest::delete()
        .uri(&format!("/invoices/{}", id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let req = test::TestRequest::get()
        .uri(&format!("/invoices/{}", id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::get()
        .uri(&format!("/invoices/{}/pdf", id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_render_failure_leaves_invoice_intact_and_retry_succeeds() {
    let mut deps = test_dependencies("");
    deps.renderer = Arc::new(FailOnceRenderer {
        failed: AtomicBool::new(false),
        inner: PdfRenderer::new(),
    });
    let services = AppServices::new(deps);
    let client = seed_client(&services, "Sharma Traders").await;
    let app = test::init_service(App::new().configure(|cfg| services.configure(cfg))).await;

    let req = test::TestRequest::post()
        .uri("/invoices")
        .set_json(license_invoice_body(&client.id))
        .to_request();
    let invoice: Value = test::call_and_read_body_json(&app, req).await;
    let id = invoice["id"].as_str().unwrap();

    let req = test::TestRequest::get()
        .uri(&format!("/invoices/{}/pdf", id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let error: Value = test::read_body_json(resp).await;
    assert_eq!(error["error"]["message"], RENDER_FAILURE_MESSAGE);

    let req = test::TestRequest::get()
        .uri(&format!("/invoices/{}", id))
        .to_request();
    let stored: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(stored, invoice);

    let req = test::TestRequest::get()
        .uri(&format!("/invoices/{}/pdf", id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = test::read_body(resp).await;
    assert!(bytes.starts_with(b"%PDF"));
}
