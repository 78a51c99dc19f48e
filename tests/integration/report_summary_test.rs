// Dashboard summary over a handful of invoices in different states

#[path = "../helpers/mod.rs"]
mod helpers;

use actix_web::{test, App};
use helpers::{license_invoice_body, seed_client, test_services};
use serde_json::{json, Value};

#[actix_web::test]
async fn test_summary_of_empty_workspace() {
    let services = test_services("");
    let app = test::init_service(App::new().configure(|cfg| services.configure(cfg))).await;

    let req = test::TestRequest::get().uri("/reports/summary").to_request();
    let summary: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(summary["total_clients"], 0);
    assert_eq!(summary["total_invoices"], 0);
    assert_eq!(summary["formatted_revenue"], "Rs. 0.00");
    assert_eq!(summary["status_counts"]["paid"], 0);
}

#[actix_web::test]
async fn test_revenue_counts_paid_and_pending_counts_open() {
    let services = test_services("");
    let client = seed_client(&services, "Sharma Traders").await;
    seed_client(&services, "Iyer & Sons").await;
    let app = test::init_service(App::new().configure(|cfg| services.configure(cfg))).await;

    let mut ids = Vec::new();
    for _ in 0..3 {
        let req = test::TestRequest::post()
            .uri("/invoices")
            .set_json(license_invoice_body(&client.id))
            .to_request();
        let invoice: Value = test::call_and_read_body_json(&app, req).await;
        ids.push(invoice["id"].as_str().unwrap().to_string());
    }

    for (id, status) in [(&ids[0], "paid"), (&ids[1], "sent")] {
        let req = test::TestRequest::patch()
            .uri(&format!("/invoices/{}/status", id))
            .set_json(json!({ "status": status }))
            .to_request();
        test::call_service(&app, req).await;
    }

    let req = test::TestRequest::get().uri("/reports/summary").to_request();
    let summary: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(summary["total_clients"], 2);
    assert_eq!(summary["total_invoices"], 3);
    assert_eq!(summary["pending_invoices"], 2);
    assert_eq!(summary["status_counts"]["paid"], 1);
    assert_eq!(summary["status_counts"]["sent"], 1);
    assert_eq!(summary["status_counts"]["draft"], 1);
    assert_eq!(summary["formatted_revenue"], "Rs. 2,850.00");
    assert_eq!(summary["formatted_pending_revenue"], "Rs. 5,700.00");
}
