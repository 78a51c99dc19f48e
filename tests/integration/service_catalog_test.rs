// Service catalog upkeep and catalog-backed invoice rows

#[path = "../helpers/mod.rs"]
mod helpers;

use actix_web::{http::StatusCode, test, App};
use helpers::{seed_client, test_services};
use serde_json::{json, Value};

#[actix_web::test]
async fn test_catalog_create_list_and_deactivate() {
    let services = test_services("");
    let app = test::init_service(App::new().configure(|cfg| services.configure(cfg))).await;

    let mut ids = Vec::new();
    for (name, price) in [("Trademark Filing", "4500"), ("GST Return", "1200.50")] {
        let req = test::TestRequest::post()
            .uri("/services")
            .set_json(json!({ "name": name, "base_price": price }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let created: Value = test::read_body_json(resp).await;
        assert_eq!(created["is_active"], true);
        ids.push(created["id"].as_str().unwrap().to_string());
    }

    let req = test::TestRequest::get().uri("/services?active=true").to_request();
    let active: Vec<Value> = test::call_and_read_body_json(&app, req).await;
    let names: Vec<&str> = active.iter().map(|s| s["name"].as_str().unwrap()).collect();
    assert_eq!(names, ["GST Return", "Trademark Filing"]);
    assert_eq!(active[0]["base_price"], "1200.50");

    let req = test::TestRequest::put()
        .uri(&format!("/services/{}", ids[0]))
        .set_json(json!({ "is_active": false }))
        .to_request();
    let updated: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(updated["is_active"], false);
    assert_eq!(updated["name"], "Trademark Filing");

    let req = test::TestRequest::get().uri("/services?active=true").to_request();
    let active: Vec<Value> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(active.len(), 1);

    let req = test::TestRequest::get().uri("/services?search=trade").to_request();
    let found: Vec<Value> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(found.len(), 1);
    assert_eq!(found[0]["id"], ids[0].as_str());
}

#[actix_web::test]
async fn test_malformed_base_price_rejected() {
    let services = test_services("");
    let app = test::init_service(App::new().configure(|cfg| services.configure(cfg))).await;

    let req = test::TestRequest::post()
        .uri("/services")
        .set_json(json!({ "name": "Audit", "base_price": "12k" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::get().uri("/services/missing").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_catalog_row_prefills_description_and_price() {
    let services = test_services("");
    let client = seed_client(&services, "Sharma Traders").await;
    let app = test::init_service(App::new().configure(|cfg| services.configure(cfg))).await;

    let req = test::TestRequest::post()
        .uri("/services")
        .set_json(json!({ "name": "GST Return", "base_price": "1200" }))
        .to_request();
    let service: Value = test::call_and_read_body_json(&app, req).await;
    let service_id = service["id"].as_str().unwrap();

    let items = json!([
        { "service_id": service_id, "quantity": 2, "unit_price": "" },
        { "service_id": service_id, "description": "GST Return (urgent)", "unit_price": "1500" }
    ]);

    let req = test::TestRequest::post()
        .uri("/invoices/preview")
        .set_json(json!({ "items": items, "tax_rate": "0" }))
        .to_request();
    let preview: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(preview["subtotal"], "3900.00");

    let req = test::TestRequest::post()
        .uri("/invoices")
        .set_json(json!({
            "client_id": client.id,
            "due_date": "2024-06-25",
            "tax_rate": "0",
            "items": items
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let invoice: Value = test::read_body_json(resp).await;

    let rows = invoice["line_items"].as_array().unwrap();
    assert_eq!(rows[0]["description"], "GST Return");
    assert_eq!(rows[0]["service_id"], service_id);
    assert_eq!(rows[1]["description"], "GST Return (urgent)");
}

#[actix_web::test]
async fn test_inactive_or_unknown_service_cannot_be_billed() {
    let services = test_services("");
    let app = test::init_service(App::new().configure(|cfg| services.configure(cfg))).await;

    let req = test::TestRequest::post()
        .uri("/services")
        .set_json(json!({ "name": "Legacy Plan", "base_price": 100, "is_active": false }))
        .to_request();
    let service: Value = test::call_and_read_body_json(&app, req).await;

    let req = test::TestRequest::post()
        .uri("/invoices/preview")
        .set_json(json!({ "items": [{ "service_id": service["id"] }] }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::post()
        .uri("/invoices/preview")
        .set_json(json!({ "items": [{ "service_id": "missing" }] }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
