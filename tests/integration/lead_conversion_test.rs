// Lead import from the spreadsheet, lead upkeep and conversion into clients

#[path = "../helpers/mod.rs"]
mod helpers;

use actix_web::{http::StatusCode, test, App};
use helpers::test_services;
use ledgerline::leads::Lead;
use ledgerline::AppServices;
use serde_json::{json, Value};

const SHEET: &str = "\
Name,Phone,Service,Address
Priya Nair,9845000001,GST registration,Indiranagar
,9845000002,Trademark,Whitefield
Arjun Rao,9845000003,Company incorporation,HSR Layout
";

/// Sync the sheet and return the stored lead with the given phone
async fn synced_lead(services: &AppServices, phone: &str) -> Lead {
    services
        .leads
        .sync_from_sheet()
        .await
        .unwrap()
        .leads
        .into_iter()
        .find(|lead| lead.phone == phone)
        .unwrap()
}

#[actix_web::test]
async fn test_sync_returns_parsed_leads() {
    let services = test_services(SHEET);
    let app = test::init_service(App::new().configure(|cfg| services.configure(cfg))).await;

    let req = test::TestRequest::post().uri("/leads/sync").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["total"], 2);
    assert_eq!(body["skipped"], 0);
    assert_eq!(body["leads"][0]["name"], "Priya Nair");
    assert_eq!(body["leads"][0]["lead_source"], "google_sheet");
    assert_eq!(body["leads"][0]["status"], "new");
    assert_eq!(body["leads"][1]["sheet_row_id"], "row_4");

    let req = test::TestRequest::get().uri("/activity").to_request();
    let activity: Vec<Value> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(activity.len(), 1);
    assert_eq!(activity[0]["details"], "Synced 2 leads from Google Sheets");
}

#[actix_web::test]
async fn test_sync_of_empty_sheet_succeeds() {
    let services = test_services("Name,Phone,Service,Address\n");
    let app = test::init_service(App::new().configure(|cfg| services.configure(cfg))).await;

    let req = test::TestRequest::post().uri("/leads/sync").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["total"], 0);
    assert!(body["leads"].as_array().unwrap().is_empty());
}

#[actix_web::test]
async fn test_resync_updates_leads_in_place() {
    let services = test_services(SHEET);
    let app = test::init_service(App::new().configure(|cfg| services.configure(cfg))).await;

    let first = synced_lead(&services, "9845000001").await;
    let again = synced_lead(&services, "9845000001").await;
    assert_eq!(again.id, first.id);

    let req = test::TestRequest::get().uri("/leads").to_request();
    let leads: Vec<Value> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(leads.len(), 2);
}

#[actix_web::test]
async fn test_rows_without_phone_are_skipped() {
    let sheet = "Name,Phone,Service,Address\nMeera Iyer,,Audit,Jayanagar\nArjun Rao,9845000003,Audit,HSR\n";
    let services = test_services(sheet);
    let app = test::init_service(App::new().configure(|cfg| services.configure(cfg))).await;

    let req = test::TestRequest::post().uri("/leads/sync").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["total"], 1);
    assert_eq!(body["skipped"], 1);
    assert_eq!(body["leads"][0]["name"], "Arjun Rao");
}

#[actix_web::test]
async fn test_convert_creates_client_and_logs_activity() {
    let services = test_services(SHEET);
    let app = test::init_service(App::new().configure(|cfg| services.configure(cfg))).await;
    let lead = synced_lead(&services, "9845000001").await;
    let lead_id = lead.id.as_str();

    let req = test::TestRequest::post()
        .uri("/leads/convert")
        .set_json(json!({ "lead_id": lead_id }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let client: Value = test::read_body_json(resp).await;
    assert_eq!(client["name"], "Priya Nair");
    assert_eq!(client["lead_id"], lead_id);
    assert_eq!(client["address"], "Indiranagar");
    assert_eq!(
        client["notes"],
        "Converted from lead. Service interested: GST registration"
    );

    let req = test::TestRequest::get()
        .uri(&format!("/clients/{}", client["id"].as_str().unwrap()))
        .to_request();
    let stored: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(stored["phone"], "9845000001");

    let req = test::TestRequest::get().uri("/activity").to_request();
    let activity: Vec<Value> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(activity[0]["action"], "lead_converted");
    assert_eq!(activity[0]["details"], "Lead Priya Nair converted to client");
    assert_eq!(activity[0]["client_id"], client["id"]);
    assert_eq!(activity[0]["lead_id"], lead_id);

    let req = test::TestRequest::get()
        .uri(&format!("/leads/{}", lead_id))
        .to_request();
    let stored: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(stored["status"], "converted");
}

#[actix_web::test]
async fn test_lead_converts_only_once() {
    let services = test_services(SHEET);
    let app = test::init_service(App::new().configure(|cfg| services.configure(cfg))).await;
    let lead = synced_lead(&services, "9845000003").await;

    for expected in [StatusCode::CREATED, StatusCode::CONFLICT] {
        let req = test::TestRequest::post()
            .uri("/leads/convert")
            .set_json(json!({ "lead_id": lead.id }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), expected);
    }

    let req = test::TestRequest::post()
        .uri("/leads/convert")
        .set_json(json!({ "lead_id": "missing", "name": "Ghost" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_manual_lead_status_and_delete() {
    let services = test_services("");
    let app = test::init_service(App::new().configure(|cfg| services.configure(cfg))).await;

    let req = test::TestRequest::post()
        .uri("/leads")
        .set_json(json!({ "name": "Walk-in Customer", "phone": "9845000010" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let lead: Value = test::read_body_json(resp).await;
    assert_eq!(lead["lead_source"], "manual");
    let id = lead["id"].as_str().unwrap();

    let req = test::TestRequest::patch()
        .uri(&format!("/leads/{}/status", id))
        .set_json(json!({ "status": "contacted" }))
        .to_request();
    let updated: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(updated["status"], "contacted");

    let req = test::TestRequest::patch()
        .uri(&format!("/leads/{}/status", id))
        .set_json(json!({ "status": "converted" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::get().uri("/leads?status=contacted").to_request();
    let contacted: Vec<Value> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(contacted.len(), 1);

    let req = test::TestRequest::delete()
        .uri(&format!("/leads/{}", id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let req = test::TestRequest::get().uri("/activity").to_request();
    let activity: Vec<Value> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(activity[0]["action"], "lead_deleted");
    assert_eq!(activity[0]["details"], "Lead Walk-in Customer deleted");

    let req = test::TestRequest::delete()
        .uri(&format!("/leads/{}", id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_convert_uses_phone_when_name_missing() {
    let services = test_services(SHEET);
    let app = test::init_service(App::new().configure(|cfg| services.configure(cfg))).await;

    let req = test::TestRequest::post()
        .uri("/leads/convert")
        .set_json(json!({ "phone": "9845000002", "service_interested": "Trademark" }))
        .to_request();
    let client: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(client["name"], "9845000002");
}

#[actix_web::test]
async fn test_convert_rejects_lead_without_name_or_phone() {
    let services = test_services(SHEET);
    let app = test::init_service(App::new().configure(|cfg| services.configure(cfg))).await;

    let req = test::TestRequest::post()
        .uri("/leads/convert")
        .set_json(json!({ "name": " ", "phone": "" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}
