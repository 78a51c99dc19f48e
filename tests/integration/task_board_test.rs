// Task board: creation, ordering, status filter, updates and deletion

#[path = "../helpers/mod.rs"]
mod helpers;

use actix_web::{http::StatusCode, test, App};
use helpers::{seed_client, test_services};
use serde_json::{json, Value};

#[actix_web::test]
async fn test_tasks_ordered_by_due_date_and_flag_overdue() {
    let services = test_services("");
    let app = test::init_service(App::new().configure(|cfg| services.configure(cfg))).await;

    for (title, due) in [
        ("Send proposal", json!("2024-06-20")),
        ("Someday", Value::Null),
        ("Chase payment", json!("2024-06-01")),
    ] {
        let req = test::TestRequest::post()
            .uri("/tasks")
            .set_json(json!({ "title": title, "due_date": due, "priority": "high" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
    }

    let req = test::TestRequest::get().uri("/tasks").to_request();
    let tasks: Vec<Value> = test::call_and_read_body_json(&app, req).await;
    let titles: Vec<&str> = tasks.iter().map(|t| t["title"].as_str().unwrap()).collect();
    assert_eq!(titles, ["Chase payment", "Send proposal", "Someday"]);
    assert_eq!(tasks[0]["is_overdue"], true);
    assert_eq!(tasks[1]["is_overdue"], false);
    assert_eq!(tasks[0]["status"], "pending");
}

#[actix_web::test]
async fn test_task_update_filter_and_delete() {
    let services = test_services("");
    let client = seed_client(&services, "Sharma Traders").await;
    let app = test::init_service(App::new().configure(|cfg| services.configure(cfg))).await;

    let req = test::TestRequest::post()
        .uri("/tasks")
        .set_json(json!({ "title": "Collect KYC", "client_id": client.id }))
        .to_request();
    let task: Value = test::call_and_read_body_json(&app, req).await;
    let id = task["id"].as_str().unwrap();
    assert_eq!(task["priority"], "medium");

    let req = test::TestRequest::patch()
        .uri(&format!("/tasks/{}", id))
        .set_json(json!({ "status": "in_progress" }))
        .to_request();
    let updated: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(updated["status"], "in_progress");
    assert_eq!(updated["title"], "Collect KYC");

    let req = test::TestRequest::get().uri("/tasks?status=pending").to_request();
    let pending: Vec<Value> = test::call_and_read_body_json(&app, req).await;
    assert!(pending.is_empty());

    let req = test::TestRequest::delete()
        .uri(&format!("/tasks/{}", id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let req = test::TestRequest::get()
        .uri(&format!("/tasks/{}", id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_task_rejects_blank_title_and_unknown_links() {
    let services = test_services("");
    let app = test::init_service(App::new().configure(|cfg| services.configure(cfg))).await;

    let req = test::TestRequest::post()
        .uri("/tasks")
        .set_json(json!({ "title": "   " }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::post()
        .uri("/tasks")
        .set_json(json!({ "title": "Call back", "lead_id": "missing" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
