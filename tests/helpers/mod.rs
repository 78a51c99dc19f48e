// Shared setup for HTTP-level tests
//
// Services run over the in-memory repositories with a pinned clock, so
// invoice dates and numbers are reproducible.
//
// Usage:
//   #[path = "../helpers/mod.rs"]
//   mod helpers;

#![allow(dead_code)]

use std::sync::Arc;

use chrono::{NaiveDate, TimeZone, Utc};
use ledgerline::clients::{Client, CreateClientRequest};
use ledgerline::core::FixedClock;
use ledgerline::leads::StaticSheetSource;
use ledgerline::{AppDependencies, AppServices};

/// Date the pinned clock reports
pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 10).unwrap()
}

/// In-memory dependencies with the pinned clock; tests may swap parts before building
pub fn test_dependencies(sheet_csv: &str) -> AppDependencies {
    let mut deps = AppDependencies::in_memory(Arc::new(StaticSheetSource::new(sheet_csv)));
    deps.clock = Arc::new(FixedClock(
        Utc.with_ymd_and_hms(2024, 6, 10, 9, 0, 0).unwrap(),
    ));
    deps
}

/// In-memory services whose lead sheet returns `sheet_csv`
pub fn test_services(sheet_csv: &str) -> AppServices {
    AppServices::new(test_dependencies(sheet_csv))
}

pub async fn seed_client(services: &AppServices, name: &str) -> Client {
    services
        .clients
        .create_client(CreateClientRequest {
            name: name.to_string(),
            phone: Some("9845012345".to_string()),
            address: Some("Koramangala, Bangalore".to_string()),
            ..Default::default()
        })
        .await
        .unwrap()
}

/// Scenario invoice body: two items, 18% tax, 100 discount
pub fn license_invoice_body(client_id: &str) -> serde_json::Value {
    serde_json::json!({
        "client_id": client_id,
        "due_date": "2024-06-25",
        "tax_rate": "18",
        "discount": 100,
        "notes": "Payment due within 15 days",
        "items": [
            { "description": "Pro License", "quantity": 2, "unit_price": "500.00" },
            { "description": "Setup Fee", "quantity": "1", "unit_price": 1500 },
            { "description": "", "quantity": "", "unit_price": "" }
        ]
    })
}
