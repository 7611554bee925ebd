use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::util::ServiceExt;

use app_api::AppContext;
use billing_app::AppState;

use http_api::HttpState;

struct TestApp {
    _temp_dir: tempfile::TempDir,
    router: axum::Router,
}

fn build_app() -> TestApp {
    let temp_dir = tempfile::tempdir().expect("tempdir");
    let app_state = AppState::new(temp_dir.path().join("billing.sqlite3"));
    app_state.setup_db().expect("setup db");

    let context = AppContext {
        app_state,
        app_data_dir: temp_dir.path().to_path_buf(),
    };
    let state = HttpState::new(context);
    let router = http_api::router(state);

    TestApp {
        _temp_dir: temp_dir,
        router,
    }
}

async fn post(router: &axum::Router, path: &str, body: Value) -> (StatusCode, Value) {
    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(path)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .expect("request"),
        )
        .await
        .expect("response");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();
    let payload = serde_json::from_slice(&bytes).expect("json body");
    (status, payload)
}

async fn register_customer(router: &axum::Router, name: &str, email: &str) -> i64 {
    let (status, customer) = post(
        router,
        "/api/customer_create",
        json!({
            "national_id": "3201010101010001",
            "name": name,
            "email": email,
            "address": "Jl. Melati 12",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    customer["id"].as_i64().expect("customer id")
}

#[tokio::test]
async fn bill_lifecycle_prices_and_serves_invoices() {
    let app = build_app();
    let customer_id = register_customer(&app.router, "Siti Rahma", "siti@example.com").await;

    let (status, bill) = post(
        &app.router,
        "/api/bill_create",
        json!({
            "customer_id": customer_id,
            "start_reading": 100,
            "end_reading": 115,
            "consumption": 15,
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(bill["customer_name"], "Siti Rahma");
    assert_eq!(bill["total_payment"], "13000");
    assert_eq!(bill["status"], "pending");
    let bill_id = bill["id"].as_i64().expect("bill id");

    let (status, bills) = post(&app.router, "/api/bills", json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(bills.as_array().expect("bill list").len(), 1);

    let (status, invoice) = post(&app.router, "/api/bill_invoice", json!({ "id": bill_id })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(invoice["total_payment"], "13000");

    // Second record for the same customer in the same month is rejected.
    let (status, error) = post(
        &app.router,
        "/api/bill_create",
        json!({
            "customer_id": customer_id,
            "start_reading": 115,
            "end_reading": 120,
            "consumption": 5,
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "invalid_input");
}

#[tokio::test]
async fn bill_filters_match_email_and_month() {
    let app = build_app();
    let siti = register_customer(&app.router, "Siti Rahma", "siti@example.com").await;
    register_customer(&app.router, "Budi Santoso", "budi@example.com").await;

    let (status, _) = post(
        &app.router,
        "/api/bill_create",
        json!({
            "customer_id": siti,
            "start_reading": 0,
            "end_reading": 8,
            "consumption": 8,
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, bills) = post(&app.router, "/api/bills", json!({ "email": "siti" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(bills.as_array().expect("bill list").len(), 1);

    let (status, bills) = post(&app.router, "/api/bills", json!({ "email": "budi" })).await;
    assert_eq!(status, StatusCode::OK);
    assert!(bills.as_array().expect("bill list").is_empty());
}

#[tokio::test]
async fn invoice_for_missing_record_is_404() {
    let app = build_app();

    let (status, error) = post(&app.router, "/api/bill_invoice", json!({ "id": 999 })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error["code"], "not_found");
}

#[tokio::test]
async fn negative_consumption_is_rejected() {
    let app = build_app();
    let customer_id = register_customer(&app.router, "Siti Rahma", "siti@example.com").await;

    let (status, error) = post(
        &app.router,
        "/api/bill_create",
        json!({
            "customer_id": customer_id,
            "start_reading": 10,
            "end_reading": 5,
            "consumption": -5,
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "invalid_input");
}

#[tokio::test]
async fn status_update_and_delete_round_trip() {
    let app = build_app();
    let customer_id = register_customer(&app.router, "Siti Rahma", "siti@example.com").await;

    let (_, bill) = post(
        &app.router,
        "/api/bill_create",
        json!({
            "customer_id": customer_id,
            "start_reading": 0,
            "end_reading": 3,
            "consumption": 3,
        }),
    )
    .await;
    let bill_id = bill["id"].as_i64().expect("bill id");

    let (status, updated) = post(
        &app.router,
        "/api/bill_update_status",
        json!({ "id": bill_id, "status": "paid" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["updated"].as_i64(), Some(bill_id));

    let (_, invoice) = post(&app.router, "/api/bill_invoice", json!({ "id": bill_id })).await;
    assert_eq!(invoice["status"], "paid");

    let (status, deleted) = post(&app.router, "/api/bill_delete", json!({ "id": bill_id })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted["deleted"].as_i64(), Some(bill_id));

    let (status, _) = post(&app.router, "/api/bill_invoice", json!({ "id": bill_id })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn dashboard_reflects_current_month_activity() {
    let app = build_app();

    let (status, empty) = post(&app.router, "/api/dashboard", json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(empty["customer_count"].as_u64(), Some(0));
    assert_eq!(empty["total_payment"], "0");
    assert_eq!(
        empty["monthly_counts"].as_array().expect("buckets").len(),
        12
    );

    let customer_id = register_customer(&app.router, "Siti Rahma", "siti@example.com").await;
    let (status, _) = post(
        &app.router,
        "/api/bill_create",
        json!({
            "customer_id": customer_id,
            "start_reading": 0,
            "end_reading": 15,
            "consumption": 15,
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, summary) = post(&app.router, "/api/dashboard", json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(summary["customer_count"].as_u64(), Some(1));
    assert_eq!(summary["total_payment"], "13000");
    assert_eq!(summary["total_consumption"], "15");
}

#[tokio::test]
async fn customer_month_summary_compares_against_previous_month() {
    let app = build_app();
    let customer_id = register_customer(&app.router, "Siti Rahma", "siti@example.com").await;

    let (status, _) = post(
        &app.router,
        "/api/bill_create",
        json!({
            "customer_id": customer_id,
            "start_reading": 0,
            "end_reading": 15,
            "consumption": 15,
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, summary) = post(
        &app.router,
        "/api/customer_month",
        json!({ "email": "siti@example.com" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(summary["email"], "siti@example.com");
    assert_eq!(summary["current_month_total"], "15");
    assert_eq!(summary["cost_current_month"], "13000");
    assert_eq!(summary["previous_month_total"], "0");
    assert_eq!(summary["cost_previous_month"], "5000");
    assert_eq!(summary["delta"], "15");
}

#[tokio::test]
async fn customer_month_summary_for_unknown_email_is_404() {
    let app = build_app();

    let (status, error) = post(
        &app.router,
        "/api/customer_month",
        json!({ "email": "nobody@example.com" }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error["code"], "not_found");
}

#[tokio::test]
async fn customers_can_be_listed_and_updated() {
    let app = build_app();
    let customer_id = register_customer(&app.router, "Siti Rahma", "siti@example.com").await;

    let (status, customers) = post(&app.router, "/api/customers", json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(customers.as_array().expect("customer list").len(), 1);

    let (status, found) = post(
        &app.router,
        "/api/customer_by_name",
        json!({ "name": "Siti Rahma" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(found["email"], "siti@example.com");

    let (status, updated) = post(
        &app.router,
        "/api/customer_update",
        json!({
            "id": customer_id,
            "national_id": "3201010101010001",
            "name": "Siti Rahma",
            "email": "siti@example.com",
            "address": "Jl. Kenanga 5",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["address"], "Jl. Kenanga 5");
    assert_eq!(updated["role"], "customer");

    let (status, error) = post(
        &app.router,
        "/api/customer_create",
        json!({
            "national_id": "3201010101010002",
            "name": "Siti Kembar",
            "email": "siti@example.com",
            "address": "Jl. Melati 12",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "invalid_input");
}
