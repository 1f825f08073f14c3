//! End-to-end tests exercising the router against an in-memory database.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::util::ServiceExt;

use atelier_api::config::ApiConfig;
use atelier_api::{app, AppState};
use atelier_db::{Database, DbConfig};

async fn test_app() -> Router {
    let db = Database::new(DbConfig::in_memory()).await.unwrap();
    let config = ApiConfig {
        http_port: 0,
        bind_addr: "127.0.0.1".to_string(),
        database_path: ":memory:".to_string(),
        max_connections: 1,
        daily_stats_days: 30,
    };
    app(Arc::new(AppState { db, config }))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = match body {
        Some(json) => Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

#[tokio::test]
async fn test_product_create_and_fetch_by_sku() {
    let app = test_app().await;

    let (status, created) = send(
        &app,
        "POST",
        "/api/products",
        Some(json!({"name": "Screen", "sku": "SCR-1", "price": 50.0, "stock_quantity": 10})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["sku"], "SCR-1");

    let (status, fetched) = send(&app, "GET", "/api/products/sku/SCR-1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["id"], created["id"]);

    let (status, body) = send(&app, "GET", "/api/products/sku/NOPE", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_duplicate_sku_is_conflict() {
    let app = test_app().await;
    let payload = json!({"name": "Screen", "sku": "SCR-1", "price": 50.0});

    let (status, _) = send(&app, "POST", "/api/products", Some(payload.clone())).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(&app, "POST", "/api/products", Some(payload)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_invalid_sale_is_bad_request() {
    let app = test_app().await;

    // No items at all.
    let (status, body) = send(
        &app,
        "POST",
        "/api/sales",
        Some(json!({
            "total_amount": 0.0,
            "final_total": 0.0,
            "payment_method": "cash",
            "items": []
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_sale_flow_decrements_stock() {
    let app = test_app().await;

    let (_, product) = send(
        &app,
        "POST",
        "/api/products",
        Some(json!({"name": "Screen", "sku": "SCR-1", "price": 50.0, "stock_quantity": 10})),
    )
    .await;

    let (status, sale) = send(
        &app,
        "POST",
        "/api/sales",
        Some(json!({
            "total_amount": 150.0,
            "final_total": 150.0,
            "payment_method": "cash",
            "items": [{
                "product_id": product["id"],
                "quantity": 3,
                "unit_price": 50.0,
                "is_manual": false
            }]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(sale["final_total"], json!(150.0));
    assert_eq!(sale["items"].as_array().unwrap().len(), 1);

    let (_, fetched) = send(&app, "GET", "/api/products/sku/SCR-1", None).await;
    assert_eq!(fetched["stock_quantity"], json!(7));

    // The payment row was written in the same transaction.
    let (status, payments) = send(&app, "GET", "/api/payments", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(payments.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_settings_merge_roundtrip() {
    let app = test_app().await;

    let (status, map) = send(
        &app,
        "POST",
        "/api/settings",
        Some(json!({"shop_name": "Atelier", "currency": "CAD"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(map["shop_name"], "Atelier");

    // A second POST touching one key leaves the other intact.
    let (_, map) = send(&app, "POST", "/api/settings", Some(json!({"currency": "USD"}))).await;
    assert_eq!(map["currency"], "USD");
    assert_eq!(map["shop_name"], "Atelier");
}

#[tokio::test]
async fn test_dashboard_empty_database() {
    let app = test_app().await;

    let (status, stats) = send(&app, "GET", "/api/stats/dashboard", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats["today_sales"], json!(0.0));
    assert_eq!(stats["ongoing_repairs"], json!(0));
    assert!(stats["recent_repairs"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_repair_status_update() {
    let app = test_app().await;

    let (status, repair) = send(
        &app,
        "POST",
        "/api/repairs",
        Some(json!({"device_details": "iPhone 12", "issue_description": "Cracked screen"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(repair["status"], "received");

    let id = repair["id"].as_i64().unwrap();
    let (status, updated) = send(
        &app,
        "PUT",
        &format!("/api/repairs/{id}/status"),
        Some(json!({"status": "in_progress"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["status"], "in_progress");

    let (status, _) = send(
        &app,
        "PUT",
        "/api/repairs/999/status",
        Some(json!({"status": "completed"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_inventory_tree_endpoints() {
    let app = test_app().await;

    let (status, category) = send(
        &app,
        "POST",
        "/api/inventory/categories",
        Some(json!({"name": "Phones"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _brand) = send(
        &app,
        "POST",
        "/api/inventory/brands",
        Some(json!({"category_id": category["id"], "name": "Apple"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, tree) = send(&app, "GET", "/api/inventory/hierarchy", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(tree[0]["name"], "Phones");
    assert_eq!(tree[0]["brands"][0]["name"], "Apple");

    let id = category["id"].as_i64().unwrap();
    let (status, body) = send(
        &app,
        "DELETE",
        &format!("/api/inventory/categories/{id}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["deleted"], json!(true));
}
