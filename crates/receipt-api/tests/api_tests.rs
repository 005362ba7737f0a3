//! HTTP 接口集成测试

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use points_engine::{InMemoryRecordStore, ProcessingService};
use receipt_api::dto::{PointsResponse, ProcessReceiptResponse};
use receipt_api::{AppState, build_app};
use receipt_shared::config::StoreConfig;
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;

fn create_test_app() -> Router {
    build_app(AppState::from_config(&StoreConfig::default()))
}

fn target_receipt() -> Value {
    json!({
        "retailer": "Target",
        "purchaseDate": "2022-01-01",
        "purchaseTime": "13:01",
        "items": [
            { "shortDescription": "Mountain Dew 12PK", "price": "6.49" },
            { "shortDescription": "Emils Cheese Pizza", "price": "12.25" },
            { "shortDescription": "Knorr Creamy Chicken", "price": "1.26" },
            { "shortDescription": "Doritos Nacho Cheese", "price": "3.35" },
            { "shortDescription": "   Klarbrunn 12-PK 12 FL OZ  ", "price": "12.00" }
        ],
        "total": "35.35"
    })
}

fn post_json(uri: &str, body: String) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn body_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> T {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

async fn submit(app: &Router, receipt: &Value) -> String {
    let response = app
        .clone()
        .oneshot(post_json("/receipts/process", receipt.to_string()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let resp: ProcessReceiptResponse = body_json(response).await;
    resp.id
}

#[tokio::test]
async fn test_process_then_get_points() {
    let app = create_test_app();
    let id = submit(&app, &target_receipt()).await;
    assert!(!id.is_empty());

    let response = app
        .oneshot(get(&format!("/receipts/{}/points", id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let resp: PointsResponse = body_json(response).await;
    assert_eq!(resp.points, 28);
}

#[tokio::test]
async fn test_corner_market_scores_109() {
    let app = create_test_app();
    let receipt = json!({
        "retailer": "M&M Corner Market",
        "purchaseDate": "2022-03-20",
        "purchaseTime": "14:33",
        "items": [
            { "shortDescription": "Gatorade", "price": "2.25" },
            { "shortDescription": "Gatorade", "price": "2.25" },
            { "shortDescription": "Gatorade", "price": "2.25" },
            { "shortDescription": "Gatorade", "price": "2.25" }
        ],
        "total": "9.00"
    });
    let id = submit(&app, &receipt).await;

    let response = app
        .oneshot(get(&format!("/receipts/{}/points", id)))
        .await
        .unwrap();
    let resp: PointsResponse = body_json(response).await;
    assert_eq!(resp.points, 109);
}

#[tokio::test]
async fn test_each_submission_gets_new_id() {
    let app = create_test_app();
    let first = submit(&app, &target_receipt()).await;
    let second = submit(&app, &target_receipt()).await;
    assert_ne!(first, second);
}

#[tokio::test]
async fn test_get_receipt_returns_submitted_receipt() {
    let app = create_test_app();
    let receipt = target_receipt();
    let id = submit(&app, &receipt).await;

    let response = app
        .oneshot(get(&format!("/receipts/{}", id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let stored: Value = body_json(response).await;
    assert_eq!(stored, receipt);
}

#[tokio::test]
async fn test_unknown_id_returns_404() {
    let app = create_test_app();

    for uri in ["/receipts/does-not-exist/points", "/receipts/does-not-exist"] {
        let response = app.clone().oneshot(get(uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{}", uri);

        let body: Value = body_json(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["code"], "RECEIPT_NOT_FOUND");
        assert!(body["data"].is_null());
    }
}

#[tokio::test]
async fn test_missing_retailer_returns_400() {
    let app = create_test_app();
    let mut receipt = target_receipt();
    receipt.as_object_mut().unwrap().remove("retailer");

    let response = app
        .oneshot(post_json("/receipts/process", receipt.to_string()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = body_json(response).await;
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert!(body["message"].as_str().unwrap().contains("retailer"));
}

#[tokio::test]
async fn test_invalid_item_price_returns_400() {
    let app = create_test_app();
    let mut receipt = target_receipt();
    receipt["items"][0]["price"] = json!("6.4");

    let response = app
        .oneshot(post_json("/receipts/process", receipt.to_string()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = body_json(response).await;
    assert!(body["message"].as_str().unwrap().contains("price"));
}

#[tokio::test]
async fn test_malformed_json_returns_400() {
    let app = create_test_app();

    let response = app
        .oneshot(post_json("/receipts/process", "{\"retailer\": ".to_string()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body: Value = body_json(response).await;
    assert_eq!(body["code"], "INVALID_JSON");
}

#[tokio::test]
async fn test_full_store_returns_503() {
    let store = Arc::new(InMemoryRecordStore::with_capacity(1));
    let app = build_app(AppState::new(ProcessingService::new(store)));

    submit(&app, &target_receipt()).await;

    let response = app
        .oneshot(post_json("/receipts/process", target_receipt().to_string()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

    let body: Value = body_json(response).await;
    assert_eq!(body["code"], "STORE_CAPACITY_EXHAUSTED");
}

#[tokio::test]
async fn test_health_check() {
    let app = create_test_app();
    let response = app.oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&body[..], b"OK");
}

#[tokio::test]
async fn test_request_id_header() {
    let app = create_test_app();

    let response = app.clone().oneshot(get("/health")).await.unwrap();
    assert!(response.headers().contains_key("x-request-id"));

    let request = Request::builder()
        .uri("/health")
        .header("x-request-id", "req-42")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.headers()["x-request-id"], "req-42");
}
