//! Router-level tests backed by the in-memory repository.
//!
//! Every request goes through the same field rules, validation gate and
//! extractors as production traffic; only the storage is swapped.

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use database::postgres::DatabaseHandle;
use domain_products::{InMemoryProductRepository, PgProductRepository, ProductService, handlers};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

fn app() -> Router {
    handlers::router(ProductService::new(InMemoryProductRepository::new()))
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn create(app: &Router, body: Value) -> Value {
    let response = app
        .clone()
        .oneshot(json_request("POST", "/", body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    json_body(response).await
}

#[tokio::test]
async fn test_list_products_empty() {
    let response = app().oneshot(empty_request("GET", "/")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, json!({ "data": [] }));
}

#[tokio::test]
async fn test_create_product_defaults_availability() {
    let app = app();
    let body = create(&app, json!({ "name": "Monitor", "price": 300 })).await;

    assert_eq!(body["data"]["id"], 1);
    assert_eq!(body["data"]["name"], "Monitor");
    assert_eq!(body["data"]["price"], 300.0);
    assert_eq!(body["data"]["availability"], true);
    assert!(body["data"]["created_at"].is_string());
}

#[tokio::test]
async fn test_create_product_keeps_explicit_availability() {
    let app = app();
    let body = create(
        &app,
        json!({ "name": "Keyboard", "price": 49.9, "availability": false }),
    )
    .await;

    assert_eq!(body["data"]["availability"], false);
}

#[tokio::test]
async fn test_create_product_accepts_numeric_string_price() {
    let app = app();
    let body = create(&app, json!({ "name": "a", "price": "300" })).await;

    assert_eq!(body["data"]["price"], 300.0);
}

#[tokio::test]
async fn test_create_product_collects_every_field_error() {
    let response = app()
        .oneshot(json_request("POST", "/", json!({ "price": "abc" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    let errors = body["errors"].as_array().unwrap();

    assert_eq!(errors.len(), 3);
    assert_eq!(errors[0]["field"], "name");
    assert_eq!(errors[0]["location"], "body");
    assert_eq!(errors[0]["message"], "Product name is required");
    assert_eq!(errors[0]["value"], Value::Null);
    assert_eq!(errors[1]["field"], "price");
    assert_eq!(errors[1]["message"], "Price must be a number");
    assert_eq!(errors[1]["value"], "abc");
    assert_eq!(errors[2]["message"], "Price must be greater than zero");
}

#[tokio::test]
async fn test_create_product_rejects_non_positive_price() {
    let response = app()
        .oneshot(json_request("POST", "/", json!({ "name": "Mouse", "price": 0 })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    let errors = body["errors"].as_array().unwrap();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0]["message"], "Price must be greater than zero");
}

#[tokio::test]
async fn test_create_product_rejects_non_boolean_availability() {
    let response = app()
        .oneshot(json_request(
            "POST",
            "/",
            json!({ "name": "Mouse", "price": 10, "availability": "yes" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["errors"][0]["field"], "availability");
    assert_eq!(body["errors"][0]["message"], "Availability must be a boolean");
}

#[tokio::test]
async fn test_create_product_rejects_malformed_json() {
    let request = Request::builder()
        .method("POST")
        .uri("/")
        .header("content-type", "application/json")
        .body(Body::from("{\"name\": "))
        .unwrap();

    let response = app().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["errors"][0]["field"], "body");
}

#[tokio::test]
async fn test_create_product_rejects_overlong_name() {
    let response = app()
        .oneshot(json_request(
            "POST",
            "/",
            json!({ "name": "x".repeat(101), "price": 10 }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["error"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_get_product_invalid_id() {
    let response = app().oneshot(empty_request("GET", "/abc")).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["errors"][0]["field"], "id");
    assert_eq!(body["errors"][0]["location"], "path");
    assert_eq!(body["errors"][0]["message"], "Invalid ID");
    assert_eq!(body["errors"][0]["value"], "abc");
}

#[tokio::test]
async fn test_update_product_invalid_id() {
    let response = app()
        .oneshot(json_request(
            "PUT",
            "/abc",
            json!({ "name": "Monitor", "price": 300, "availability": true }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    let errors = body["errors"].as_array().unwrap();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0]["field"], "id");
    assert_eq!(errors[0]["location"], "path");
}

#[tokio::test]
async fn test_patch_product_invalid_id() {
    let response = app().oneshot(empty_request("PATCH", "/abc")).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["errors"][0]["field"], "id");
    assert_eq!(body["errors"][0]["message"], "Invalid ID");
}

#[tokio::test]
async fn test_get_product_not_found() {
    let response = app().oneshot(empty_request("GET", "/99")).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = json_body(response).await;
    assert_eq!(body["error"], "NOT_FOUND");
    assert_eq!(body["message"], "Product 99 not found");
}

#[tokio::test]
async fn test_get_product_found() {
    let app = app();
    create(&app, json!({ "name": "Monitor", "price": 300 })).await;

    let response = app.oneshot(empty_request("GET", "/1")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["data"]["name"], "Monitor");
}

#[tokio::test]
async fn test_list_products_ordered_by_id() {
    let app = app();
    create(&app, json!({ "name": "First", "price": 1 })).await;
    create(&app, json!({ "name": "Second", "price": 2 })).await;

    let response = app.oneshot(empty_request("GET", "/")).await.unwrap();
    let body = json_body(response).await;
    let names: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect();

    assert_eq!(names, vec!["First", "Second"]);
}

#[tokio::test]
async fn test_update_product_replaces_fields() {
    let app = app();
    create(&app, json!({ "name": "Monitor", "price": 300 })).await;

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            "/1",
            json!({ "name": "Curved Monitor", "price": 450.5, "availability": false }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["data"]["id"], 1);
    assert_eq!(body["data"]["name"], "Curved Monitor");
    assert_eq!(body["data"]["price"], 450.5);
    assert_eq!(body["data"]["availability"], false);
}

#[tokio::test]
async fn test_update_product_requires_availability() {
    let app = app();
    create(&app, json!({ "name": "Monitor", "price": 300 })).await;

    let response = app
        .oneshot(json_request("PUT", "/1", json!({ "name": "Monitor", "price": 300 })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response).await;
    assert_eq!(body["errors"][0]["field"], "availability");
}

#[tokio::test]
async fn test_update_product_not_found() {
    let response = app()
        .oneshot(json_request(
            "PUT",
            "/7",
            json!({ "name": "Ghost", "price": 1, "availability": true }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_patch_toggles_only_availability() {
    let app = app();
    create(&app, json!({ "name": "Monitor", "price": 300 })).await;

    let response = app
        .clone()
        .oneshot(empty_request("PATCH", "/1"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["data"]["availability"], false);
    assert_eq!(body["data"]["name"], "Monitor");
    assert_eq!(body["data"]["price"], 300.0);

    let response = app.oneshot(empty_request("PATCH", "/1")).await.unwrap();
    let body = json_body(response).await;
    assert_eq!(body["data"]["availability"], true);
}

#[tokio::test]
async fn test_patch_not_found() {
    let response = app().oneshot(empty_request("PATCH", "/3")).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_product_then_not_found() {
    let app = app();
    create(&app, json!({ "name": "Monitor", "price": 300 })).await;

    let response = app
        .clone()
        .oneshot(empty_request("DELETE", "/1"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, json!({ "data": "Product deleted" }));

    let response = app.oneshot(empty_request("GET", "/1")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_product_invalid_id() {
    let response = app()
        .oneshot(empty_request("DELETE", "/1.5"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_disconnected_database_returns_service_unavailable() {
    let repository = PgProductRepository::new(DatabaseHandle::new());
    let app = handlers::router(ProductService::new(repository));

    let response = app.oneshot(empty_request("GET", "/")).await.unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body = json_body(response).await;
    assert_eq!(body["error"], "SERVICE_UNAVAILABLE");
}
