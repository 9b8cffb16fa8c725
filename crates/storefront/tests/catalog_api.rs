//! Catalog JSON API, health check and middleware tests.

#![allow(clippy::unwrap_used)]

mod common;

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use common::{body_json, body_string, get, test_app};
use serde_json::Value;
use tower::ServiceExt;

fn names(body: &Value) -> Vec<&str> {
    body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap())
        .collect()
}

#[tokio::test]
async fn test_list_defaults() {
    let (app, _) = test_app();
    let response = get(&app, "/api/products").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["meta"]["page"], 1);
    assert_eq!(body["meta"]["limit"], 20);
    assert_eq!(body["meta"]["totalItems"], 6);
    assert_eq!(body["meta"]["totalPages"], 1);
    assert_eq!(names(&body).first(), Some(&"Laptop HP Pavilion"));

    let first = &body["data"][0];
    assert_eq!(first["slug"], "laptop-hp-pavilion");
    assert_eq!(first["category"], "Electronics");
    assert_eq!(first["price"]["currency"], "USD");
}

#[tokio::test]
async fn test_list_by_category_ignores_case() {
    let (app, _) = test_app();
    let body = body_json(get(&app, "/api/products?category=electronics").await).await;
    assert_eq!(body["meta"]["totalItems"], 4);
    assert!(!names(&body).contains(&"Coffee Maker Deluxe"));
}

#[tokio::test]
async fn test_list_by_price_range() {
    let (app, _) = test_app();
    let body = body_json(get(&app, "/api/products?min_price=100&max_price=300").await).await;
    assert_eq!(
        names(&body),
        ["Coffee Maker Deluxe", "Running Shoes Pro", "Smart Watch"]
    );
}

#[tokio::test]
async fn test_list_search_and_sort() {
    let (app, _) = test_app();
    let body = body_json(get(&app, "/api/products?search=PRO&sort=price&order=desc").await).await;
    assert_eq!(names(&body), ["iPhone 15 Pro", "Running Shoes Pro"]);
}

#[tokio::test]
async fn test_list_pagination() {
    let (app, _) = test_app();
    let body = body_json(get(&app, "/api/products?limit=4&page=2").await).await;
    assert_eq!(names(&body), ["Wireless Headphones", "Smart Watch"]);
    assert_eq!(body["meta"]["totalPages"], 2);

    let body = body_json(get(&app, "/api/products?limit=4&page=3").await).await;
    assert!(names(&body).is_empty());
    assert_eq!(body["meta"]["totalItems"], 6);
}

#[tokio::test]
async fn test_list_rejects_bad_queries() {
    let (app, _) = test_app();

    let response = get(&app, "/api/products?sort=color").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["errorCode"], "invalid_sort_field");

    let response = get(&app, "/api/products?min_price=500&max_price=100").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["errorCode"], "invalid_price_range");

    let response = get(&app, "/api/products?limit=many").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["errorCode"], "bad_request");
}

#[tokio::test]
async fn test_show_product() {
    let (app, _) = test_app();
    let response = get(&app, "/api/products/3").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let product = &body["data"];
    assert_eq!(product["name"], "Coffee Maker Deluxe");
    assert_eq!(product["categories"], serde_json::json!(["Home"]));
    assert_eq!(product["isActive"], true);
    let price = product["price"]["amount"].as_f64().unwrap();
    assert!((price - 159.99).abs() < 1e-9);
}

#[tokio::test]
async fn test_show_missing_or_malformed_product() {
    let (app, _) = test_app();

    let response = get(&app, "/api/products/99").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["status"], 404);
    assert_eq!(body["message"], "Product 99 not found");

    let response = get(&app, "/api/products/coffee").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_health() {
    let (app, _) = test_app();
    let response = get(&app, "/health").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "ok");
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let (app, _) = test_app();
    let response = app
        .oneshot(
            Request::get("/health")
                .header("x-request-id", "req-42")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.headers()["x-request-id"], "req-42");
}

#[tokio::test]
async fn test_security_headers_on_every_route() {
    let (app, _) = test_app();
    for uri in ["/", "/health", "/api/products"] {
        let response = get(&app, uri).await;
        let csp = response.headers()["content-security-policy"].to_str().unwrap();
        assert!(csp.contains("https://via.placeholder.com"), "{uri}");
        assert_eq!(response.headers()["x-frame-options"], "DENY");
    }
}
