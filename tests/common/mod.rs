#![allow(dead_code)]

use std::str::FromStr;

use axum::body::Body;
use axum::http::{header::CONTENT_TYPE, Method, Request, Response, StatusCode};
use axum::Router;
use rust_decimal::Decimal;
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use tour_booking::catalog::{TourCatalog, TourFilter};
use tour_booking::config::AppConfig;
use tour_booking::{app, AppState};

/// Build the full application over the sample catalog.
///
/// Returns the router and the id of the flagship Alps tour, whose pricing
/// carries the peak season, summer sale and group tier.
pub fn build_test_app() -> (Router, Uuid) {
    let catalog = TourCatalog::with_sample_tours();
    let filter = TourFilter {
        keyword: Some("Alps".to_string()),
        ..TourFilter::default()
    };
    let flagship = catalog.list(&filter)[0].id;

    let config = AppConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        ..AppConfig::default()
    };
    (app(AppState::new(catalog, config)), flagship)
}

pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    app.clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn send_json(app: &Router, method: Method, uri: &str, body: Value) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

pub async fn post_json(app: &Router, uri: &str, body: Value) -> Response<Body> {
    send_json(app, Method::POST, uri, body).await
}

pub async fn put_json(app: &Router, uri: &str, body: Value) -> Response<Body> {
    send_json(app, Method::PUT, uri, body).await
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Assert the status and return the JSON body
pub async fn expect_json(response: Response<Body>, status: StatusCode) -> Value {
    assert_eq!(response.status(), status);
    body_json(response).await
}

/// Money amounts are serialized as strings; compare them as decimals
pub fn money(value: &Value) -> Decimal {
    let raw = value["amount"].as_str().unwrap();
    Decimal::from_str(raw).unwrap()
}
