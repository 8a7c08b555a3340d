//! Tour booking pricing and availability service.
//!
//! Pure pricing and calendar logic lives in [`pricing`] and [`availability`];
//! [`catalog`] holds the mocked tour data and the HTTP routes expose all of it
//! as JSON for the website and admin dashboard.

pub mod availability;
pub mod catalog;
pub mod config;
pub mod error;
pub mod pricing;

use std::sync::Arc;

use axum::{http::HeaderValue, routing::get, Json, Router};
use serde_json::{json, Value};
use tokio::sync::RwLock;
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use crate::catalog::TourCatalog;
use crate::config::AppConfig;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Tours and their calendars; writers hold the lock for the whole update
    pub catalog: Arc<RwLock<TourCatalog>>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(catalog: TourCatalog, config: AppConfig) -> Self {
        Self {
            catalog: Arc::new(RwLock::new(catalog)),
            config: Arc::new(config),
        }
    }
}

/// Build the application router with middleware
pub fn app(state: AppState) -> Router {
    let origins: Vec<HeaderValue> = state
        .config
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .merge(catalog::router())
        .merge(pricing::router())
        .merge(availability::router())
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok", "version": env!("CARGO_PKG_VERSION") }))
}
