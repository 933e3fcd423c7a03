//! HTTP routes for the liveness webserver

use axum::{routing::get, Json, Router};
use chrono::Utc;
use serde::Serialize;

use crate::version::VERSION;

/// Simple health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub version: String,
}

/// Create the router with all routes
pub fn create_router() -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
}

/// GET / - static liveness probe for uptime monitors
async fn root() -> &'static str {
    "RateBot is running"
}

/// GET /health
async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        timestamp: Utc::now(),
        version: VERSION.to_string(),
    })
}
