//! Health check endpoint

use axum::{extract::State, routing::get, Json, Router};
use charades_common::CatalogCounts;
use serde::Serialize;

use crate::AppState;

/// Health check response with loaded item counts per category
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub module: String,
    pub version: String,
    pub counts: CatalogCounts,
    pub total: usize,
}

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let counts = state.catalog().counts();
    Json(HealthResponse {
        status: "ok".to_string(),
        module: "charades-server".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        counts,
        total: counts.total(),
    })
}

/// Build health check routes
pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
