//! Liveness probe.

use axum::routing::get;
use axum::{Json, Router};
use serde_json::{Value, json};

use crate::AppState;
use fleetpay_shared::ApiResponse;

/// Health routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health))
}

async fn health() -> Json<ApiResponse<Value>> {
    Json(ApiResponse::ok(json!({ "status": "ok" })))
}
