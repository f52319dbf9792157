//! FleetPay HTTP API.
//!
//! Wires the payment engine behind `/api/v1` routes. Every response,
//! success or failure, is wrapped in the `ApiResponse` envelope from
//! `fleetpay-shared`.

pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use fleetpay_engine::PaymentEngine;

/// Shared application state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    /// The payment engine.
    pub engine: Arc<PaymentEngine>,
}

impl AppState {
    /// Creates state around an engine.
    #[must_use]
    pub fn new(engine: PaymentEngine) -> Self {
        Self {
            engine: Arc::new(engine),
        }
    }
}

/// Builds the application router.
#[must_use]
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
