//! Route registration.
//!
//! # Modules
//!
//! - `health` - Liveness probe
//! - `payments` - Payment request lifecycle
//! - `check_requests` - Check request lifecycle
//! - `cash_accounts` - Cash account management

pub mod cash_accounts;
pub mod check_requests;
pub mod health;
pub mod payments;

use axum::Router;

use crate::AppState;

/// All `/api/v1` routes.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(payments::routes())
        .merge(check_requests::routes())
        .merge(cash_accounts::routes())
}
