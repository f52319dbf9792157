//! Cash account routes.

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use rust_decimal::Decimal;
use serde::Deserialize;

use fleetpay_engine::CashAccount;
use fleetpay_shared::ApiResponse;

use crate::AppState;
use crate::error::ApiError;

/// Cash account routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/cash-accounts", get(list).post(create))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateAccountBody {
    name: String,
    #[serde(default)]
    opening_balance: Decimal,
}

async fn list(State(state): State<AppState>) -> Json<ApiResponse<Vec<CashAccount>>> {
    Json(ApiResponse::ok(state.engine.list_cash_accounts()))
}

async fn create(
    State(state): State<AppState>,
    Json(body): Json<CreateAccountBody>,
) -> Result<(StatusCode, Json<ApiResponse<CashAccount>>), ApiError> {
    let account = state
        .engine
        .create_cash_account(&body.name, body.opening_balance)?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(account))))
}
