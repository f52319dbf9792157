//! Check request routes.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use uuid::Uuid;

use fleetpay_core::check::{CheckRequest, CheckStatus, CreateCheckInput, PayCheckFields};
use fleetpay_shared::ApiResponse;

use crate::AppState;
use crate::error::ApiError;

/// Check request routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/check-requests", post(create))
        .route("/check-requests/{id}", get(get_one))
        .route("/check-requests/{id}/status", post(set_status))
        .route("/check-requests/{id}/pay", post(pay))
}

/// Create body: the check fields plus an optional linked payment
/// request. Purchase and general checks require the link; petty-cash
/// and fuel checks refuse it.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateCheckBody {
    #[serde(flatten)]
    input: CreateCheckInput,
    payment_request_id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
struct SetStatusBody {
    status: CheckStatus,
}

async fn create(
    State(state): State<AppState>,
    Json(body): Json<CreateCheckBody>,
) -> Result<(StatusCode, Json<ApiResponse<CheckRequest>>), ApiError> {
    let check = state.engine.create_check(body.input, body.payment_request_id)?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(check))))
}

async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<CheckRequest>>, ApiError> {
    let check = state.engine.get_check(id)?;
    Ok(Json(ApiResponse::ok(check)))
}

async fn set_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<SetStatusBody>,
) -> Result<Json<ApiResponse<CheckRequest>>, ApiError> {
    let check = state.engine.set_check_status(id, body.status)?;
    Ok(Json(ApiResponse::ok(check)))
}

async fn pay(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(fields): Json<PayCheckFields>,
) -> Result<Json<ApiResponse<CheckRequest>>, ApiError> {
    let check = state.engine.pay_check(id, &fields)?;
    Ok(Json(ApiResponse::ok(check)))
}
