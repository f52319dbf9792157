//! Payment request routes.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;

use fleetpay_core::payment::{CreatePaymentInput, MaintenanceLine, PayFields, Payment};
use fleetpay_shared::ApiResponse;

use crate::AppState;
use crate::error::ApiError;

/// Payment request routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/payments", post(create))
        .route("/payments/{id}", get(get_one))
        .route("/payments/{id}/approve", post(approve))
        .route("/payments/{id}/reject", post(reject))
        .route("/payments/{id}/appeal", post(appeal))
        .route("/payments/{id}/pay", post(pay))
        .route("/payments/{id}/convert-to-check", post(convert_to_check))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApproveBody {
    approved_by: Uuid,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RejectBody {
    rejected_by: Uuid,
    reason: String,
}

/// Pay-time request body: which account to draw from plus the
/// settlement fields.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PayBody {
    cash_account_id: Uuid,
    return_amount: Option<Decimal>,
    #[serde(rename = "vehicleMaintenance", default)]
    maintenance_lines: Vec<MaintenanceLine>,
    #[serde(rename = "recept_reference")]
    receipt_reference: Option<String>,
}

async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreatePaymentInput>,
) -> Result<(StatusCode, Json<ApiResponse<Payment>>), ApiError> {
    let payment = state.engine.create_payment(input)?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(payment))))
}

async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Payment>>, ApiError> {
    let payment = state.engine.get_payment(id)?;
    Ok(Json(ApiResponse::ok(payment)))
}

async fn approve(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<ApproveBody>,
) -> Result<Json<ApiResponse<Payment>>, ApiError> {
    let payment = state.engine.approve_payment(id, body.approved_by)?;
    Ok(Json(ApiResponse::ok(payment)))
}

async fn reject(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<RejectBody>,
) -> Result<Json<ApiResponse<Payment>>, ApiError> {
    let payment = state.engine.reject_payment(id, body.rejected_by, body.reason)?;
    Ok(Json(ApiResponse::ok(payment)))
}

async fn appeal(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Payment>>, ApiError> {
    let payment = state.engine.appeal_payment(id)?;
    Ok(Json(ApiResponse::ok(payment)))
}

async fn pay(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<PayBody>,
) -> Result<Json<ApiResponse<Payment>>, ApiError> {
    let fields = PayFields {
        return_amount: body.return_amount,
        maintenance_lines: body.maintenance_lines,
        receipt_reference: body.receipt_reference,
    };
    let payment = state.engine.pay_payment(id, body.cash_account_id, &fields)?;
    Ok(Json(ApiResponse::ok(payment)))
}

async fn convert_to_check(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<Payment>>, ApiError> {
    let payment = state.engine.convert_payment_to_check(id)?;
    Ok(Json(ApiResponse::ok(payment)))
}
