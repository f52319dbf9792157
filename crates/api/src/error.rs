//! Engine-to-HTTP error mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use fleetpay_engine::EngineError;
use fleetpay_shared::ApiResponse;

/// Wraps [`EngineError`] so handlers can use `?` and still produce the
/// envelope on the error path.
#[derive(Debug)]
pub struct ApiError(pub EngineError);

impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        if status.is_server_error() {
            tracing::error!(error = %self.0, "request failed");
        } else {
            tracing::debug!(error = %self.0, "request rejected");
        }
        let body: ApiResponse<()> = ApiResponse::err(self.0.error_code(), self.0.to_string());
        (status, Json(body)).into_response()
    }
}
