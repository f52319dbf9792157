//! Check error types for the disbursement lifecycle.

use thiserror::Error;

use crate::check::types::{CheckKind, CheckStatus};

/// Errors that can occur during check workflow operations.
#[derive(Debug, Error)]
pub enum CheckError {
    /// Attempted an invalid status transition.
    #[error("Invalid status transition from {from} to {to}")]
    InvalidTransition {
        /// The current status.
        from: CheckStatus,
        /// The attempted target status.
        to: CheckStatus,
    },

    /// Purchase/general checks must be paired with a payment request.
    #[error("Check requests of type {0} require a linked payment request")]
    LinkRequired(CheckKind),

    /// Petty-cash/fuel checks never carry a linked payment request.
    #[error("Check requests of type {0} do not take a linked payment request")]
    LinkNotPermitted(CheckKind),

    /// The check amount must be strictly positive.
    #[error("Check amount must be a positive amount")]
    NonPositiveAmount,

    /// The payee is required.
    #[error("Missing required field: to")]
    PayeeRequired,

    /// `paid` is only reachable through the pay operation.
    #[error("Check requests are paid through the pay operation, not a status update")]
    PaidViaSetStatus,
}

impl CheckError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        400
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidTransition { .. } => "INVALID_TRANSITION",
            Self::LinkRequired(_)
            | Self::LinkNotPermitted(_)
            | Self::NonPositiveAmount
            | Self::PayeeRequired
            | Self::PaidViaSetStatus => "VALIDATION_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_transition_error() {
        let err = CheckError::InvalidTransition {
            from: CheckStatus::Paid,
            to: CheckStatus::Pending,
        };
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.error_code(), "INVALID_TRANSITION");
    }

    #[test]
    fn test_link_errors_are_validation() {
        assert_eq!(
            CheckError::LinkRequired(CheckKind::Purchase).error_code(),
            "VALIDATION_ERROR"
        );
        assert_eq!(
            CheckError::LinkNotPermitted(CheckKind::Fuel).error_code(),
            "VALIDATION_ERROR"
        );
        assert_eq!(CheckError::PaidViaSetStatus.error_code(), "VALIDATION_ERROR");
    }
}
