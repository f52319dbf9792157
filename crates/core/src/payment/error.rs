//! Payment error types for the request lifecycle.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::payment::types::PaymentStatus;
use crate::suspense::SuspenseError;

/// Errors that can occur during payment workflow operations.
#[derive(Debug, Error)]
pub enum PaymentError {
    /// Attempted an invalid status transition.
    #[error("Invalid status transition from {from} to {to}")]
    InvalidTransition {
        /// The current status.
        from: PaymentStatus,
        /// The attempted target status.
        to: PaymentStatus,
    },

    /// Rejection reason is required but not provided.
    #[error("Rejection reason is required")]
    RejectionReasonRequired,

    /// A required field is missing for the declared payment kind.
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// An amount field must be strictly positive.
    #[error("Field {field} must be a positive amount")]
    NonPositiveAmount {
        /// The offending field.
        field: &'static str,
    },

    /// Transporter-submitted requests must name a vehicle.
    #[error("Vehicle is required for transporter-submitted requests")]
    VehicleRequired,

    /// Vehicle maintenance line items do not sum to the declared amount.
    #[error(
        "Vehicle maintenance lines sum to {lines_total} but the payable amount is {declared}"
    )]
    MaintenanceSumMismatch {
        /// The amount the payment declares.
        declared: Decimal,
        /// The sum of the line item amounts.
        lines_total: Decimal,
    },

    /// The request is already on the check path.
    #[error("Payment is already a check payment")]
    AlreadyCheckPayment,

    /// Suspense settlement failed.
    #[error(transparent)]
    Suspense(#[from] SuspenseError),
}

impl PaymentError {
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
            Self::RejectionReasonRequired
            | Self::MissingField(_)
            | Self::NonPositiveAmount { .. }
            | Self::VehicleRequired
            | Self::MaintenanceSumMismatch { .. }
            | Self::AlreadyCheckPayment
            | Self::Suspense(_) => "VALIDATION_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_invalid_transition_error() {
        let err = PaymentError::InvalidTransition {
            from: PaymentStatus::Paid,
            to: PaymentStatus::Approved,
        };
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.error_code(), "INVALID_TRANSITION");
        assert!(err.to_string().contains("paid"));
        assert!(err.to_string().contains("approved"));
    }

    #[test]
    fn test_validation_errors_share_a_code() {
        assert_eq!(
            PaymentError::RejectionReasonRequired.error_code(),
            "VALIDATION_ERROR"
        );
        assert_eq!(
            PaymentError::MissingField("to").error_code(),
            "VALIDATION_ERROR"
        );
        assert_eq!(
            PaymentError::MaintenanceSumMismatch {
                declared: dec!(500),
                lines_total: dec!(450),
            }
            .error_code(),
            "VALIDATION_ERROR"
        );
        assert_eq!(
            PaymentError::Suspense(SuspenseError::ReturnAmountRequired).error_code(),
            "VALIDATION_ERROR"
        );
    }

    #[test]
    fn test_maintenance_mismatch_display() {
        let err = PaymentError::MaintenanceSumMismatch {
            declared: dec!(500),
            lines_total: dec!(450),
        };
        assert!(err.to_string().contains("450"));
        assert!(err.to_string().contains("500"));
    }
}
