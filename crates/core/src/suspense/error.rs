//! Error types for suspense settlement.

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that can occur while settling a suspense advance.
#[derive(Debug, Error)]
pub enum SuspenseError {
    /// The return amount is required to settle an advance.
    #[error("Return amount is required to settle a suspense advance")]
    ReturnAmountRequired,

    /// The return amount is negative.
    #[error("Return amount {returned} must not be negative")]
    NegativeReturnAmount {
        /// The submitted return amount.
        returned: Decimal,
    },

    /// The return exceeds the advance, producing a negative settlement.
    #[error("Return amount {returned} exceeds suspense advance {advance}")]
    NegativeSettlement {
        /// The original advance.
        advance: Decimal,
        /// The submitted return amount.
        returned: Decimal,
    },
}

impl SuspenseError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        400
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        "VALIDATION_ERROR"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_error_codes() {
        assert_eq!(SuspenseError::ReturnAmountRequired.status_code(), 400);
        assert_eq!(
            SuspenseError::ReturnAmountRequired.error_code(),
            "VALIDATION_ERROR"
        );
    }

    #[test]
    fn test_error_display() {
        let err = SuspenseError::NegativeSettlement {
            advance: dec!(1000),
            returned: dec!(1200),
        };
        assert!(err.to_string().contains("1200"));
        assert!(err.to_string().contains("1000"));
    }
}
