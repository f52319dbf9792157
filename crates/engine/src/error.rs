//! Engine error taxonomy.
//!
//! Wraps the domain rule errors from `fleetpay-core` and adds the
//! storage-level failures the engine itself can produce: missing
//! entities, overdrafts, broken links, and aborted atomic units.

use rust_decimal::Decimal;
use thiserror::Error;
use uuid::Uuid;

use fleetpay_core::check::CheckError;
use fleetpay_core::payment::PaymentError;

/// Errors produced by the payment engine.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A payment workflow rule was violated.
    #[error(transparent)]
    Payment(#[from] PaymentError),

    /// A check workflow rule was violated.
    #[error(transparent)]
    Check(#[from] CheckError),

    /// No payment request with the given id exists.
    #[error("Payment request {0} not found")]
    PaymentNotFound(Uuid),

    /// No check request with the given id exists.
    #[error("Check request {0} not found")]
    CheckNotFound(Uuid),

    /// No cash account with the given id exists.
    #[error("Cash account {0} not found")]
    AccountNotFound(Uuid),

    /// A check carries no linked payment request to disburse.
    #[error("Check request {0} has no linked payment request")]
    LinkedPaymentNotFound(Uuid),

    /// A cash account with this name already exists.
    #[error("Cash account named {0:?} already exists")]
    DuplicateAccountName(String),

    /// The payment request already has a paired check request.
    #[error("Payment request {payment_id} is already linked to check request {check_request_id}")]
    PaymentAlreadyLinked {
        /// The payment request carrying the existing link.
        payment_id: Uuid,
        /// The check request it is already paired with.
        check_request_id: Uuid,
    },

    /// The debit would drive the account balance below zero.
    #[error("Debit of {requested} would overdraw cash account {account_id} (balance {balance})")]
    Overdraft {
        /// The account that would be overdrawn.
        account_id: Uuid,
        /// The balance before the debit.
        balance: Decimal,
        /// The amount requested.
        requested: Decimal,
    },

    /// A paired check/payment write could not be completed; the partial
    /// write was undone.
    #[error("Failed to link check request and payment request: {source}")]
    LinkFailure {
        /// The underlying failure.
        source: Box<EngineError>,
    },

    /// A multi-step atomic unit failed partway; completed steps were
    /// compensated in reverse order.
    #[error("Transaction aborted at step `{step}`: {source}")]
    Aborted {
        /// The step that failed.
        step: &'static str,
        /// The root cause.
        source: Box<EngineError>,
    },
}

impl EngineError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Payment(e) => e.status_code(),
            Self::Check(e) => e.status_code(),
            Self::PaymentNotFound(_)
            | Self::CheckNotFound(_)
            | Self::AccountNotFound(_)
            | Self::LinkedPaymentNotFound(_) => 404,
            Self::DuplicateAccountName(_) | Self::PaymentAlreadyLinked { .. } => 409,
            Self::Overdraft { .. } | Self::LinkFailure { .. } => 422,
            // An aborted unit surfaces with the status of its root cause.
            Self::Aborted { source, .. } => source.status_code(),
        }
    }

    /// Returns the error code for API responses.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Payment(e) => e.error_code(),
            Self::Check(e) => e.error_code(),
            Self::PaymentNotFound(_)
            | Self::CheckNotFound(_)
            | Self::AccountNotFound(_)
            | Self::LinkedPaymentNotFound(_) => "NOT_FOUND",
            Self::DuplicateAccountName(_) | Self::PaymentAlreadyLinked { .. } => "CONFLICT",
            Self::Overdraft { .. } => "OVERDRAFT",
            Self::LinkFailure { .. } => "LINK_FAILURE",
            Self::Aborted { .. } => "TRANSACTION_ABORTED",
        }
    }
}
