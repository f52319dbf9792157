//! Check workflow service for disbursement state transitions.

use chrono::Utc;
use rust_decimal::Decimal;

use crate::check::error::CheckError;
use crate::check::types::{CheckAction, CheckStatus, CreateCheckInput};

/// Stateless service for check workflow transitions.
pub struct CheckWorkflow;

impl CheckWorkflow {
    /// Validate a check create request.
    ///
    /// # Arguments
    /// * `input` - The create input
    /// * `has_link` - Whether a linked payment id was supplied
    ///
    /// # Errors
    ///
    /// * `CheckError::LinkRequired` for purchase/general without a link
    /// * `CheckError::LinkNotPermitted` for petty-cash/fuel with a link
    /// * `CheckError::NonPositiveAmount` / `CheckError::PayeeRequired`
    pub fn validate_create(input: &CreateCheckInput, has_link: bool) -> Result<(), CheckError> {
        if input.kind.requires_linked_payment() && !has_link {
            return Err(CheckError::LinkRequired(input.kind));
        }
        if !input.kind.requires_linked_payment() && has_link {
            return Err(CheckError::LinkNotPermitted(input.kind));
        }
        if input.amount <= Decimal::ZERO {
            return Err(CheckError::NonPositiveAmount);
        }
        if input.payee.trim().is_empty() {
            return Err(CheckError::PayeeRequired);
        }
        Ok(())
    }

    /// Update the status of a check request.
    ///
    /// Only the approval-side transitions are reachable here; `paid`
    /// must go through [`CheckWorkflow::pay`].
    ///
    /// # Errors
    ///
    /// * `CheckError::PaidViaSetStatus` if `paid` is requested
    /// * `CheckError::InvalidTransition` for edges not on the graph
    pub fn set_status(
        current_status: CheckStatus,
        new_status: CheckStatus,
    ) -> Result<CheckAction, CheckError> {
        if new_status == CheckStatus::Paid {
            return Err(CheckError::PaidViaSetStatus);
        }
        if !Self::is_valid_transition(current_status, new_status) {
            return Err(CheckError::InvalidTransition {
                from: current_status,
                to: new_status,
            });
        }
        Ok(CheckAction::SetStatus { new_status })
    }

    /// Pay an approved check request.
    ///
    /// # Errors
    ///
    /// Returns `CheckError::InvalidTransition` unless currently approved.
    pub fn pay(current_status: CheckStatus) -> Result<CheckAction, CheckError> {
        match current_status {
            CheckStatus::Approved => Ok(CheckAction::Pay {
                new_status: CheckStatus::Paid,
                paid_at: Utc::now(),
            }),
            _ => Err(CheckError::InvalidTransition {
                from: current_status,
                to: CheckStatus::Paid,
            }),
        }
    }

    /// Check if a status transition is valid.
    ///
    /// Valid transitions:
    /// - Pending → Approved (approve)
    /// - Pending → Rejected (reject)
    /// - Approved → Rejected (reject)
    /// - Approved → Paid (pay)
    /// - Rejected → Pending (appeal)
    #[must_use]
    pub fn is_valid_transition(from: CheckStatus, to: CheckStatus) -> bool {
        matches!(
            (from, to),
            (CheckStatus::Pending, CheckStatus::Approved)
                | (
                    CheckStatus::Pending | CheckStatus::Approved,
                    CheckStatus::Rejected
                )
                | (CheckStatus::Approved, CheckStatus::Paid)
                | (CheckStatus::Rejected, CheckStatus::Pending)
        )
    }
}
