//! Payment workflow service for request state transitions.
//!
//! This module implements the core state machine for moving payment
//! requests through the approval workflow. All methods are associated
//! functions that validate a transition and return a value describing
//! it (a `PaymentAction`, or a `Settlement` for pay); applying it (and
//! its ledger side effects) is the engine's job.

use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::payment::error::PaymentError;
use crate::payment::types::{
    MaintenanceLine, Payment, PaymentAction, PaymentKind, PaymentStatus, Settlement,
    VEHICLE_MAINTENANCE,
};
use crate::payment::validation::validate_maintenance_sum;
use crate::suspense::SuspenseReconciler;

/// Pay-time fields supplied by the cashier.
#[derive(Debug, Clone, Default)]
pub struct PayFields {
    /// Cash handed back, settling a suspense advance.
    pub return_amount: Option<Decimal>,
    /// Maintenance lines submitted at pay time, merged into the request.
    pub maintenance_lines: Vec<MaintenanceLine>,
    /// Receipt reference captured at pay time.
    pub receipt_reference: Option<String>,
}

/// Stateless service for payment workflow transitions.
pub struct PaymentWorkflow;

impl PaymentWorkflow {
    /// Approve a request awaiting approval.
    ///
    /// Both `requested` and `suspence` are awaiting-approval states;
    /// suspense advances are approved directly from their initial state.
    ///
    /// # Errors
    ///
    /// Returns `PaymentError::InvalidTransition` from any other state.
    pub fn approve(
        current_status: PaymentStatus,
        approved_by: Uuid,
    ) -> Result<PaymentAction, PaymentError> {
        if current_status.is_awaiting_approval() {
            Ok(PaymentAction::Approve {
                new_status: PaymentStatus::Approved,
                approved_by,
                approved_at: Utc::now(),
            })
        } else {
            Err(PaymentError::InvalidTransition {
                from: current_status,
                to: PaymentStatus::Approved,
            })
        }
    }

    /// Reject a request from any non-terminal state except `paid`.
    ///
    /// # Errors
    ///
    /// * `PaymentError::RejectionReasonRequired` if the reason is empty
    /// * `PaymentError::InvalidTransition` from `paid` or `rejected`
    pub fn reject(
        current_status: PaymentStatus,
        rejected_by: Uuid,
        rejected_reason: String,
    ) -> Result<PaymentAction, PaymentError> {
        if rejected_reason.trim().is_empty() {
            return Err(PaymentError::RejectionReasonRequired);
        }

        match current_status {
            PaymentStatus::Requested | PaymentStatus::Suspense | PaymentStatus::Approved => {
                Ok(PaymentAction::Reject {
                    new_status: PaymentStatus::Rejected,
                    rejected_by,
                    rejected_at: Utc::now(),
                    rejected_reason,
                })
            }
            PaymentStatus::Paid | PaymentStatus::Rejected => {
                Err(PaymentError::InvalidTransition {
                    from: current_status,
                    to: PaymentStatus::Rejected,
                })
            }
        }
    }

    /// Reopen a rejected request for another approval round.
    ///
    /// # Errors
    ///
    /// Returns `PaymentError::InvalidTransition` unless currently rejected.
    pub fn appeal(current_status: PaymentStatus) -> Result<PaymentAction, PaymentError> {
        match current_status {
            PaymentStatus::Rejected => Ok(PaymentAction::Appeal {
                new_status: PaymentStatus::Requested,
            }),
            _ => Err(PaymentError::InvalidTransition {
                from: current_status,
                to: PaymentStatus::Requested,
            }),
        }
    }

    /// Validate paying an approved request and compute its effects.
    ///
    /// Determines the effective amount to debit (reconciling suspense
    /// advances against the returned cash), merges pay-time maintenance
    /// lines, and re-validates the line sum for vehicle maintenance
    /// requests. No state is mutated here.
    ///
    /// # Errors
    ///
    /// * `PaymentError::InvalidTransition` unless currently approved
    /// * `PaymentError::MissingField` if the amount for the kind is absent
    /// * `PaymentError::Suspense` on settlement failures
    /// * `PaymentError::MaintenanceSumMismatch` if lines do not add up
    pub fn pay(payment: &Payment, fields: &PayFields) -> Result<Settlement, PaymentError> {
        if payment.status != PaymentStatus::Approved {
            return Err(PaymentError::InvalidTransition {
                from: payment.status,
                to: PaymentStatus::Paid,
            });
        }

        let return_amount = fields.return_amount.or(payment.return_amount);
        let effective_amount = match payment.kind {
            PaymentKind::SuspensePayment => {
                let advance = payment
                    .suspense_amount
                    .ok_or(PaymentError::MissingField("suspenceAmount"))?;
                SuspenseReconciler::settle(advance, return_amount)?
            }
            _ => payment.amount.ok_or(PaymentError::MissingField("amount"))?,
        };

        let mut merged_lines = payment.maintenance_lines.clone();
        merged_lines.extend(fields.maintenance_lines.iter().cloned());

        if payment.category == VEHICLE_MAINTENANCE {
            validate_maintenance_sum(&merged_lines, effective_amount)?;
        }

        Ok(Settlement {
            paid_at: Utc::now(),
            effective_amount,
            merged_lines,
            return_amount: match payment.kind {
                PaymentKind::SuspensePayment => return_amount,
                _ => None,
            },
        })
    }

    /// Redirect a cash-path request to the check path.
    ///
    /// Changes only the kind; status is untouched.
    ///
    /// # Errors
    ///
    /// Returns `PaymentError::AlreadyCheckPayment` if already converted.
    pub fn convert_to_check(current_kind: PaymentKind) -> Result<PaymentAction, PaymentError> {
        if current_kind == PaymentKind::CheckPayment {
            return Err(PaymentError::AlreadyCheckPayment);
        }
        Ok(PaymentAction::ConvertToCheck {
            new_kind: PaymentKind::CheckPayment,
        })
    }

    /// Check if a status transition is valid.
    ///
    /// Valid transitions:
    /// - Requested → Approved (approve)
    /// - Suspence → Approved (approve)
    /// - Requested/Suspence/Approved → Rejected (reject)
    /// - Approved → Paid (pay)
    /// - Rejected → Requested (appeal)
    #[must_use]
    pub fn is_valid_transition(from: PaymentStatus, to: PaymentStatus) -> bool {
        matches!(
            (from, to),
            (
                PaymentStatus::Requested | PaymentStatus::Suspense,
                PaymentStatus::Approved | PaymentStatus::Rejected
            ) | (
                PaymentStatus::Approved,
                PaymentStatus::Paid | PaymentStatus::Rejected
            ) | (PaymentStatus::Rejected, PaymentStatus::Requested)
        )
    }
}
