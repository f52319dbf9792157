//! The payment engine.
//!
//! Owns the in-memory entity stores and drives the workflow services
//! from `fleetpay-core` over them. Same-entity transitions serialize on
//! the per-entry exclusive guard of the backing map, so the status a
//! transition validates against is the status it replaces. Multi-entity
//! writes (cash payment, check/payment linking) go through the
//! [`RollbackCoordinator`].
//!
//! Lock order, where an operation touches more than one store, is
//! check, then payment, then ledger.

use std::cell::Cell;

use chrono::Utc;
use dashmap::DashMap;
use rust_decimal::Decimal;
use tracing::{error, info};
use uuid::Uuid;

use fleetpay_core::check::{
    CheckAction, CheckKind, CheckRequest, CheckStatus, CheckWorkflow, CreateCheckInput,
    PayCheckFields,
};
use fleetpay_core::payment::{
    CreatePaymentInput, PayFields, Payment, PaymentAction, PaymentStatus, PaymentWorkflow,
    VEHICLE_MAINTENANCE,
    validation::{validate_create, validate_maintenance_sum},
};
use fleetpay_shared::config::{EngineConfig, OverdraftPolicy};

use crate::error::EngineError;
use crate::ledger::{CashAccount, CashAccountLedger};
use crate::rollback::{RollbackCoordinator, Step, StepFailure};
use crate::serial::{SerialNumberAllocator, VoucherClass};

/// Orchestrates payment and check lifecycles over in-memory stores.
#[derive(Debug, Default)]
pub struct PaymentEngine {
    payments: DashMap<Uuid, Payment>,
    checks: DashMap<Uuid, CheckRequest>,
    ledger: CashAccountLedger,
    serials: SerialNumberAllocator,
    overdraft_policy: OverdraftPolicy,
}

impl PaymentEngine {
    /// Creates an engine with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an engine from configuration.
    #[must_use]
    pub fn with_config(config: &EngineConfig) -> Self {
        Self {
            payments: DashMap::new(),
            checks: DashMap::new(),
            ledger: CashAccountLedger::new(),
            serials: SerialNumberAllocator::with_bases(
                config.payment_serial_base,
                config.check_serial_base,
            ),
            overdraft_policy: config.overdraft_policy,
        }
    }

    /// The cash account ledger.
    #[must_use]
    pub fn ledger(&self) -> &CashAccountLedger {
        &self.ledger
    }

    // ------------------------------------------------------------------
    // Payment requests
    // ------------------------------------------------------------------

    /// Creates a payment request in its kind's initial status.
    ///
    /// # Errors
    ///
    /// Returns a validation error when required fields for the kind are
    /// missing or non-positive.
    pub fn create_payment(&self, input: CreatePaymentInput) -> Result<Payment, EngineError> {
        validate_create(&input)?;

        let now = Utc::now();
        let payment = Payment {
            id: Uuid::new_v4(),
            kind: input.kind,
            category: input.category,
            status: input.kind.initial_status(),
            amount: input.amount,
            suspense_amount: input.suspense_amount,
            return_amount: None,
            quantity: input.quantity,
            payee: input.payee,
            reason: input.reason,
            receipt_reference: input.receipt_reference,
            related_receipt_url: None,
            serial_number: None,
            cash_account_id: None,
            check_request_id: None,
            requested_by: input.requested_by,
            approved_by: None,
            rejected_by: None,
            created_by: input.created_by,
            rejected_reason: None,
            vehicle_id: input.vehicle_id,
            maintenance_lines: input.maintenance_lines,
            created_at: now,
            updated_at: now,
        };

        info!(
            payment_id = %payment.id,
            kind = %payment.kind,
            status = %payment.status,
            "payment request created"
        );
        self.payments.insert(payment.id, payment.clone());
        Ok(payment)
    }

    /// Returns a snapshot of the payment request.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::PaymentNotFound` if no such request exists.
    pub fn get_payment(&self, id: Uuid) -> Result<Payment, EngineError> {
        self.payments
            .get(&id)
            .map(|p| p.value().clone())
            .ok_or(EngineError::PaymentNotFound(id))
    }

    /// Approves a payment request awaiting approval.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::PaymentNotFound` or an invalid-transition
    /// error.
    pub fn approve_payment(&self, id: Uuid, approved_by: Uuid) -> Result<Payment, EngineError> {
        let mut entry = self
            .payments
            .get_mut(&id)
            .ok_or(EngineError::PaymentNotFound(id))?;
        let payment = entry.value_mut();

        let action = PaymentWorkflow::approve(payment.status, approved_by)?;
        apply_payment_action(payment, action);
        info!(payment_id = %id, "payment request approved");
        Ok(payment.clone())
    }

    /// Rejects a payment request with a reason.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::PaymentNotFound`, a missing-reason
    /// validation error, or an invalid-transition error.
    pub fn reject_payment(
        &self,
        id: Uuid,
        rejected_by: Uuid,
        rejected_reason: String,
    ) -> Result<Payment, EngineError> {
        let mut entry = self
            .payments
            .get_mut(&id)
            .ok_or(EngineError::PaymentNotFound(id))?;
        let payment = entry.value_mut();

        let action = PaymentWorkflow::reject(payment.status, rejected_by, rejected_reason)?;
        apply_payment_action(payment, action);
        info!(payment_id = %id, "payment request rejected");
        Ok(payment.clone())
    }

    /// Reopens a rejected payment request.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::PaymentNotFound` or an invalid-transition
    /// error.
    pub fn appeal_payment(&self, id: Uuid) -> Result<Payment, EngineError> {
        let mut entry = self
            .payments
            .get_mut(&id)
            .ok_or(EngineError::PaymentNotFound(id))?;
        let payment = entry.value_mut();

        let action = PaymentWorkflow::appeal(payment.status)?;
        apply_payment_action(payment, action);
        info!(payment_id = %id, "payment request reopened on appeal");
        Ok(payment.clone())
    }

    /// Pays an approved payment request from a cash account.
    ///
    /// The debit and the record update form one atomic unit: if the
    /// debit is refused nothing changes, and the voucher serial is
    /// only allocated after the debit succeeds, so refused payments
    /// never leave gaps in the serial sequence.
    ///
    /// # Errors
    ///
    /// * `EngineError::PaymentNotFound` / `EngineError::AccountNotFound`
    /// * workflow errors from the pay validation
    /// * `EngineError::Overdraft` when the policy refuses the debit
    pub fn pay_payment(
        &self,
        id: Uuid,
        cash_account_id: Uuid,
        fields: &PayFields,
    ) -> Result<Payment, EngineError> {
        let mut entry = self
            .payments
            .get_mut(&id)
            .ok_or(EngineError::PaymentNotFound(id))?;
        let payment = entry.value_mut();

        let settlement = PaymentWorkflow::pay(payment, fields)?;
        if self.ledger.get(cash_account_id).is_none() {
            return Err(EngineError::AccountNotFound(cash_account_id));
        }

        let ledger = &self.ledger;
        let serials = &self.serials;
        let policy = self.overdraft_policy;
        let amount = settlement.effective_amount;
        let serial = Cell::new(0_i64);

        let steps = vec![
            Step::new(
                "debit cash account",
                move || ledger.debit(cash_account_id, amount, policy).map(|_| ()),
                move || {
                    if let Err(err) = ledger.credit(cash_account_id, amount) {
                        error!(
                            cash_account_id = %cash_account_id,
                            amount = %amount,
                            error = %err,
                            "debit compensation failed"
                        );
                    }
                },
            ),
            Step::irreversible("allocate payment voucher serial", || {
                serial.set(serials.next(VoucherClass::Payment));
                Ok(())
            }),
        ];
        RollbackCoordinator::run(steps).map_err(abort_error)?;

        payment.status = PaymentStatus::Paid;
        payment.serial_number = Some(serial.get());
        payment.cash_account_id = Some(cash_account_id);
        payment.return_amount = settlement.return_amount.or(payment.return_amount);
        payment.maintenance_lines = settlement.merged_lines;
        if fields.receipt_reference.is_some() {
            payment.receipt_reference = fields.receipt_reference.clone();
        }
        payment.updated_at = settlement.paid_at;

        info!(
            payment_id = %id,
            cash_account_id = %cash_account_id,
            amount = %amount,
            serial = serial.get(),
            "payment request paid"
        );
        Ok(payment.clone())
    }

    /// Redirects a cash-path payment request to the check path.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::PaymentNotFound` or a validation error if
    /// the request is already a check payment.
    pub fn convert_payment_to_check(&self, id: Uuid) -> Result<Payment, EngineError> {
        let mut entry = self
            .payments
            .get_mut(&id)
            .ok_or(EngineError::PaymentNotFound(id))?;
        let payment = entry.value_mut();

        let action = PaymentWorkflow::convert_to_check(payment.kind)?;
        apply_payment_action(payment, action);
        info!(payment_id = %id, "payment request converted to check payment");
        Ok(payment.clone())
    }

    // ------------------------------------------------------------------
    // Check requests
    // ------------------------------------------------------------------

    /// Creates a check request, linking it to a payment request where
    /// the kind requires one.
    ///
    /// Linked creation is atomic: if the back-link cannot be written
    /// the inserted check is removed and the whole operation fails with
    /// `EngineError::LinkFailure`.
    ///
    /// # Errors
    ///
    /// * validation errors (link required/forbidden, amount, payee)
    /// * `EngineError::LinkFailure` when the linked payment is missing
    ///   or already paired with another check
    pub fn create_check(
        &self,
        input: CreateCheckInput,
        linked_payment_id: Option<Uuid>,
    ) -> Result<CheckRequest, EngineError> {
        CheckWorkflow::validate_create(&input, linked_payment_id.is_some())?;

        let now = Utc::now();
        let check = CheckRequest {
            id: Uuid::new_v4(),
            kind: input.kind,
            amount: input.amount,
            check_number: input.check_number,
            bank: input.bank,
            notes: input.notes,
            payee: input.payee,
            reason: input.reason,
            issued_at: input.issued_at,
            status: CheckStatus::Pending,
            requested_by: input.requested_by,
            receipt_reference: None,
            related_receipt_url: None,
            created_at: now,
            updated_at: now,
        };

        if let Some(payment_id) = linked_payment_id {
            let checks = &self.checks;
            let payments = &self.payments;
            let check_id = check.id;
            let inserted = check.clone();

            let steps = vec![
                Step::new(
                    "insert check request",
                    move || {
                        checks.insert(check_id, inserted);
                        Ok(())
                    },
                    move || {
                        checks.remove(&check_id);
                    },
                ),
                Step::irreversible("write payment back-link", move || {
                    let mut payment = payments
                        .get_mut(&payment_id)
                        .ok_or(EngineError::PaymentNotFound(payment_id))?;
                    if let Some(existing) = payment.check_request_id {
                        return Err(EngineError::PaymentAlreadyLinked {
                            payment_id,
                            check_request_id: existing,
                        });
                    }
                    payment.check_request_id = Some(check_id);
                    payment.updated_at = Utc::now();
                    Ok(())
                }),
            ];
            RollbackCoordinator::run(steps).map_err(|failure| EngineError::LinkFailure {
                source: Box::new(failure.cause),
            })?;
            info!(
                check_id = %check.id,
                payment_id = %payment_id,
                "check request created and linked"
            );
        } else {
            info!(check_id = %check.id, kind = %check.kind, "check request created");
            self.checks.insert(check.id, check.clone());
        }

        Ok(check)
    }

    /// Returns a snapshot of the check request.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::CheckNotFound` if no such request exists.
    pub fn get_check(&self, id: Uuid) -> Result<CheckRequest, EngineError> {
        self.checks
            .get(&id)
            .map(|c| c.value().clone())
            .ok_or(EngineError::CheckNotFound(id))
    }

    /// Updates a check request's status along the approval edges.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::CheckNotFound` or workflow errors (`paid`
    /// is rejected here; use [`PaymentEngine::pay_check`]).
    pub fn set_check_status(
        &self,
        id: Uuid,
        new_status: CheckStatus,
    ) -> Result<CheckRequest, EngineError> {
        let mut entry = self
            .checks
            .get_mut(&id)
            .ok_or(EngineError::CheckNotFound(id))?;
        let check = entry.value_mut();

        let action = CheckWorkflow::set_status(check.status, new_status)?;
        check.status = action.new_status();
        check.updated_at = Utc::now();
        info!(check_id = %id, status = %check.status, "check request status updated");
        Ok(check.clone())
    }

    /// Pays an approved check request.
    ///
    /// Purchase and general checks settle their linked payment request:
    /// the payment is marked paid, receives a check-payment voucher
    /// serial and the pay-time receipt fields, and both records change
    /// together or not at all. Petty-cash and fuel checks instead
    /// replenish their dedicated cash account, creating it on first
    /// use.
    ///
    /// # Errors
    ///
    /// * `EngineError::CheckNotFound`
    /// * `EngineError::LinkedPaymentNotFound` for an unlinked
    ///   purchase/general check
    /// * a maintenance-sum mismatch when the linked payment's vehicle
    ///   maintenance lines do not cover the check amount
    /// * an invalid-transition error unless the check is approved
    pub fn pay_check(&self, id: Uuid, fields: &PayCheckFields) -> Result<CheckRequest, EngineError> {
        let mut entry = self
            .checks
            .get_mut(&id)
            .ok_or(EngineError::CheckNotFound(id))?;
        let check = entry.value_mut();

        let action = CheckWorkflow::pay(check.status)?;
        let paid_at = match action {
            CheckAction::Pay { paid_at, .. } => paid_at,
            CheckAction::SetStatus { .. } => Utc::now(),
        };

        match check.kind {
            CheckKind::Purchase | CheckKind::General => {
                let payment_id = {
                    let paired = self
                        .payments
                        .iter()
                        .find(|p| p.check_request_id == Some(id))
                        .ok_or(EngineError::LinkedPaymentNotFound(id))?;
                    if paired.category == VEHICLE_MAINTENANCE {
                        validate_maintenance_sum(&paired.maintenance_lines, check.amount)?;
                    }
                    *paired.key()
                };

                // Lookup and validation above are the only fallible parts;
                // everything past this point completes, keeping both
                // records in step.
                let serial = self.serials.next(VoucherClass::CheckPayment);
                if let Some(mut payment) = self.payments.get_mut(&payment_id) {
                    payment.status = PaymentStatus::Paid;
                    payment.serial_number = Some(serial);
                    if fields.receipt_reference.is_some() {
                        payment.receipt_reference = fields.receipt_reference.clone();
                    }
                    if fields.related_receipt_url.is_some() {
                        payment.related_receipt_url = fields.related_receipt_url.clone();
                    }
                    payment.updated_at = paid_at;
                }
                info!(
                    check_id = %id,
                    payment_id = %payment_id,
                    serial,
                    "check request paid, linked payment settled"
                );
            }
            CheckKind::PettyCash | CheckKind::Fuel => {
                if let Some(name) = check.kind.cash_account_name() {
                    let account = self.ledger.credit_by_name(name, check.amount);
                    info!(
                        check_id = %id,
                        account = %account.name,
                        balance = %account.balance,
                        "check request paid, cash account replenished"
                    );
                }
            }
        }

        check.status = CheckStatus::Paid;
        if fields.receipt_reference.is_some() {
            check.receipt_reference = fields.receipt_reference.clone();
        }
        if fields.related_receipt_url.is_some() {
            check.related_receipt_url = fields.related_receipt_url.clone();
        }
        check.updated_at = paid_at;
        Ok(check.clone())
    }

    // ------------------------------------------------------------------
    // Cash accounts
    // ------------------------------------------------------------------

    /// Creates a cash account with an opening balance.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::DuplicateAccountName` if the name is taken.
    pub fn create_cash_account(
        &self,
        name: &str,
        opening_balance: Decimal,
    ) -> Result<CashAccount, EngineError> {
        let account = self.ledger.create(name, opening_balance)?;
        info!(account_id = %account.id, name = %account.name, "cash account created");
        Ok(account)
    }

    /// Returns snapshots of all cash accounts, ordered by name.
    #[must_use]
    pub fn list_cash_accounts(&self) -> Vec<CashAccount> {
        self.ledger.list()
    }
}

/// Applies a validated workflow action to the stored record.
fn apply_payment_action(payment: &mut Payment, action: PaymentAction) {
    match action {
        PaymentAction::Approve {
            new_status,
            approved_by,
            approved_at,
        } => {
            payment.status = new_status;
            payment.approved_by = Some(approved_by);
            payment.updated_at = approved_at;
        }
        PaymentAction::Reject {
            new_status,
            rejected_by,
            rejected_at,
            rejected_reason,
        } => {
            payment.status = new_status;
            payment.rejected_by = Some(rejected_by);
            payment.rejected_reason = Some(rejected_reason);
            payment.updated_at = rejected_at;
        }
        PaymentAction::Appeal { new_status } => {
            payment.status = new_status;
            payment.rejected_by = None;
            payment.rejected_reason = None;
            payment.updated_at = Utc::now();
        }
        PaymentAction::ConvertToCheck { new_kind } => {
            payment.kind = new_kind;
            payment.updated_at = Utc::now();
        }
    }
}

/// Maps a step failure to the caller-facing error: the bare cause when
/// nothing had to be rolled back, an abort wrapper when compensations
/// ran.
fn abort_error(failure: StepFailure<EngineError>) -> EngineError {
    if failure.compensated == 0 {
        failure.cause
    } else {
        EngineError::Aborted {
            step: failure.step,
            source: Box::new(failure.cause),
        }
    }
}
