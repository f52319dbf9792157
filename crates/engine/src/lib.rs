//! FleetPay payment engine.
//!
//! Orchestrates the payment and check workflows from `fleetpay-core`
//! over in-memory entity stores: a cash account ledger, voucher serial
//! allocation, and rollback coordination for multi-entity writes.
//!
//! # Modules
//!
//! - `engine` - The [`PaymentEngine`] orchestrator
//! - `ledger` - Cash accounts and atomic balance mutation
//! - `serial` - Per-voucher-class serial number allocation
//! - `rollback` - Compensating-step coordinator for atomic units
//! - `error` - Engine error taxonomy

pub mod engine;
pub mod error;
pub mod ledger;
pub mod rollback;
pub mod serial;

pub use engine::PaymentEngine;
pub use error::EngineError;
pub use ledger::{CashAccount, CashAccountLedger};
pub use rollback::{RollbackCoordinator, Step, StepFailure};
pub use serial::{SerialNumberAllocator, VoucherClass};
