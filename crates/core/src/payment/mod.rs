//! Payment request lifecycle for FleetPay.
//!
//! This module implements the payment request state machine, field
//! validation for the different payment kinds, and the pay-time rules
//! (suspense reconciliation, maintenance line sums).
//!
//! # Modules
//!
//! - `types` - Payment domain types (PaymentKind, PaymentStatus, PaymentAction)
//! - `error` - Payment-specific error types
//! - `service` - State transition logic
//! - `validation` - Create-time field validation

pub mod error;
pub mod service;
pub mod types;
pub mod validation;

#[cfg(test)]
mod service_props;

pub use error::PaymentError;
pub use service::{PayFields, PaymentWorkflow};
pub use types::{
    CreatePaymentInput, MaintenanceLine, Payment, PaymentAction, PaymentKind, PaymentStatus,
    Settlement, VEHICLE_MAINTENANCE,
};
