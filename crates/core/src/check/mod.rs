//! Bank-check disbursement lifecycle for FleetPay.
//!
//! # Modules
//!
//! - `types` - Check domain types (CheckKind, CheckStatus, CheckAction)
//! - `error` - Check-specific error types
//! - `service` - State transition logic and create validation

pub mod error;
pub mod service;
pub mod types;

#[cfg(test)]
mod service_props;

pub use error::CheckError;
pub use service::CheckWorkflow;
pub use types::{
    CheckAction, CheckKind, CheckRequest, CheckStatus, CreateCheckInput, PayCheckFields,
};
