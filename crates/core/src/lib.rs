//! Core business logic for FleetPay.
//!
//! This crate contains pure business logic with ZERO web or storage
//! dependencies. All domain types, state machines, and validation rules
//! live here.
//!
//! # Modules
//!
//! - `payment` - Payment request lifecycle (the cash path)
//! - `check` - Bank-check disbursement lifecycle
//! - `suspense` - Suspense advance reconciliation

pub mod check;
pub mod payment;
pub mod suspense;
