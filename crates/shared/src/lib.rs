//! Shared configuration and response types for FleetPay.
//!
//! This crate provides common pieces used across all other crates:
//! - Application configuration loading
//! - The `{success, data|error}` response envelope every boundary
//!   operation returns

pub mod config;
pub mod response;

pub use config::{AppConfig, OverdraftPolicy};
pub use response::{ApiResponse, ErrorBody};
