//! Suspense advance reconciliation.
//!
//! A suspense payment is a cash advance issued before the actual expense
//! is known. When the advance is settled, the unspent cash handed back is
//! subtracted from the advance; the remainder is what actually leaves the
//! cash account and what is printed on the settlement voucher.

pub mod error;

pub use error::SuspenseError;

use rust_decimal::Decimal;

/// Stateless reconciler for suspense settlements. Pure computation, no
/// side effects.
pub struct SuspenseReconciler;

impl SuspenseReconciler {
    /// Computes the effective amount of a settled suspense advance.
    ///
    /// # Arguments
    /// * `advance` - The original advance (`suspenceAmount`)
    /// * `returned` - The cash handed back at settlement
    ///
    /// # Returns
    /// * `Ok(effective)` where `effective = advance - returned`
    /// * `Err(SuspenseError::ReturnAmountRequired)` if `returned` is `None`
    /// * `Err(SuspenseError::NegativeSettlement)` if the result would be
    ///   negative
    pub fn settle(advance: Decimal, returned: Option<Decimal>) -> Result<Decimal, SuspenseError> {
        let returned = returned.ok_or(SuspenseError::ReturnAmountRequired)?;

        if returned < Decimal::ZERO {
            return Err(SuspenseError::NegativeReturnAmount { returned });
        }

        let effective = advance - returned;
        if effective < Decimal::ZERO {
            return Err(SuspenseError::NegativeSettlement { advance, returned });
        }

        Ok(effective)
    }
}
