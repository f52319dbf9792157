//! Create-time field validation for payment requests.
//!
//! Each payment kind declares its own required fields; the transporter
//! role adds a vehicle requirement on top, and vehicle maintenance
//! requests must itemize exactly the declared amount.

use rust_decimal::Decimal;

use crate::payment::error::PaymentError;
use crate::payment::types::{CreatePaymentInput, MaintenanceLine, PaymentKind, VEHICLE_MAINTENANCE};

/// Validates a create request against the rules for its declared kind.
///
/// # Errors
///
/// Returns `PaymentError` describing the first missing or invalid field.
pub fn validate_create(input: &CreatePaymentInput) -> Result<(), PaymentError> {
    match input.kind {
        PaymentKind::SuspensePayment => {
            let advance = input
                .suspense_amount
                .ok_or(PaymentError::MissingField("suspenceAmount"))?;
            if advance <= Decimal::ZERO {
                return Err(PaymentError::NonPositiveAmount {
                    field: "suspenceAmount",
                });
            }
        }
        PaymentKind::ReceiptPayment | PaymentKind::CheckPayment | PaymentKind::BankTransfer => {
            let amount = input.amount.ok_or(PaymentError::MissingField("amount"))?;
            if amount <= Decimal::ZERO {
                return Err(PaymentError::NonPositiveAmount { field: "amount" });
            }
            if input.payee.trim().is_empty() {
                return Err(PaymentError::MissingField("to"));
            }
            if input.kind == PaymentKind::ReceiptPayment
                && input.reason.as_deref().is_none_or(|r| r.trim().is_empty())
            {
                return Err(PaymentError::MissingField("reason"));
            }
        }
    }

    if input.requester_is_transporter && input.vehicle_id.is_none() {
        return Err(PaymentError::VehicleRequired);
    }

    // Line items supplied up front must already account for the full amount.
    if input.category == VEHICLE_MAINTENANCE && !input.maintenance_lines.is_empty() {
        let declared = input.amount.ok_or(PaymentError::MissingField("amount"))?;
        validate_maintenance_sum(&input.maintenance_lines, declared)?;
    }

    Ok(())
}

/// Validates that maintenance line amounts sum to the payable amount.
///
/// # Errors
///
/// Returns `PaymentError::MaintenanceSumMismatch` when the totals differ.
pub fn validate_maintenance_sum(
    lines: &[MaintenanceLine],
    declared: Decimal,
) -> Result<(), PaymentError> {
    let lines_total: Decimal = lines.iter().map(|l| l.amount).sum();
    if lines_total != declared {
        return Err(PaymentError::MaintenanceSumMismatch {
            declared,
            lines_total,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    fn base_input(kind: PaymentKind) -> CreatePaymentInput {
        CreatePaymentInput {
            kind,
            category: "general".to_string(),
            amount: Some(dec!(100)),
            suspense_amount: None,
            quantity: None,
            payee: "Garage Ltd".to_string(),
            reason: Some("spare parts".to_string()),
            receipt_reference: None,
            requested_by: Uuid::new_v4(),
            created_by: Uuid::new_v4(),
            requester_is_transporter: false,
            vehicle_id: None,
            maintenance_lines: vec![],
        }
    }

    fn line(amount: Decimal) -> MaintenanceLine {
        MaintenanceLine {
            vehicle_id: Uuid::new_v4(),
            action: "replace".to_string(),
            component_category: "engine".to_string(),
            component: "oil filter".to_string(),
            description: None,
            quantity: dec!(1),
            amount,
        }
    }

    #[test]
    fn test_receipt_payment_valid() {
        assert!(validate_create(&base_input(PaymentKind::ReceiptPayment)).is_ok());
    }

    #[rstest]
    #[case::missing_amount(None, "amount")]
    fn test_receipt_payment_requires_amount(
        #[case] amount: Option<Decimal>,
        #[case] field: &'static str,
    ) {
        let mut input = base_input(PaymentKind::ReceiptPayment);
        input.amount = amount;
        assert!(matches!(
            validate_create(&input),
            Err(PaymentError::MissingField(f)) if f == field
        ));
    }

    #[test]
    fn test_receipt_payment_requires_payee_and_reason() {
        let mut input = base_input(PaymentKind::ReceiptPayment);
        input.payee = "  ".to_string();
        assert!(matches!(
            validate_create(&input),
            Err(PaymentError::MissingField("to"))
        ));

        let mut input = base_input(PaymentKind::ReceiptPayment);
        input.reason = None;
        assert!(matches!(
            validate_create(&input),
            Err(PaymentError::MissingField("reason"))
        ));
    }

    #[test]
    fn test_bank_transfer_does_not_require_reason() {
        let mut input = base_input(PaymentKind::BankTransfer);
        input.reason = None;
        assert!(validate_create(&input).is_ok());
    }

    #[rstest]
    #[case(dec!(0))]
    #[case(dec!(-5))]
    fn test_non_positive_amount_rejected(#[case] amount: Decimal) {
        let mut input = base_input(PaymentKind::ReceiptPayment);
        input.amount = Some(amount);
        assert!(matches!(
            validate_create(&input),
            Err(PaymentError::NonPositiveAmount { field: "amount" })
        ));
    }

    #[test]
    fn test_suspense_payment_requires_advance() {
        let mut input = base_input(PaymentKind::SuspensePayment);
        input.amount = None;
        input.suspense_amount = None;
        assert!(matches!(
            validate_create(&input),
            Err(PaymentError::MissingField("suspenceAmount"))
        ));

        input.suspense_amount = Some(dec!(1000));
        assert!(validate_create(&input).is_ok());
    }

    #[test]
    fn test_transporter_requires_vehicle() {
        let mut input = base_input(PaymentKind::ReceiptPayment);
        input.requester_is_transporter = true;
        assert!(matches!(
            validate_create(&input),
            Err(PaymentError::VehicleRequired)
        ));

        input.vehicle_id = Some(Uuid::new_v4());
        assert!(validate_create(&input).is_ok());
    }

    #[test]
    fn test_maintenance_sum_must_match_declared_amount() {
        let mut input = base_input(PaymentKind::ReceiptPayment);
        input.category = VEHICLE_MAINTENANCE.to_string();
        input.amount = Some(dec!(500));
        input.maintenance_lines = vec![line(dec!(300)), line(dec!(150))];

        assert!(matches!(
            validate_create(&input),
            Err(PaymentError::MaintenanceSumMismatch { declared, lines_total })
                if declared == dec!(500) && lines_total == dec!(450)
        ));

        input.maintenance_lines = vec![line(dec!(300)), line(dec!(200))];
        assert!(validate_create(&input).is_ok());
    }

    #[test]
    fn test_maintenance_sum_helper() {
        assert!(validate_maintenance_sum(&[line(dec!(250)), line(dec!(250))], dec!(500)).is_ok());
        assert!(validate_maintenance_sum(&[], Decimal::ZERO).is_ok());
        assert!(validate_maintenance_sum(&[line(dec!(100))], dec!(500)).is_err());
    }
}
