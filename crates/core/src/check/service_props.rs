//! Property-based tests for the check workflow.

use proptest::prelude::*;

use crate::check::error::CheckError;
use crate::check::service::CheckWorkflow;
use crate::check::types::CheckStatus;

/// Strategy for generating random check statuses.
fn arb_status() -> impl Strategy<Value = CheckStatus> {
    prop_oneof![
        Just(CheckStatus::Pending),
        Just(CheckStatus::Approved),
        Just(CheckStatus::Paid),
        Just(CheckStatus::Rejected),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// set_status succeeds exactly on the legal non-paid edges.
    #[test]
    fn prop_set_status_matches_transition_graph(
        from in arb_status(),
        to in arb_status(),
    ) {
        let result = CheckWorkflow::set_status(from, to);
        if to == CheckStatus::Paid {
            prop_assert!(matches!(result, Err(CheckError::PaidViaSetStatus)));
        } else {
            prop_assert_eq!(result.is_ok(), CheckWorkflow::is_valid_transition(from, to));
        }
    }

    /// pay succeeds only from `approved`.
    #[test]
    fn prop_pay_only_from_approved(from in arb_status()) {
        prop_assert_eq!(
            CheckWorkflow::pay(from).is_ok(),
            from == CheckStatus::Approved
        );
    }

    /// `paid` is terminal.
    #[test]
    fn prop_paid_is_terminal(to in arb_status()) {
        prop_assert!(!CheckWorkflow::is_valid_transition(CheckStatus::Paid, to));
    }
}
