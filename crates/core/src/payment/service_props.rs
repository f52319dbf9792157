//! Property-based tests for the payment workflow.
//!
//! Validates state-machine soundness: every observed transition is an
//! edge of the legal graph, and every illegal edge raises
//! `InvalidTransition`.

use proptest::prelude::*;
use uuid::Uuid;

use crate::payment::error::PaymentError;
use crate::payment::service::PaymentWorkflow;
use crate::payment::types::PaymentStatus;

/// Strategy for generating random payment statuses.
fn arb_status() -> impl Strategy<Value = PaymentStatus> {
    prop_oneof![
        Just(PaymentStatus::Requested),
        Just(PaymentStatus::Suspense),
        Just(PaymentStatus::Approved),
        Just(PaymentStatus::Paid),
        Just(PaymentStatus::Rejected),
    ]
}

/// Strategy for generating random UUIDs.
fn arb_uuid() -> impl Strategy<Value = Uuid> {
    any::<u128>().prop_map(Uuid::from_u128)
}

/// Strategy for generating non-empty reasons.
fn arb_reason() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9][a-zA-Z0-9 ]{0,60}".prop_map(|s| s.trim().to_string())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Approve succeeds exactly from the awaiting-approval states, and the
    /// resulting edge is on the legal transition graph.
    #[test]
    fn prop_approve_matches_transition_graph(
        status in arb_status(),
        user_id in arb_uuid(),
    ) {
        let result = PaymentWorkflow::approve(status, user_id);
        let legal = PaymentWorkflow::is_valid_transition(status, PaymentStatus::Approved);
        prop_assert_eq!(result.is_ok(), legal);
        if let Err(e) = result {
            prop_assert!(
                matches!(e, PaymentError::InvalidTransition { .. }),
                "unexpected error: {e:?}"
            );
        }
    }

    /// Reject with a non-empty reason succeeds exactly where the graph
    /// has an edge to `rejected`.
    #[test]
    fn prop_reject_matches_transition_graph(
        status in arb_status(),
        user_id in arb_uuid(),
        reason in arb_reason(),
    ) {
        prop_assume!(!reason.is_empty());
        let result = PaymentWorkflow::reject(status, user_id, reason);
        let legal = PaymentWorkflow::is_valid_transition(status, PaymentStatus::Rejected);
        prop_assert_eq!(result.is_ok(), legal);
    }

    /// An empty reason never rejects, regardless of state.
    #[test]
    fn prop_empty_reason_never_rejects(
        status in arb_status(),
        user_id in arb_uuid(),
        spaces in " {0,8}",
    ) {
        let result = PaymentWorkflow::reject(status, user_id, spaces);
        prop_assert!(matches!(result, Err(PaymentError::RejectionReasonRequired)));
    }

    /// Appeal succeeds only from `rejected`.
    #[test]
    fn prop_appeal_only_from_rejected(status in arb_status()) {
        let result = PaymentWorkflow::appeal(status);
        prop_assert_eq!(result.is_ok(), status == PaymentStatus::Rejected);
    }

    /// `paid` is terminal: no operation moves a paid request anywhere.
    #[test]
    fn prop_paid_is_terminal(
        target in arb_status(),
        user_id in arb_uuid(),
        reason in arb_reason(),
    ) {
        prop_assume!(!reason.is_empty());
        prop_assert!(!PaymentWorkflow::is_valid_transition(PaymentStatus::Paid, target));
        prop_assert!(PaymentWorkflow::approve(PaymentStatus::Paid, user_id).is_err());
        prop_assert!(PaymentWorkflow::reject(PaymentStatus::Paid, user_id, reason).is_err());
        prop_assert!(PaymentWorkflow::appeal(PaymentStatus::Paid).is_err());
    }
}
