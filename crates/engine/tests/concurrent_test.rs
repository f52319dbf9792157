//! Concurrency tests: balance conservation and serial uniqueness under
//! contention.

use std::collections::HashSet;
use std::sync::Arc;
use std::thread;

use rust_decimal_macros::dec;
use uuid::Uuid;

use fleetpay_core::payment::{CreatePaymentInput, PayFields, PaymentKind};
use fleetpay_engine::{PaymentEngine, SerialNumberAllocator, VoucherClass};
use fleetpay_shared::config::{EngineConfig, OverdraftPolicy};

const THREADS: usize = 8;
const OPS_PER_THREAD: usize = 50;

fn payment_input() -> CreatePaymentInput {
    CreatePaymentInput {
        kind: PaymentKind::ReceiptPayment,
        category: "general".to_string(),
        amount: Some(dec!(10)),
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

#[test]
fn test_concurrent_debits_and_credits_conserve_balance() {
    let engine = Arc::new(PaymentEngine::new());
    let account = engine.create_cash_account("Main", dec!(10_000)).unwrap();

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let engine = Arc::clone(&engine);
            thread::spawn(move || {
                for _ in 0..OPS_PER_THREAD {
                    engine
                        .ledger()
                        .debit(account.id, dec!(7), OverdraftPolicy::Allow)
                        .unwrap();
                    engine.ledger().credit(account.id, dec!(3)).unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    // 10_000 - 8 * 50 * (7 - 3)
    assert_eq!(engine.ledger().get(account.id).unwrap().balance, dec!(8400));
}

#[test]
fn test_concurrent_serials_are_unique_and_gapless() {
    let allocator = Arc::new(SerialNumberAllocator::new());

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let allocator = Arc::clone(&allocator);
            thread::spawn(move || {
                (0..OPS_PER_THREAD)
                    .map(|_| allocator.next(VoucherClass::Payment))
                    .collect::<Vec<i64>>()
            })
        })
        .collect();

    let mut serials = Vec::new();
    for handle in handles {
        serials.extend(handle.join().unwrap());
    }

    let total = (THREADS * OPS_PER_THREAD) as i64;
    let unique: HashSet<i64> = serials.iter().copied().collect();
    assert_eq!(unique.len() as i64, total);
    assert_eq!(*serials.iter().min().unwrap(), 1);
    assert_eq!(*serials.iter().max().unwrap(), total);
}

#[test]
fn test_concurrent_payments_never_overdraw_under_reject_policy() {
    let config = EngineConfig {
        overdraft_policy: OverdraftPolicy::Reject,
        ..EngineConfig::default()
    };
    let engine = Arc::new(PaymentEngine::with_config(&config));
    // Room for exactly 15 of the 20 attempted payments of 10.
    let account = engine.create_cash_account("Main", dec!(150)).unwrap();

    let payment_ids: Vec<Uuid> = (0..20)
        .map(|_| {
            let payment = engine.create_payment(payment_input()).unwrap();
            engine.approve_payment(payment.id, Uuid::new_v4()).unwrap();
            payment.id
        })
        .collect();

    let handles: Vec<_> = payment_ids
        .into_iter()
        .map(|id| {
            let engine = Arc::clone(&engine);
            thread::spawn(move || {
                engine
                    .pay_payment(id, account.id, &PayFields::default())
                    .is_ok()
            })
        })
        .collect();

    let paid = handles
        .into_iter()
        .map(|h| h.join().unwrap())
        .filter(|ok| *ok)
        .count();

    assert_eq!(paid, 15);
    assert_eq!(engine.ledger().get(account.id).unwrap().balance, dec!(0));
}

#[test]
fn test_concurrent_transitions_on_one_payment_apply_once() {
    let engine = Arc::new(PaymentEngine::new());
    let payment = engine.create_payment(payment_input()).unwrap();

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let engine = Arc::clone(&engine);
            let id = payment.id;
            thread::spawn(move || engine.approve_payment(id, Uuid::new_v4()).is_ok())
        })
        .collect();

    let approvals = handles
        .into_iter()
        .map(|h| h.join().unwrap())
        .filter(|ok| *ok)
        .count();

    // Approving from `requested` and from `suspence` are the only legal
    // approve edges; once approved, further approvals are refused.
    assert_eq!(approvals, 1);
}
