//! Voucher serial number allocation.
//!
//! Paid vouchers carry a serial number drawn from an independent,
//! strictly increasing counter per voucher class. Allocation is a
//! single atomic fetch-add, so concurrent payers never observe a
//! duplicate.

use std::sync::atomic::{AtomicI64, Ordering};

/// The voucher class a serial is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoucherClass {
    /// Cash payment vouchers.
    Payment,
    /// Check payment vouchers.
    CheckPayment,
}

/// Allocates strictly increasing serial numbers per voucher class.
#[derive(Debug, Default)]
pub struct SerialNumberAllocator {
    payment: AtomicI64,
    check_payment: AtomicI64,
}

impl SerialNumberAllocator {
    /// Creates an allocator with both counters at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an allocator resuming from the given bases; the next
    /// serial issued for each class is `base + 1`.
    #[must_use]
    pub fn with_bases(payment_base: i64, check_base: i64) -> Self {
        Self {
            payment: AtomicI64::new(payment_base),
            check_payment: AtomicI64::new(check_base),
        }
    }

    /// Allocates the next serial for the class.
    pub fn next(&self, class: VoucherClass) -> i64 {
        self.counter(class).fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Returns the most recently issued serial for the class.
    pub fn current(&self, class: VoucherClass) -> i64 {
        self.counter(class).load(Ordering::SeqCst)
    }

    fn counter(&self, class: VoucherClass) -> &AtomicI64 {
        match class {
            VoucherClass::Payment => &self.payment,
            VoucherClass::CheckPayment => &self.check_payment,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serials_start_at_one() {
        let alloc = SerialNumberAllocator::new();
        assert_eq!(alloc.next(VoucherClass::Payment), 1);
        assert_eq!(alloc.next(VoucherClass::Payment), 2);
        assert_eq!(alloc.current(VoucherClass::Payment), 2);
    }

    #[test]
    fn test_classes_are_independent() {
        let alloc = SerialNumberAllocator::new();
        assert_eq!(alloc.next(VoucherClass::Payment), 1);
        assert_eq!(alloc.next(VoucherClass::CheckPayment), 1);
        assert_eq!(alloc.next(VoucherClass::CheckPayment), 2);
        assert_eq!(alloc.current(VoucherClass::Payment), 1);
    }

    #[test]
    fn test_resumes_from_bases() {
        let alloc = SerialNumberAllocator::with_bases(100, 7);
        assert_eq!(alloc.next(VoucherClass::Payment), 101);
        assert_eq!(alloc.next(VoucherClass::CheckPayment), 8);
    }
}
