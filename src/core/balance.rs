//! Pure balance arithmetic over a job's payment ledger.
//!
//! These functions are the single source of truth for how much has been paid
//! on a job and how much is still owed. They never touch the database; every
//! caller passes the ledger it already loaded. The remaining balance is
//! deliberately not clamped at zero - rejecting payments that would drive it
//! negative is the caller's job ([`crate::core::payment::add_payment`]).

use crate::entities::payment;

/// Sum of all payment amounts recorded against a job.
#[must_use]
pub fn amount_paid(payments: &[payment::Model]) -> f64 {
    payments.iter().map(|p| p.amount).sum()
}

/// Remaining balance on a job: price minus everything paid so far.
///
/// Not clamped; can be negative if the price was edited below the amount
/// already collected.
#[must_use]
pub fn amount_remaining(price: f64, payments: &[payment::Model]) -> f64 {
    price - amount_paid(payments)
}

/// Whether the ledger fully covers the price.
#[must_use]
pub fn is_fully_paid(price: f64, payments: &[payment::Model]) -> bool {
    amount_remaining(price, payments) <= 0.0
}

#[cfg(test)]
mod tests {
    #![allow(clippy::float_cmp)]
    use super::*;
    use chrono::Utc;

    fn payment(amount: f64) -> payment::Model {
        payment::Model {
            id: 0,
            job_id: 1,
            amount,
            note: None,
            date: Utc::now(),
        }
    }

    #[test]
    fn test_empty_ledger() {
        assert_eq!(amount_paid(&[]), 0.0);
        assert_eq!(amount_remaining(100.0, &[]), 100.0);
        assert!(!is_fully_paid(100.0, &[]));
    }

    #[test]
    fn test_amount_paid_sums_ledger() {
        let ledger = [payment(40.0), payment(25.5), payment(10.0)];
        assert_eq!(amount_paid(&ledger), 75.5);
        assert_eq!(amount_remaining(100.0, &ledger), 24.5);
        assert!(!is_fully_paid(100.0, &ledger));
    }

    #[test]
    fn test_exact_cover_is_fully_paid() {
        let ledger = [payment(40.0), payment(60.0)];
        assert_eq!(amount_remaining(100.0, &ledger), 0.0);
        assert!(is_fully_paid(100.0, &ledger));
    }

    #[test]
    fn test_remaining_is_not_clamped() {
        // A price edit below the collected amount leaves a negative remainder
        let ledger = [payment(100.0)];
        assert_eq!(amount_remaining(60.0, &ledger), -40.0);
        assert!(is_fully_paid(60.0, &ledger));
    }

    #[test]
    fn test_zero_price_job_is_trivially_paid() {
        assert!(is_fully_paid(0.0, &[]));
    }
}
