//! Payment ledger mutations - acceptance and removal of payments.
//!
//! Both operations run inside a single database transaction so the inserted
//! or deleted payment and the recomputed job status are never observably
//! split. A rejected payment mutates nothing. Whenever the ledger changes,
//! the parent job's status is brought back in line with the balance
//! arithmetic in [`crate::core::balance`].

use crate::{
    core::balance,
    entities::{JobStatus, Payment, RepairJob, payment, repair_job},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};
use serde::{Deserialize, Serialize};

/// What happens to a job's status when one of its payments is deleted.
///
/// [`Self::StrictReset`] conservatively marks the job unpaid on any deletion,
/// even when the surviving payments still cover the price;
/// [`Self::RecomputeFromLedger`] recomputes the status from what actually
/// remains in the ledger. The choice is carried in
/// [`crate::config::settings::Settings`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PaymentDeletePolicy {
    /// Demote a `Completed` job to `In Progress` on any payment deletion,
    /// even if the remaining ledger still covers the price exactly.
    #[default]
    StrictReset,
    /// Recompute from the surviving ledger: the job is `Completed` iff the
    /// remaining balance is zero or below.
    RecomputeFromLedger,
}

/// Retrieves a job's payment ledger, newest first.
pub async fn payments_for_job<C>(db: &C, job_id: i64) -> Result<Vec<payment::Model>>
where
    C: ConnectionTrait,
{
    Payment::find()
        .filter(payment::Column::JobId.eq(job_id))
        .order_by_desc(payment::Column::Date)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves a specific payment by its unique ID.
pub async fn get_payment_by_id(
    db: &DatabaseConnection,
    payment_id: i64,
) -> Result<Option<payment::Model>> {
    Payment::find_by_id(payment_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Records a payment against a job and recomputes the job's status.
///
/// Validation: the amount must be positive and finite, and must not exceed
/// the job's remaining balance (an exact match is allowed and completes the
/// job). On success the payment is inserted with a server-assigned timestamp
/// and, if the resulting balance is zero or below, the job is promoted to
/// `Completed` - all inside one transaction.
pub async fn add_payment(
    db: &DatabaseConnection,
    job_id: i64,
    amount: f64,
    note: Option<String>,
) -> Result<payment::Model> {
    if amount <= 0.0 || !amount.is_finite() {
        return Err(Error::InvalidAmount { amount });
    }

    // Use a transaction to ensure atomicity
    let txn = db.begin().await?;

    let job = RepairJob::find_by_id(job_id)
        .one(&txn)
        .await?
        .ok_or(Error::JobNotFound { id: job_id })?;

    let ledger = payments_for_job(&txn, job_id).await?;
    let remaining = balance::amount_remaining(job.price, &ledger);
    if amount > remaining {
        return Err(Error::Overpayment { amount, remaining });
    }

    let now = chrono::Utc::now();
    let note = note.map(|n| n.trim().to_string()).filter(|n| !n.is_empty());
    let payment_model = payment::ActiveModel {
        job_id: Set(job_id),
        amount: Set(amount),
        note: Set(note),
        date: Set(now),
        ..Default::default()
    };

    let result = payment_model.insert(&txn).await?;

    // Promote to Completed once the ledger covers the price
    if remaining - amount <= 0.0 && job.status != JobStatus::Completed {
        let mut active: repair_job::ActiveModel = job.into();
        active.status = Set(JobStatus::Completed);
        active.date_updated = Set(now);
        active.update(&txn).await?;
    }

    txn.commit().await?;

    Ok(result)
}

/// Deletes a payment and applies the configured status policy to its job.
///
/// The payment removal and the status update commit together; see
/// [`PaymentDeletePolicy`] for what happens to a `Completed` job.
pub async fn delete_payment(
    db: &DatabaseConnection,
    payment_id: i64,
    policy: PaymentDeletePolicy,
) -> Result<()> {
    // Use a transaction to ensure atomicity
    let txn = db.begin().await?;

    let payment = Payment::find_by_id(payment_id)
        .one(&txn)
        .await?
        .ok_or(Error::PaymentNotFound { id: payment_id })?;

    let job = RepairJob::find_by_id(payment.job_id)
        .one(&txn)
        .await?
        .ok_or(Error::JobNotFound { id: payment.job_id })?;

    let job_id = job.id;
    payment.delete(&txn).await?;

    let new_status = match policy {
        PaymentDeletePolicy::StrictReset => {
            (job.status == JobStatus::Completed).then_some(JobStatus::InProgress)
        }
        PaymentDeletePolicy::RecomputeFromLedger => {
            let ledger = payments_for_job(&txn, job_id).await?;
            if balance::is_fully_paid(job.price, &ledger) {
                (job.status != JobStatus::Completed).then_some(JobStatus::Completed)
            } else {
                (job.status == JobStatus::Completed).then_some(JobStatus::InProgress)
            }
        }
    };

    if let Some(status) = new_status {
        let mut active: repair_job::ActiveModel = job.into();
        active.status = Set(status);
        active.date_updated = Set(chrono::Utc::now());
        active.update(&txn).await?;
    }

    txn.commit().await?;
    Ok(())
}
