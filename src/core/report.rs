//! On-demand aggregation - owner summaries and the shop dashboard.
//!
//! Everything here is a pure fold over the current owners, jobs, and
//! payments, recomputed on every read and never cached. That keeps the
//! numbers consistent with the latest ledger state at the cost of
//! O(jobs x payments) per read, which is fine for a single shop's ledger.

use crate::{
    core::{balance, owner as owner_ops, payment as payment_ops},
    entities::{RepairJob, owner, repair_job},
    errors::{Error, Result},
};
use sea_orm::prelude::*;

/// Per-owner roll-up shown on the owner list.
#[derive(Debug, Clone, PartialEq)]
pub struct OwnerSummary {
    /// The owner's unique name
    pub name: String,
    /// Jobs whose device has not been handed back yet
    pub active_jobs: usize,
    /// Sum of remaining balances over jobs that are not fully paid
    pub pending_amount: f64,
}

/// Shop-wide roll-up shown on the dashboard.
#[derive(Debug, Clone)]
pub struct DashboardReport {
    /// Number of owners on record
    pub total_owners: usize,
    /// Unreturned jobs across the whole shop
    pub active_repairs: usize,
    /// Outstanding balance across the whole shop
    pub pending_payments: f64,
    /// One summary per owner, ordered by name
    pub owners: Vec<OwnerSummary>,
}

async fn summarize(db: &DatabaseConnection, owner: &owner::Model) -> Result<OwnerSummary> {
    let jobs = RepairJob::find()
        .filter(repair_job::Column::OwnerId.eq(owner.id))
        .all(db)
        .await?;

    let mut active_jobs = 0;
    let mut pending_amount = 0.0;
    for job in &jobs {
        if !job.returned {
            active_jobs += 1;
        }
        let ledger = payment_ops::payments_for_job(db, job.id).await?;
        if !balance::is_fully_paid(job.price, &ledger) {
            pending_amount += balance::amount_remaining(job.price, &ledger);
        }
    }

    Ok(OwnerSummary {
        name: owner.name.clone(),
        active_jobs,
        pending_amount,
    })
}

/// Computes the summary for a single owner.
pub async fn owner_summary(db: &DatabaseConnection, owner_id: i64) -> Result<OwnerSummary> {
    let owner = owner_ops::get_owner_by_id(db, owner_id)
        .await?
        .ok_or_else(|| Error::OwnerNotFound {
            name: owner_id.to_string(),
        })?;

    summarize(db, &owner).await
}

/// Computes one summary per owner, ordered by owner name.
pub async fn list_owner_summaries(db: &DatabaseConnection) -> Result<Vec<OwnerSummary>> {
    let owners = owner_ops::get_all_owners(db).await?;
    let mut summaries = Vec::with_capacity(owners.len());
    for owner in &owners {
        summaries.push(summarize(db, owner).await?);
    }
    Ok(summaries)
}

/// Builds the shop dashboard: owner count, active repairs, outstanding
/// balance, and the per-owner summaries.
pub async fn generate_dashboard(db: &DatabaseConnection) -> Result<DashboardReport> {
    let owners = list_owner_summaries(db).await?;

    let total_owners = owners.len();
    let active_repairs = owners.iter().map(|o| o.active_jobs).sum();
    let pending_payments = owners.iter().map(|o| o.pending_amount).sum();

    Ok(DashboardReport {
        total_owners,
        active_repairs,
        pending_payments,
        owners,
    })
}
