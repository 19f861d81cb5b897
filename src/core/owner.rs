//! Owner identity management and the owner detail view.
//!
//! Owners are identified by a globally unique name; every lookup the
//! interface layer performs goes through that name. Renames are checked for
//! collisions before anything is written, and deleting an owner removes its
//! jobs and their payments in one transaction so no orphan rows survive.

use crate::{
    core::{balance, payment as payment_ops},
    entities::{Owner, Payment, RepairJob, owner, payment, repair_job},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};

/// One job inside an owner's detail view, with its ledger and derived
/// balances computed at read time.
#[derive(Debug, Clone)]
pub struct JobDetails {
    /// The job record itself
    pub job: repair_job::Model,
    /// The job's payment ledger, newest first
    pub payments: Vec<payment::Model>,
    /// Sum of the ledger
    pub amount_paid: f64,
    /// Price minus the ledger; not clamped
    pub amount_remaining: f64,
}

/// An owner together with all of its jobs, newest first.
#[derive(Debug, Clone)]
pub struct OwnerDetails {
    /// The owner record
    pub owner: owner::Model,
    /// The owner's jobs ordered by `date_received` descending
    pub jobs: Vec<JobDetails>,
}

/// Retrieves all owners, ordered alphabetically by name.
pub async fn get_all_owners(db: &DatabaseConnection) -> Result<Vec<owner::Model>> {
    Owner::find()
        .order_by_asc(owner::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Finds an owner by its unique name.
pub async fn get_owner_by_name(
    db: &DatabaseConnection,
    name: &str,
) -> Result<Option<owner::Model>> {
    Owner::find()
        .filter(owner::Column::Name.eq(name))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Finds an owner by its unique ID.
pub async fn get_owner_by_id(db: &DatabaseConnection, owner_id: i64) -> Result<Option<owner::Model>> {
    Owner::find_by_id(owner_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Creates a new owner with a unique, non-empty name.
pub async fn create_owner(db: &DatabaseConnection, name: String) -> Result<owner::Model> {
    let name = name.trim().to_string();
    if name.is_empty() {
        return Err(Error::Validation {
            message: "Owner name cannot be empty".to_string(),
        });
    }

    if get_owner_by_name(db, &name).await?.is_some() {
        return Err(Error::DuplicateOwner { name });
    }

    let owner = owner::ActiveModel {
        name: Set(name),
        date_added: Set(chrono::Utc::now()),
        ..Default::default()
    };

    let result = owner.insert(db).await?;
    Ok(result)
}

/// Renames an owner in place.
///
/// Fails if the new name is empty or already held by another owner, without
/// mutating either record. Renaming an owner to its current name is a no-op.
pub async fn rename_owner(
    db: &DatabaseConnection,
    owner_id: i64,
    new_name: String,
) -> Result<owner::Model> {
    let new_name = new_name.trim().to_string();
    if new_name.is_empty() {
        return Err(Error::Validation {
            message: "Owner name cannot be empty".to_string(),
        });
    }

    let owner = get_owner_by_id(db, owner_id)
        .await?
        .ok_or_else(|| Error::OwnerNotFound {
            name: owner_id.to_string(),
        })?;

    if owner.name == new_name {
        return Ok(owner);
    }

    if get_owner_by_name(db, &new_name).await?.is_some() {
        return Err(Error::DuplicateOwner { name: new_name });
    }

    let mut active: owner::ActiveModel = owner.into();
    active.name = Set(new_name);

    let result = active.update(db).await?;
    Ok(result)
}

/// Deletes an owner, cascading to all of its jobs and their payments.
pub async fn delete_owner(db: &DatabaseConnection, owner_id: i64) -> Result<()> {
    // Use a transaction to ensure atomicity
    let txn = db.begin().await?;

    let owner = Owner::find_by_id(owner_id)
        .one(&txn)
        .await?
        .ok_or_else(|| Error::OwnerNotFound {
            name: owner_id.to_string(),
        })?;

    let job_ids: Vec<i64> = RepairJob::find()
        .filter(repair_job::Column::OwnerId.eq(owner_id))
        .all(&txn)
        .await?
        .into_iter()
        .map(|job| job.id)
        .collect();

    if !job_ids.is_empty() {
        Payment::delete_many()
            .filter(payment::Column::JobId.is_in(job_ids))
            .exec(&txn)
            .await?;
        RepairJob::delete_many()
            .filter(repair_job::Column::OwnerId.eq(owner_id))
            .exec(&txn)
            .await?;
    }
    owner.delete(&txn).await?;

    txn.commit().await?;
    Ok(())
}

/// Builds the full detail view for one owner: its jobs newest-first, each
/// with its ledger and derived balances.
pub async fn owner_details(db: &DatabaseConnection, name: &str) -> Result<OwnerDetails> {
    let owner = get_owner_by_name(db, name)
        .await?
        .ok_or_else(|| Error::OwnerNotFound {
            name: name.to_string(),
        })?;

    let jobs = RepairJob::find()
        .filter(repair_job::Column::OwnerId.eq(owner.id))
        .order_by_desc(repair_job::Column::DateReceived)
        .all(db)
        .await?;

    let mut details = Vec::with_capacity(jobs.len());
    for job in jobs {
        let payments = payment_ops::payments_for_job(db, job.id).await?;
        let amount_paid = balance::amount_paid(&payments);
        let amount_remaining = balance::amount_remaining(job.price, &payments);
        details.push(JobDetails {
            job,
            payments,
            amount_paid,
            amount_remaining,
        });
    }

    Ok(OwnerDetails {
        owner,
        jobs: details,
    })
}
