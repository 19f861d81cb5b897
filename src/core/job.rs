//! Repair job lifecycle - creation, edits, status transitions, deletion.
//!
//! A job starts `Pending` with an empty ledger and is promoted to `Completed`
//! automatically only by payment acceptance ([`crate::core::payment`]).
//! `set_status` places no state-machine guards on explicit operator
//! transitions; the `returned` flag is an independent operator toggle that
//! never interacts with payment logic. Deleting a job cascades to its
//! payments inside one transaction.

use crate::{
    entities::{JobStatus, Owner, Payment, RepairJob, payment, repair_job},
    errors::{Error, Result},
};
use sea_orm::{Set, TransactionTrait, prelude::*};

fn validate_job_fields(device: &str, issue: &str, price: f64) -> Result<()> {
    if device.trim().is_empty() {
        return Err(Error::Validation {
            message: "Device model cannot be empty".to_string(),
        });
    }
    if issue.trim().is_empty() {
        return Err(Error::Validation {
            message: "Issue description cannot be empty".to_string(),
        });
    }
    if !price.is_finite() || price < 0.0 {
        return Err(Error::InvalidAmount { amount: price });
    }
    Ok(())
}

/// Finds a job by its unique ID, returning None if not found.
pub async fn get_job_by_id(
    db: &DatabaseConnection,
    job_id: i64,
) -> Result<Option<repair_job::Model>> {
    RepairJob::find_by_id(job_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Creates a new repair job under an owner.
///
/// Validates that the device and issue are non-empty and the price is a
/// finite, non-negative amount. The job starts `Pending`, not returned, with
/// zero payments recorded.
pub async fn create_job(
    db: &DatabaseConnection,
    owner_id: i64,
    device: String,
    issue: String,
    price: f64,
) -> Result<repair_job::Model> {
    validate_job_fields(&device, &issue, price)?;

    Owner::find_by_id(owner_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::OwnerNotFound {
            name: owner_id.to_string(),
        })?;

    let now = chrono::Utc::now();
    let job = repair_job::ActiveModel {
        owner_id: Set(owner_id),
        device: Set(device.trim().to_string()),
        issue: Set(issue.trim().to_string()),
        price: Set(price),
        status: Set(JobStatus::Pending),
        returned: Set(false),
        date_received: Set(now),
        date_updated: Set(now),
        ..Default::default()
    };

    let result = job.insert(db).await?;
    Ok(result)
}

/// Edits a job's descriptive fields and price, optionally assigning a status.
///
/// Same field validation as [`create_job`]. Status is not recomputed from the
/// ledger here: a price edit alone never promotes or demotes the job. Touches
/// `date_updated`.
pub async fn edit_job(
    db: &DatabaseConnection,
    job_id: i64,
    device: String,
    issue: String,
    price: f64,
    status: Option<JobStatus>,
) -> Result<repair_job::Model> {
    validate_job_fields(&device, &issue, price)?;

    let job = get_job_by_id(db, job_id)
        .await?
        .ok_or(Error::JobNotFound { id: job_id })?;

    let mut active: repair_job::ActiveModel = job.into();
    active.device = Set(device.trim().to_string());
    active.issue = Set(issue.trim().to_string());
    active.price = Set(price);
    if let Some(status) = status {
        active.status = Set(status);
    }
    active.date_updated = Set(chrono::Utc::now());

    let result = active.update(db).await?;
    Ok(result)
}

/// Explicitly assigns one of the three recognized statuses.
///
/// Any transition among the three values is allowed; unrecognized operator
/// input is rejected earlier by [`JobStatus::parse`].
pub async fn set_status(
    db: &DatabaseConnection,
    job_id: i64,
    status: JobStatus,
) -> Result<repair_job::Model> {
    let job = get_job_by_id(db, job_id)
        .await?
        .ok_or(Error::JobNotFound { id: job_id })?;

    let mut active: repair_job::ActiveModel = job.into();
    active.status = Set(status);
    active.date_updated = Set(chrono::Utc::now());

    let result = active.update(db).await?;
    Ok(result)
}

/// Toggles whether the device has been handed back to the customer.
pub async fn toggle_returned(db: &DatabaseConnection, job_id: i64) -> Result<repair_job::Model> {
    let job = get_job_by_id(db, job_id)
        .await?
        .ok_or(Error::JobNotFound { id: job_id })?;

    let returned = !job.returned;
    let mut active: repair_job::ActiveModel = job.into();
    active.returned = Set(returned);
    active.date_updated = Set(chrono::Utc::now());

    let result = active.update(db).await?;
    Ok(result)
}

/// Deletes a job and its entire payment ledger in one transaction.
pub async fn delete_job(db: &DatabaseConnection, job_id: i64) -> Result<()> {
    // Use a transaction to ensure atomicity
    let txn = db.begin().await?;

    let job = RepairJob::find_by_id(job_id)
        .one(&txn)
        .await?
        .ok_or(Error::JobNotFound { id: job_id })?;

    Payment::delete_many()
        .filter(payment::Column::JobId.eq(job_id))
        .exec(&txn)
        .await?;
    job.delete(&txn).await?;

    txn.commit().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::core::payment::{PaymentDeletePolicy, payments_for_job};
    use crate::test_utils::{
        create_test_job, create_test_owner, create_test_payment, setup_test_db, setup_with_job,
    };

    #[tokio::test]
    async fn test_create_job_validation() -> Result<()> {
        let db = setup_test_db().await?;
        let owner = create_test_owner(&db, "Alice").await?;

        // Empty device
        let result = create_job(
            &db,
            owner.id,
            "  ".to_string(),
            "Cracked screen".to_string(),
            50.0,
        )
        .await;
        assert!(matches!(result.unwrap_err(), Error::Validation { .. }));

        // Empty issue
        let result = create_job(
            &db,
            owner.id,
            "iPhone 12".to_string(),
            String::new(),
            50.0,
        )
        .await;
        assert!(matches!(result.unwrap_err(), Error::Validation { .. }));

        // Negative price
        let result = create_job(
            &db,
            owner.id,
            "iPhone 12".to_string(),
            "Cracked screen".to_string(),
            -50.0,
        )
        .await;
        assert!(matches!(result.unwrap_err(), Error::InvalidAmount { .. }));

        // Non-finite price
        let result = create_job(
            &db,
            owner.id,
            "iPhone 12".to_string(),
            "Cracked screen".to_string(),
            f64::NAN,
        )
        .await;
        assert!(matches!(result.unwrap_err(), Error::InvalidAmount { .. }));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_job_owner_not_found() -> Result<()> {
        let db = setup_test_db().await?;

        let result = create_job(
            &db,
            999,
            "iPhone 12".to_string(),
            "Cracked screen".to_string(),
            50.0,
        )
        .await;
        assert!(matches!(result.unwrap_err(), Error::OwnerNotFound { .. }));

        Ok(())
    }

    #[tokio::test]
    async fn test_create_job_defaults() -> Result<()> {
        let (db, owner, job) = setup_with_job().await?;

        assert_eq!(job.owner_id, owner.id);
        assert_eq!(job.device, "iPhone 12");
        assert_eq!(job.issue, "Cracked screen");
        assert_eq!(job.price, 100.0);
        assert_eq!(job.status, JobStatus::Pending);
        assert!(!job.returned);
        assert_eq!(job.date_received, job.date_updated);
        assert!(payments_for_job(&db, job.id).await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_create_job_trims_fields() -> Result<()> {
        let db = setup_test_db().await?;
        let owner = create_test_owner(&db, "Alice").await?;

        let job = create_job(
            &db,
            owner.id,
            "  Pixel 8  ".to_string(),
            " Battery drain ".to_string(),
            80.0,
        )
        .await?;
        assert_eq!(job.device, "Pixel 8");
        assert_eq!(job.issue, "Battery drain");

        Ok(())
    }

    #[tokio::test]
    async fn test_create_job_zero_price_allowed() -> Result<()> {
        let db = setup_test_db().await?;
        let owner = create_test_owner(&db, "Alice").await?;

        // Warranty work: a zero-price job is valid and starts Pending
        let job = create_test_job(&db, owner.id, 0.0).await?;
        assert_eq!(job.price, 0.0);
        assert_eq!(job.status, JobStatus::Pending);

        Ok(())
    }

    #[tokio::test]
    async fn test_edit_job_updates_fields() -> Result<()> {
        let (db, _owner, job) = setup_with_job().await?;

        let edited = edit_job(
            &db,
            job.id,
            "iPhone 13".to_string(),
            "Water damage".to_string(),
            150.0,
            Some(JobStatus::InProgress),
        )
        .await?;

        assert_eq!(edited.device, "iPhone 13");
        assert_eq!(edited.issue, "Water damage");
        assert_eq!(edited.price, 150.0);
        assert_eq!(edited.status, JobStatus::InProgress);
        assert!(edited.date_updated >= job.date_updated);

        // Persisted
        let retrieved = get_job_by_id(&db, job.id).await?.unwrap();
        assert_eq!(retrieved, edited);

        Ok(())
    }

    #[tokio::test]
    async fn test_edit_job_validation_leaves_job_unchanged() -> Result<()> {
        let (db, _owner, job) = setup_with_job().await?;

        let result = edit_job(
            &db,
            job.id,
            "iPhone 13".to_string(),
            "Water damage".to_string(),
            -1.0,
            None,
        )
        .await;
        assert!(matches!(result.unwrap_err(), Error::InvalidAmount { .. }));

        let unchanged = get_job_by_id(&db, job.id).await?.unwrap();
        assert_eq!(unchanged, job);

        Ok(())
    }

    #[tokio::test]
    async fn test_edit_job_price_does_not_recompute_status() -> Result<()> {
        let (db, _owner, job) = setup_with_job().await?;
        create_test_payment(&db, job.id, 50.0).await?;

        // Lower the price to what is already paid; status stays Pending until
        // the next payment mutation
        let edited = edit_job(
            &db,
            job.id,
            "iPhone 12".to_string(),
            "Cracked screen".to_string(),
            50.0,
            None,
        )
        .await?;
        assert_eq!(edited.status, JobStatus::Pending);

        Ok(())
    }

    #[tokio::test]
    async fn test_set_status_transitions_are_unconstrained() -> Result<()> {
        let (db, _owner, job) = setup_with_job().await?;

        // Any of the three values can be assigned, in any order
        let job_model = set_status(&db, job.id, JobStatus::Completed).await?;
        assert_eq!(job_model.status, JobStatus::Completed);

        let job_model = set_status(&db, job.id, JobStatus::Pending).await?;
        assert_eq!(job_model.status, JobStatus::Pending);

        let job_model = set_status(&db, job.id, JobStatus::InProgress).await?;
        assert_eq!(job_model.status, JobStatus::InProgress);

        Ok(())
    }

    #[tokio::test]
    async fn test_set_status_job_not_found() -> Result<()> {
        let db = setup_test_db().await?;

        let result = set_status(&db, 999, JobStatus::InProgress).await;
        assert!(matches!(result.unwrap_err(), Error::JobNotFound { id: 999 }));

        Ok(())
    }

    #[tokio::test]
    async fn test_toggle_returned_flips_flag_only() -> Result<()> {
        let (db, _owner, job) = setup_with_job().await?;
        create_test_payment(&db, job.id, 30.0).await?;

        let toggled = toggle_returned(&db, job.id).await?;
        assert!(toggled.returned);
        // Payment state is untouched
        assert_eq!(toggled.status, JobStatus::Pending);
        assert_eq!(payments_for_job(&db, job.id).await?.len(), 1);

        let toggled_back = toggle_returned(&db, job.id).await?;
        assert!(!toggled_back.returned);

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_job_cascades_to_payments() -> Result<()> {
        let (db, owner, job) = setup_with_job().await?;
        create_test_payment(&db, job.id, 40.0).await?;
        create_test_payment(&db, job.id, 60.0).await?;

        // A second job's ledger must survive
        let other_job = create_test_job(&db, owner.id, 50.0).await?;
        let other_payment = create_test_payment(&db, other_job.id, 25.0).await?;

        delete_job(&db, job.id).await?;

        assert!(get_job_by_id(&db, job.id).await?.is_none());
        assert!(payments_for_job(&db, job.id).await?.is_empty());

        let surviving = payments_for_job(&db, other_job.id).await?;
        assert_eq!(surviving, vec![other_payment]);

        Ok(())
    }

    #[tokio::test]
    async fn test_delete_job_not_found() -> Result<()> {
        let db = setup_test_db().await?;

        let result = delete_job(&db, 999).await;
        assert!(matches!(result.unwrap_err(), Error::JobNotFound { id: 999 }));

        Ok(())
    }

    #[tokio::test]
    async fn test_deleted_payment_then_status_consistency() -> Result<()> {
        // Full end-to-end scenario from the ledger's point of view:
        // pay 40, pay 60 -> Completed; delete second payment -> demoted
        let (db, _owner, job) = setup_with_job().await?;

        create_test_payment(&db, job.id, 40.0).await?;
        let second = create_test_payment(&db, job.id, 60.0).await?;
        assert_eq!(
            get_job_by_id(&db, job.id).await?.unwrap().status,
            JobStatus::Completed
        );

        crate::core::payment::delete_payment(&db, second.id, PaymentDeletePolicy::StrictReset)
            .await?;

        let after = get_job_by_id(&db, job.id).await?.unwrap();
        assert_eq!(after.status, JobStatus::InProgress);
        let ledger = payments_for_job(&db, job.id).await?;
        assert_eq!(crate::core::balance::amount_remaining(after.price, &ledger), 60.0);

        Ok(())
    }
}
