//! Shared test utilities for `RepairDesk`.
//!
//! This module provides common helper functions for setting up test databases
//! and creating test entities with sensible defaults.

use crate::{
    core::{job, owner, payment},
    entities,
    errors::Result,
};
use sea_orm::DatabaseConnection;

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Creates a test owner with the given name.
pub async fn create_test_owner(
    db: &DatabaseConnection,
    name: &str,
) -> Result<entities::owner::Model> {
    owner::create_owner(db, name.to_string()).await
}

/// Creates a test job with sensible defaults.
///
/// # Defaults
/// * `device`: `"iPhone 12"`
/// * `issue`: `"Cracked screen"`
pub async fn create_test_job(
    db: &DatabaseConnection,
    owner_id: i64,
    price: f64,
) -> Result<entities::repair_job::Model> {
    job::create_job(
        db,
        owner_id,
        "iPhone 12".to_string(),
        "Cracked screen".to_string(),
        price,
    )
    .await
}

/// Creates a test job with custom descriptive fields.
pub async fn create_custom_job(
    db: &DatabaseConnection,
    owner_id: i64,
    device: &str,
    issue: &str,
    price: f64,
) -> Result<entities::repair_job::Model> {
    job::create_job(db, owner_id, device.to_string(), issue.to_string(), price).await
}

/// Records a test payment with no note.
pub async fn create_test_payment(
    db: &DatabaseConnection,
    job_id: i64,
    amount: f64,
) -> Result<entities::payment::Model> {
    payment::add_payment(db, job_id, amount, None).await
}

/// Sets up a complete test environment with one owner ("Alice") and one
/// price-100 job. Returns (db, owner, job) for common test scenarios.
pub async fn setup_with_job() -> Result<(
    DatabaseConnection,
    entities::owner::Model,
    entities::repair_job::Model,
)> {
    let db = setup_test_db().await?;
    let owner = create_test_owner(&db, "Alice").await?;
    let job = create_test_job(&db, owner.id, 100.0).await?;
    Ok((db, owner, job))
}
