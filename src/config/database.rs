//! Database configuration module for `RepairDesk`.
//!
//! Handles the `SQLite` connection and table creation using `SeaORM`. The
//! schema is generated with `Schema::create_table_from_entity` from the
//! entity definitions, so the database always matches the Rust structs
//! without hand-written SQL. Cascade foreign keys come from the entity
//! relation definitions; the core additionally deletes children explicitly
//! inside its transactions, so no orphan rows appear either way.

use crate::entities::{Owner, Payment, RepairJob, User};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};

/// Gets the database URL from the `DATABASE_URL` environment variable, or
/// falls back to a local `SQLite` file (created on first use).
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL")
        .unwrap_or_else(|_| "sqlite://repairdesk.sqlite?mode=rwc".to_string())
}

/// Establishes a connection to the database named by [`get_database_url`].
pub async fn create_connection() -> Result<DatabaseConnection> {
    Database::connect(get_database_url()).await.map_err(Into::into)
}

/// Creates all tables from the entity definitions: owners, repair jobs,
/// payments, and users.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let owner_table = schema.create_table_from_entity(Owner);
    let repair_job_table = schema.create_table_from_entity(RepairJob);
    let payment_table = schema.create_table_from_entity(Payment);
    let user_table = schema.create_table_from_entity(User);

    db.execute(builder.build(&owner_table)).await?;
    db.execute(builder.build(&repair_job_table)).await?;
    db.execute(builder.build(&payment_table)).await?;
    db.execute(builder.build(&user_table)).await?;

    Ok(())
}
