//! Bootstrap binary: prepares the database for the repair-shop ledger.
//!
//! Creates the schema from the entity definitions and seeds the default
//! admin credential if no user exists yet. Run it once before starting the
//! web layer, or rerun it any time - every step is idempotent.

use dotenvy::dotenv;
use repairdesk::{
    config::{database, settings},
    core::auth,
    errors::Result,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; env vars can also be set externally
    dotenv().ok();
    info!("Attempted to load .env file.");

    // 3. Load application settings (optional repairdesk.toml)
    let settings = settings::load_default_settings()
        .inspect_err(|e| error!("Failed to load settings: {e}"))?;
    info!(
        "Settings loaded (payment deletion policy: {:?}).",
        settings.payment_delete_policy
    );

    // 4. Open the database and ensure the schema exists
    let db = database::create_connection()
        .await
        .inspect(|_| info!("Database connection established."))
        .inspect_err(|e| error!("Failed to connect to database: {e}"))?;
    database::create_tables(&db)
        .await
        .inspect(|_| info!("Database tables ensured."))
        .inspect_err(|e| error!("Failed to create tables: {e}"))?;

    // 5. Seed the bootstrap admin credential if no user exists
    match auth::ensure_default_admin(&db, &settings.admin_username, &settings.admin_password)
        .await?
    {
        Some(user) => info!(
            "Seeded default admin user '{}'; change its password after first login.",
            user.username
        ),
        None => info!("User table already populated; nothing to seed."),
    }

    Ok(())
}
