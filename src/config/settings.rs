//! Application settings loaded from `repairdesk.toml`.
//!
//! The settings file is optional; every field has a default so a fresh
//! checkout runs without any configuration. It carries the payment deletion
//! policy (see [`PaymentDeletePolicy`]) and the bootstrap admin credential
//! seeded on first startup.

use crate::core::payment::PaymentDeletePolicy;
use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Application settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// What happens to a job's status when a payment is deleted
    pub payment_delete_policy: PaymentDeletePolicy,
    /// Username seeded when no user exists yet
    pub admin_username: String,
    /// Password seeded when no user exists yet; change it after bootstrap
    pub admin_password: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            payment_delete_policy: PaymentDeletePolicy::default(),
            admin_username: "admin".to_string(),
            admin_password: "admin".to_string(),
        }
    }
}

/// Loads settings from a TOML file.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<Settings> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read settings file: {e}"),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse repairdesk.toml: {e}"),
    })
}

/// Loads settings from `./repairdesk.toml`, falling back to defaults when
/// the file does not exist.
pub fn load_default_settings() -> Result<Settings> {
    let path = Path::new("repairdesk.toml");
    if path.exists() {
        load_settings(path)
    } else {
        Ok(Settings::default())
    }
}
