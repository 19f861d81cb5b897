/// Database configuration and connection management
pub mod database;

/// Application settings loaded from repairdesk.toml
pub mod settings;
