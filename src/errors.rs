//! Unified error type for the repair-shop core.
//!
//! Every fallible operation in the crate returns [`Result`]. The variants fall
//! into three families the surrounding interface layer cares about: validation
//! errors (bad operator input, rejected without mutating state), not-found
//! errors (a referenced owner/job/payment/user does not exist), and
//! storage/infrastructure errors (the transaction rolled back, nothing was
//! persisted).

use thiserror::Error;

/// All errors produced by the repair-shop core.
#[derive(Debug, Error)]
pub enum Error {
    /// Bad or missing operator input (empty name, missing field, ...)
    #[error("Validation error: {message}")]
    Validation {
        /// Human-readable description of what was rejected
        message: String,
    },

    /// A payment or price amount that is non-positive or non-finite
    #[error("Invalid amount: {amount}")]
    InvalidAmount {
        /// The rejected amount
        amount: f64,
    },

    /// A payment that would drive the remaining balance below zero
    #[error("Payment of {amount} exceeds remaining balance of {remaining}")]
    Overpayment {
        /// The rejected payment amount
        amount: f64,
        /// The job's remaining balance at the time of the attempt
        remaining: f64,
    },

    /// An owner name that is already taken
    #[error("Owner '{name}' already exists")]
    DuplicateOwner {
        /// The colliding name
        name: String,
    },

    /// A status string that is not one of the three recognized values
    #[error("Unknown job status: '{value}'")]
    UnknownStatus {
        /// The unrecognized input
        value: String,
    },

    /// Referenced owner does not exist
    #[error("Owner not found: {name}")]
    OwnerNotFound {
        /// Name or id of the missing owner
        name: String,
    },

    /// Referenced repair job does not exist
    #[error("Repair job not found: {id}")]
    JobNotFound {
        /// Primary key of the missing job
        id: i64,
    },

    /// Referenced payment does not exist
    #[error("Payment not found: {id}")]
    PaymentNotFound {
        /// Primary key of the missing payment
        id: i64,
    },

    /// Referenced user does not exist
    #[error("User not found: {username}")]
    UserNotFound {
        /// The unknown username
        username: String,
    },

    /// Configuration error (unreadable or malformed settings)
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong while loading configuration
        message: String,
    },

    /// Underlying storage failure; the enclosing transaction rolled back
    #[error("Storage error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Password hashing or verification failure
    #[error("Password hash error: {0}")]
    PasswordHash(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Environment variable error
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),
}

impl Error {
    /// True for rejected-input errors: state is unchanged and the condition
    /// should be reported back to the operator.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::Validation { .. }
                | Self::InvalidAmount { .. }
                | Self::Overpayment { .. }
                | Self::DuplicateOwner { .. }
                | Self::UnknownStatus { .. }
        )
    }

    /// True when a referenced entity does not exist.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::OwnerNotFound { .. }
                | Self::JobNotFound { .. }
                | Self::PaymentNotFound { .. }
                | Self::UserNotFound { .. }
        )
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
