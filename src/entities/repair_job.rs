//! Repair job entity - A single repair engagement for one device.
//!
//! Each job belongs to one owner and owns an itemized ledger of payments.
//! The amount paid and the remaining balance are always derived from that
//! ledger (see [`crate::core::balance`]); the only payment-related state
//! stored here is the three-valued [`JobStatus`], which is promoted to
//! `Completed` automatically when the ledger covers the price. The `returned`
//! flag tracks physical hand-back of the device and never interacts with
//! payment logic.

// `DeriveEntityModel` expands against the std `Result` and its own `Error`
// associated type, so the crate aliases must not shadow them here.
use crate::errors::Error as CoreError;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Repair job database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "repair_jobs")]
pub struct Model {
    /// Unique identifier for the job
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the owner this job belongs to
    pub owner_id: i64,
    /// Device model brought in (e.g., "iPhone 12")
    pub device: String,
    /// Description of the reported issue
    pub issue: String,
    /// Agreed total price for the repair, non-negative
    pub price: f64,
    /// Repair progress; promoted to `Completed` when fully paid
    pub status: JobStatus,
    /// Whether the device has been handed back to the customer
    pub returned: bool,
    /// When the device was received
    pub date_received: DateTimeUtc,
    /// When the job was last modified
    pub date_updated: DateTimeUtc,
}

/// Three-valued repair job status, stored as its display string.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum JobStatus {
    /// Job received, work not started
    #[sea_orm(string_value = "Pending")]
    Pending,
    /// Work underway (explicit operator action, never automatic)
    #[sea_orm(string_value = "In Progress")]
    InProgress,
    /// Job finished; also set automatically when the ledger covers the price
    #[sea_orm(string_value = "Completed")]
    Completed,
}

impl JobStatus {
    /// The database/display string for this status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
        }
    }

    /// Parses operator input into a status, rejecting anything but the three
    /// recognized values.
    pub fn parse(value: &str) -> Result<Self, CoreError> {
        match value.trim() {
            "Pending" => Ok(Self::Pending),
            "In Progress" => Ok(Self::InProgress),
            "Completed" => Ok(Self::Completed),
            other => Err(CoreError::UnknownStatus {
                value: other.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Defines relationships between RepairJob and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each job belongs to one owner
    #[sea_orm(
        belongs_to = "super::owner::Entity",
        from = "Column::OwnerId",
        to = "super::owner::Column::Id",
        on_delete = "Cascade"
    )]
    Owner,
    /// One job has many payments
    #[sea_orm(has_many = "super::payment::Entity")]
    Payments,
}

impl Related<super::owner::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Owner.def()
    }
}

impl Related<super::payment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Payments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
