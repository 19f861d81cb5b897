//! Payment entity - A partial or full payment recorded against a repair job.
//!
//! Payments are immutable once created; the only mutation is deletion, which
//! triggers a status recomputation on the parent job (see
//! [`crate::core::payment`]).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Payment database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "payments")]
pub struct Model {
    /// Unique identifier for the payment
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the repair job this payment belongs to
    pub job_id: i64,
    /// Payment amount in the shop's single currency, strictly positive
    pub amount: f64,
    /// Optional free-text note (e.g., "cash", "deposit")
    pub note: Option<String>,
    /// Server-assigned creation timestamp
    pub date: DateTimeUtc,
}

/// Defines relationships between Payment and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each payment belongs to one repair job
    #[sea_orm(
        belongs_to = "super::repair_job::Entity",
        from = "Column::JobId",
        to = "super::repair_job::Column::Id",
        on_delete = "Cascade"
    )]
    RepairJob,
}

impl Related<super::repair_job::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RepairJob.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
