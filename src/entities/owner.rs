//! Owner entity - Represents a customer who brings devices in for repair.
//!
//! Owners are identified by a globally unique name. Deleting an owner
//! cascades to its repair jobs and, transitively, their payments.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Owner database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "owners")]
pub struct Model {
    /// Unique identifier for the owner
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Customer name, globally unique across the shop
    #[sea_orm(unique)]
    pub name: String,
    /// When the owner record was created
    pub date_added: DateTimeUtc,
}

/// Defines relationships between Owner and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One owner has many repair jobs
    #[sea_orm(has_many = "super::repair_job::Entity")]
    RepairJobs,
}

impl Related<super::repair_job::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RepairJobs.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
