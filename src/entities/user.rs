//! User entity - The administrative credential gating access to the shop.
//!
//! Not part of the business domain; the surrounding web layer authenticates
//! against this table before invoking any core operation. Passwords are
//! stored as salted argon2id PHC strings (see [`crate::core::auth`]).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// User database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    /// Unique identifier for the user
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Login name, unique
    #[sea_orm(unique)]
    pub username: String,
    /// Salted argon2id password hash in PHC string format
    pub password_hash: String,
}

/// `User` has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
