//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod owner;
pub mod payment;
pub mod repair_job;
pub mod user;

// Re-export specific types to avoid conflicts
pub use owner::{Column as OwnerColumn, Entity as Owner, Model as OwnerModel};
pub use payment::{Column as PaymentColumn, Entity as Payment, Model as PaymentModel};
pub use repair_job::{
    Column as RepairJobColumn, Entity as RepairJob, JobStatus, Model as RepairJobModel,
};
pub use user::{Column as UserColumn, Entity as User, Model as UserModel};
