//! Core business logic, one module per concern.
//!
//! All operations are framework-agnostic: they take a `&DatabaseConnection`,
//! run to completion inside a single transaction where they mutate more than
//! one row, and return structured data for the interface layer to render.

/// Administrative credential storage and verification
pub mod auth;
/// Pure balance arithmetic over a job's payment ledger
pub mod balance;
/// Repair job lifecycle and status transitions
pub mod job;
/// Owner identity management and the owner detail view
pub mod owner;
/// Payment acceptance and removal with status recomputation
pub mod payment;
/// On-demand owner summaries and the shop dashboard
pub mod report;
