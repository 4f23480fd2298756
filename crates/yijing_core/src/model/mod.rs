//! Domain model for divination and fortune records.
//!
//! # Responsibility
//! - Define the value types produced by chart and deck computations.
//! - Define the persisted record shapes for divinations and daily fortunes.
//!
//! # Invariants
//! - Chart and card types are immutable value types.
//! - Records are identified by a stable `RecordId` and are never mutated
//!   after creation except for the divination soft-delete marker.

pub mod bazi;
pub mod divination;
pub mod fortune;
pub mod tarot;

use uuid::Uuid;

/// Stable identifier for persisted divination and fortune records.
pub type RecordId = Uuid;

/// Identifier of the account that owns a record.
///
/// Accounts live outside this crate; the core only stores the id.
pub type OwnerId = i64;
