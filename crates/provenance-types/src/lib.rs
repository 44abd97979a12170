//! Shared type definitions for the provenance ledger.
//!
//! # Modules
//!
//! - [`ids`] -- Key, identity, stage, and block-height wrappers
//! - [`records`] -- Supplier, material, and tracking records
//! - [`events`] -- Journal events produced by applied mutations

pub mod events;
pub mod ids;
pub mod records;

// Re-export all public types at crate root for convenience.
pub use events::{LedgerEvent, LedgerEventKind};
pub use ids::{BlockHeight, MaterialId, Principal, StageId, SupplierId};
pub use records::{MaterialRecord, SupplierRecord, TrackingEntry};
