//! Provenance ledger for raw materials and their suppliers.
//!
//! The ledger records create-once facts about suppliers and materials, lets a
//! single admin identity mutate them, and keeps a per-material log of custody
//! events keyed by `(material, stage)`.
//!
//! # Architecture
//!
//! - [`gate`] -- The [`AdminGate`]: single admin identity comparison.
//! - [`clock`] -- The [`LogicalClock`] trait and host-advanced block heights.
//! - [`context`] -- The [`CallContext`] carrying caller and height per call.
//! - [`supplier`] -- The [`SupplierRegistry`].
//! - [`material`] -- The [`MaterialRegistry`].
//! - [`tracking`] -- The [`TrackingLog`] of custody entries.
//! - [`journal`] -- Append-only history of applied mutations.
//! - [`ledger`] -- The thread-safe [`ProvenanceLedger`] facade.
//!
//! # Rules
//!
//! | Call | Gated | Fails with |
//! |------|-------|------------|
//! | `register_supplier` | admin | 403, 100 |
//! | `verify_supplier` | admin | 403, 404 |
//! | `register_material` | admin | 403, 100 |
//! | `update_ethical_status` | admin | 403, 404 |
//! | `track_material` | anyone | 404 |
//!
//! Preconditions are checked before any write: a rejected call leaves every
//! table exactly as it was. Reads never fail and are never gated.
//!
//! # Usage
//!
//! ```
//! use provenance_ledger::{BlockHeightClock, CallContext, ProvenanceLedger};
//! use provenance_types::{BlockHeight, Principal, SupplierId};
//!
//! let admin = Principal::new("ST1PQHQKV0RJXZFY1DGX8MNSNYVE3VGZJSRTPGZGM");
//! let ledger = ProvenanceLedger::new(admin.clone());
//! let clock = BlockHeightClock::new(BlockHeight(100));
//!
//! let ctx = CallContext::from_clock(admin, &clock);
//! let supplier = SupplierId::new("supplier-001");
//! ledger
//!     .register_supplier(&ctx, supplier.clone(), "Eco Fabrics Inc".to_owned())
//!     .ok();
//! ledger
//!     .verify_supplier(&ctx, supplier.clone(), 85, "Meets ethical standards".to_owned())
//!     .ok();
//!
//! assert!(ledger.is_supplier_verified(&supplier));
//! ```

pub mod clock;
pub mod context;
pub mod error;
pub mod gate;
pub mod journal;
pub mod ledger;
pub mod material;
pub mod supplier;
pub mod tracking;

// Re-export primary types at crate root.
pub use clock::{BlockHeightClock, ClockError, FixedClock, LogicalClock};
pub use context::CallContext;
pub use error::{
    ERR_ALREADY_EXISTS, ERR_NOT_FOUND, ERR_UNAUTHORIZED, ErrorKind, LedgerError, RecordKind,
};
pub use gate::AdminGate;
pub use journal::Journal;
pub use ledger::{LedgerSnapshot, ProvenanceLedger};
pub use material::{MaterialRegistry, NewMaterial};
pub use supplier::SupplierRegistry;
pub use tracking::TrackingLog;
