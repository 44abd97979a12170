//! Ledger record types.
//!
//! Records are created once and mutated in place; none is ever removed.
//! Fields documented as immutable are only written by the constructors here.

use serde::{Deserialize, Serialize};

use crate::ids::{BlockHeight, Principal, SupplierId};

// ---------------------------------------------------------------------------
// Supplier
// ---------------------------------------------------------------------------

/// A supplier and the outcome of its most recent ethics verification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplierRecord {
    /// Display name, fixed at registration.
    pub name: String,
    /// Whether the supplier has been verified at least once.
    pub verified: bool,
    /// Score assigned by the latest verification (`0` until verified).
    pub ethical_score: u32,
    /// Height of the latest verification ([`BlockHeight::ZERO`] if never verified).
    pub verification_date: BlockHeight,
    /// The last actor to register or verify this supplier.
    pub verifier: Principal,
}

impl SupplierRecord {
    /// Build the record written by a fresh registration.
    pub const fn registered(name: String, registrar: Principal) -> Self {
        Self {
            name,
            verified: false,
            ethical_score: 0,
            verification_date: BlockHeight::ZERO,
            verifier: registrar,
        }
    }
}

// ---------------------------------------------------------------------------
// Material
// ---------------------------------------------------------------------------

/// A raw material batch produced by a supplier.
///
/// `supplier_id` is not checked against the supplier registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterialRecord {
    /// Display name, fixed at registration.
    pub name: String,
    /// The producing supplier's key.
    pub supplier_id: SupplierId,
    /// Producer batch number.
    pub batch_number: String,
    /// Height at which the material was registered.
    pub production_date: BlockHeight,
    /// Outcome of the latest ethical review; `false` until updated.
    pub ethical_status: bool,
}

impl MaterialRecord {
    /// Build the record written by a fresh registration at `height`.
    pub const fn registered(
        name: String,
        supplier_id: SupplierId,
        batch_number: String,
        height: BlockHeight,
    ) -> Self {
        Self {
            name,
            supplier_id,
            batch_number,
            production_date: height,
            ethical_status: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Tracking
// ---------------------------------------------------------------------------

/// A custody event for one stage of one material.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackingEntry {
    /// Height of the call that recorded this entry.
    pub timestamp: BlockHeight,
    /// Where the material was at this stage.
    pub location: String,
    /// The caller that recorded the entry.
    pub handler: Principal,
    /// Free-form handler notes.
    pub notes: String,
}
