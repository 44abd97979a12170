//! Journal events emitted by applied ledger mutations.
//!
//! Every successful state change produces exactly one [`LedgerEvent`].
//! Rejected calls produce none. Verification notes are kept here even though
//! the supplier record itself does not store them.

use serde::{Deserialize, Serialize};

use crate::ids::{BlockHeight, MaterialId, Principal, StageId, SupplierId};

/// The state change carried by a [`LedgerEvent`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LedgerEventKind {
    /// A supplier record was created.
    SupplierRegistered {
        /// The new supplier's key.
        supplier_id: SupplierId,
        /// The supplier's display name.
        name: String,
    },
    /// A supplier was (re-)verified.
    SupplierVerified {
        /// The verified supplier's key.
        supplier_id: SupplierId,
        /// The score assigned.
        ethical_score: u32,
        /// Verifier notes passed with the call.
        notes: String,
    },
    /// A material record was created.
    MaterialRegistered {
        /// The new material's key.
        material_id: MaterialId,
        /// The material's display name.
        name: String,
        /// The referenced supplier key (unchecked).
        supplier_id: SupplierId,
        /// Producer batch number.
        batch_number: String,
    },
    /// A material's ethical status flag was overwritten.
    EthicalStatusUpdated {
        /// The material's key.
        material_id: MaterialId,
        /// The new status.
        status: bool,
    },
    /// A tracking entry was written for a material stage.
    MaterialTracked {
        /// The tracked material's key.
        material_id: MaterialId,
        /// The stage written.
        stage_id: StageId,
        /// Location recorded for the stage.
        location: String,
        /// Handler notes.
        notes: String,
    },
}

impl LedgerEventKind {
    /// Return the material this event concerns, if any.
    pub const fn material_id(&self) -> Option<&MaterialId> {
        match self {
            Self::MaterialRegistered { material_id, .. }
            | Self::EthicalStatusUpdated { material_id, .. }
            | Self::MaterialTracked { material_id, .. } => Some(material_id),
            Self::SupplierRegistered { .. } | Self::SupplierVerified { .. } => None,
        }
    }

    /// Return the supplier this event concerns, if any.
    ///
    /// A material registration does not count: its supplier reference is
    /// unchecked and may name a supplier that was never registered.
    pub const fn supplier_id(&self) -> Option<&SupplierId> {
        match self {
            Self::SupplierRegistered { supplier_id, .. }
            | Self::SupplierVerified { supplier_id, .. } => Some(supplier_id),
            Self::MaterialRegistered { .. }
            | Self::EthicalStatusUpdated { .. }
            | Self::MaterialTracked { .. } => None,
        }
    }
}

/// One applied mutation, in the order the ledger applied it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEvent {
    /// Zero-based position in the journal.
    pub sequence: u64,
    /// Logical time of the call.
    pub height: BlockHeight,
    /// The caller that issued the mutation.
    pub caller: Principal,
    /// What changed.
    pub kind: LedgerEventKind,
}
