//! The provenance ledger: thread-safe facade over the three tables.
//!
//! [`ProvenanceLedger`] owns the admin gate, the supplier and material
//! registries, the tracking log, and the journal. Each table sits behind its
//! own [`RwLock`], so every mutating call is linearizable per table and a
//! duplicate check can never be raced past. Reads take shared locks and see
//! whole records, never a torn write.
//!
//! # Lock order
//!
//! Locks are always taken in the order suppliers, materials, tracking,
//! journal. The journal lock is acquired while the table lock is still held,
//! so journal order equals application order.

use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::{Deserialize, Serialize};

use provenance_types::{
    LedgerEvent, LedgerEventKind, MaterialId, MaterialRecord, Principal, StageId, SupplierId,
    SupplierRecord, TrackingEntry,
};

use crate::context::CallContext;
use crate::error::LedgerError;
use crate::gate::AdminGate;
use crate::journal::Journal;
use crate::material::{MaterialRegistry, NewMaterial};
use crate::supplier::SupplierRegistry;
use crate::tracking::TrackingLog;

// ---------------------------------------------------------------------------
// Snapshot
// ---------------------------------------------------------------------------

/// A consistent copy of all ledger tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    /// The admin identity.
    pub admin: Principal,
    /// Supplier records keyed by supplier id.
    pub suppliers: BTreeMap<SupplierId, SupplierRecord>,
    /// Material records keyed by material id.
    pub materials: BTreeMap<MaterialId, MaterialRecord>,
    /// Tracking entries keyed by material id, then stage id.
    pub tracking: BTreeMap<MaterialId, BTreeMap<StageId, TrackingEntry>>,
}

// ---------------------------------------------------------------------------
// Ledger
// ---------------------------------------------------------------------------

/// Supplier registry, material registry, and tracking log behind one admin.
#[derive(Debug)]
pub struct ProvenanceLedger {
    gate: AdminGate,
    suppliers: RwLock<SupplierRegistry>,
    materials: RwLock<MaterialRegistry>,
    tracking: RwLock<TrackingLog>,
    journal: RwLock<Journal>,
}

impl ProvenanceLedger {
    /// Create an empty ledger administered by `admin`.
    pub const fn new(admin: Principal) -> Self {
        Self {
            gate: AdminGate::new(admin),
            suppliers: RwLock::new(SupplierRegistry::new()),
            materials: RwLock::new(MaterialRegistry::new()),
            tracking: RwLock::new(TrackingLog::new()),
            journal: RwLock::new(Journal::new()),
        }
    }

    /// Return the admin identity fixed at construction.
    pub const fn admin(&self) -> &Principal {
        self.gate.admin()
    }

    /// Return whether `caller` may perform gated mutations.
    pub fn is_authorized(&self, caller: &Principal) -> bool {
        self.gate.is_authorized(caller)
    }

    // -----------------------------------------------------------------------
    // Suppliers
    // -----------------------------------------------------------------------

    /// Register a new supplier.
    ///
    /// # Errors
    ///
    /// [`LedgerError::Unauthorized`] for a non-admin caller,
    /// [`LedgerError::AlreadyExists`] if the id is taken.
    pub fn register_supplier(
        &self,
        ctx: &CallContext,
        supplier_id: SupplierId,
        name: String,
    ) -> Result<(), LedgerError> {
        let mut suppliers = write(&self.suppliers);
        let outcome = suppliers.register(&self.gate, ctx, supplier_id, name);
        self.commit(ctx, outcome)
    }

    /// Verify (or re-verify) a supplier with an ethical score.
    ///
    /// # Errors
    ///
    /// [`LedgerError::Unauthorized`] for a non-admin caller,
    /// [`LedgerError::NotFound`] if the supplier is not registered.
    pub fn verify_supplier(
        &self,
        ctx: &CallContext,
        supplier_id: SupplierId,
        ethical_score: u32,
        notes: String,
    ) -> Result<(), LedgerError> {
        let mut suppliers = write(&self.suppliers);
        let outcome = suppliers.verify(&self.gate, ctx, supplier_id, ethical_score, notes);
        self.commit(ctx, outcome)
    }

    /// Look up a supplier.
    pub fn get_supplier(&self, supplier_id: &SupplierId) -> Option<SupplierRecord> {
        read(&self.suppliers).get(supplier_id).cloned()
    }

    /// Return whether a supplier is registered and verified.
    pub fn is_supplier_verified(&self, supplier_id: &SupplierId) -> bool {
        read(&self.suppliers).is_verified(supplier_id)
    }

    /// Return the number of registered suppliers.
    pub fn supplier_count(&self) -> usize {
        read(&self.suppliers).len()
    }

    // -----------------------------------------------------------------------
    // Materials
    // -----------------------------------------------------------------------

    /// Register a new material. The supplier id is not validated.
    ///
    /// # Errors
    ///
    /// [`LedgerError::Unauthorized`] for a non-admin caller,
    /// [`LedgerError::AlreadyExists`] if the id is taken.
    pub fn register_material(
        &self,
        ctx: &CallContext,
        material: NewMaterial,
    ) -> Result<(), LedgerError> {
        let mut materials = write(&self.materials);
        let outcome = materials.register(&self.gate, ctx, material);
        self.commit(ctx, outcome)
    }

    /// Overwrite a material's ethical status.
    ///
    /// # Errors
    ///
    /// [`LedgerError::Unauthorized`] for a non-admin caller,
    /// [`LedgerError::NotFound`] if the material is not registered.
    pub fn update_ethical_status(
        &self,
        ctx: &CallContext,
        material_id: MaterialId,
        status: bool,
    ) -> Result<(), LedgerError> {
        let mut materials = write(&self.materials);
        let outcome = materials.update_ethical_status(&self.gate, ctx, material_id, status);
        self.commit(ctx, outcome)
    }

    /// Look up a material.
    pub fn get_material(&self, material_id: &MaterialId) -> Option<MaterialRecord> {
        read(&self.materials).get(material_id).cloned()
    }

    /// Return the number of registered materials.
    pub fn material_count(&self) -> usize {
        read(&self.materials).len()
    }

    // -----------------------------------------------------------------------
    // Tracking
    // -----------------------------------------------------------------------

    /// Record a custody event for one stage of a material. Open to any caller.
    ///
    /// # Errors
    ///
    /// [`LedgerError::NotFound`] if the material is not registered.
    pub fn track_material(
        &self,
        ctx: &CallContext,
        material_id: MaterialId,
        stage_id: StageId,
        location: String,
        notes: String,
    ) -> Result<(), LedgerError> {
        let materials = read(&self.materials);
        let mut tracking = write(&self.tracking);
        let outcome = tracking.track(&materials, ctx, material_id, stage_id, location, notes);
        self.commit(ctx, outcome)
    }

    /// Look up the entry for one stage of a material.
    pub fn get_material_tracking(
        &self,
        material_id: &MaterialId,
        stage_id: StageId,
    ) -> Option<TrackingEntry> {
        read(&self.tracking).get(material_id, stage_id).cloned()
    }

    /// Return the tracked stages of a material in ascending order.
    pub fn stages_for_material(&self, material_id: &MaterialId) -> Vec<StageId> {
        read(&self.tracking).stages(material_id)
    }

    // -----------------------------------------------------------------------
    // History and snapshots
    // -----------------------------------------------------------------------

    /// Return every applied mutation, oldest first.
    pub fn events(&self) -> Vec<LedgerEvent> {
        read(&self.journal).all().to_vec()
    }

    /// Return the applied mutations concerning one material, oldest first.
    pub fn events_for_material(&self, material_id: &MaterialId) -> Vec<LedgerEvent> {
        read(&self.journal)
            .for_material(material_id)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Return the applied mutations concerning one supplier, oldest first.
    pub fn events_for_supplier(&self, supplier_id: &SupplierId) -> Vec<LedgerEvent> {
        read(&self.journal)
            .for_supplier(supplier_id)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Copy all tables under shared locks.
    pub fn snapshot(&self) -> LedgerSnapshot {
        let suppliers = read(&self.suppliers);
        let materials = read(&self.materials);
        let tracking = read(&self.tracking);

        LedgerSnapshot {
            admin: self.gate.admin().clone(),
            suppliers: suppliers
                .iter()
                .map(|(id, record)| (id.clone(), record.clone()))
                .collect(),
            materials: materials
                .iter()
                .map(|(id, record)| (id.clone(), record.clone()))
                .collect(),
            tracking: tracking.as_map().clone(),
        }
    }

    /// Journal an applied mutation, or log the rejection.
    ///
    /// Called while the caller still holds the table lock.
    fn commit(
        &self,
        ctx: &CallContext,
        outcome: Result<LedgerEventKind, LedgerError>,
    ) -> Result<(), LedgerError> {
        match outcome {
            Ok(kind) => {
                let sequence = write(&self.journal).append(ctx, kind);
                tracing::info!(
                    sequence,
                    caller = %ctx.caller,
                    height = ctx.now.get(),
                    "ledger mutation applied"
                );
                Ok(())
            }
            Err(err) => {
                tracing::debug!(
                    caller = %ctx.caller,
                    height = ctx.now.get(),
                    code = err.code(),
                    error = %err,
                    "ledger call rejected"
                );
                Err(err)
            }
        }
    }
}

/// Acquire a shared lock, recovering from poisoning.
///
/// Every mutation checks its preconditions before writing, so a panic in
/// another holder cannot have left a half-applied record behind.
fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

/// Acquire an exclusive lock, recovering from poisoning.
fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}
