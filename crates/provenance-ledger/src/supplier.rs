//! Supplier registry.
//!
//! The [`SupplierRegistry`] holds create-once [`SupplierRecord`] values keyed
//! by [`SupplierId`]. Registration and verification are gated to the admin;
//! lookups are open to anyone.
//!
//! Verification may be repeated. Each call overwrites the score, date, and
//! verifier. `verified` never returns to `false`.

use std::collections::BTreeMap;

use provenance_types::{LedgerEventKind, SupplierId, SupplierRecord};

use crate::context::CallContext;
use crate::error::{LedgerError, RecordKind};
use crate::gate::AdminGate;

/// Create-once supplier records with upgradeable verification state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SupplierRegistry {
    records: BTreeMap<SupplierId, SupplierRecord>,
}

impl SupplierRegistry {
    /// Create an empty registry.
    pub const fn new() -> Self {
        Self {
            records: BTreeMap::new(),
        }
    }

    /// Return the number of registered suppliers.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Return whether no supplier is registered.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Register a new, unverified supplier.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Unauthorized`] if the caller is not the admin,
    /// or [`LedgerError::AlreadyExists`] if `supplier_id` is taken.
    pub fn register(
        &mut self,
        gate: &AdminGate,
        ctx: &CallContext,
        supplier_id: SupplierId,
        name: String,
    ) -> Result<LedgerEventKind, LedgerError> {
        gate.authorize(&ctx.caller)?;
        if self.records.contains_key(&supplier_id) {
            return Err(LedgerError::already_exists(
                RecordKind::Supplier,
                &supplier_id,
            ));
        }

        self.records.insert(
            supplier_id.clone(),
            SupplierRecord::registered(name.clone(), ctx.caller.clone()),
        );

        Ok(LedgerEventKind::SupplierRegistered { supplier_id, name })
    }

    /// Mark a supplier verified with the given score at the call's height.
    ///
    /// `notes` are not stored on the record; they travel with the returned
    /// event.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Unauthorized`] if the caller is not the admin,
    /// or [`LedgerError::NotFound`] if `supplier_id` is not registered.
    pub fn verify(
        &mut self,
        gate: &AdminGate,
        ctx: &CallContext,
        supplier_id: SupplierId,
        ethical_score: u32,
        notes: String,
    ) -> Result<LedgerEventKind, LedgerError> {
        gate.authorize(&ctx.caller)?;
        let Some(record) = self.records.get_mut(&supplier_id) else {
            return Err(LedgerError::not_found(RecordKind::Supplier, &supplier_id));
        };

        record.verified = true;
        record.ethical_score = ethical_score;
        record.verification_date = ctx.now;
        record.verifier = ctx.caller.clone();

        Ok(LedgerEventKind::SupplierVerified {
            supplier_id,
            ethical_score,
            notes,
        })
    }

    /// Look up a supplier.
    pub fn get(&self, supplier_id: &SupplierId) -> Option<&SupplierRecord> {
        self.records.get(supplier_id)
    }

    /// Return whether the supplier exists and has been verified.
    ///
    /// Unknown suppliers are simply not verified.
    pub fn is_verified(&self, supplier_id: &SupplierId) -> bool {
        self.records
            .get(supplier_id)
            .is_some_and(|record| record.verified)
    }

    /// Iterate over all suppliers in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&SupplierId, &SupplierRecord)> {
        self.records.iter()
    }
}
