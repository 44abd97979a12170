//! Material registry.
//!
//! Create-once [`MaterialRecord`] values keyed by [`MaterialId`]. The only
//! mutable field is the ethical status flag. The supplier a material names is
//! not looked up in the supplier registry.

use std::collections::BTreeMap;

use provenance_types::{LedgerEventKind, MaterialId, MaterialRecord, SupplierId};

use crate::context::CallContext;
use crate::error::{LedgerError, RecordKind};
use crate::gate::AdminGate;

/// Parameters for registering a material.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMaterial {
    /// Key of the new material.
    pub material_id: MaterialId,
    /// Display name.
    pub name: String,
    /// Producing supplier (not validated).
    pub supplier_id: SupplierId,
    /// Producer batch number.
    pub batch_number: String,
}

/// Create-once material records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaterialRegistry {
    records: BTreeMap<MaterialId, MaterialRecord>,
}

impl MaterialRegistry {
    /// Create an empty registry.
    pub const fn new() -> Self {
        Self {
            records: BTreeMap::new(),
        }
    }

    /// Return the number of registered materials.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Return whether no material is registered.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Return whether `material_id` is registered.
    pub fn contains(&self, material_id: &MaterialId) -> bool {
        self.records.contains_key(material_id)
    }

    /// Register a material produced at the call's height.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Unauthorized`] if the caller is not the admin,
    /// or [`LedgerError::AlreadyExists`] if the key is taken.
    pub fn register(
        &mut self,
        gate: &AdminGate,
        ctx: &CallContext,
        material: NewMaterial,
    ) -> Result<LedgerEventKind, LedgerError> {
        gate.authorize(&ctx.caller)?;
        if self.records.contains_key(&material.material_id) {
            return Err(LedgerError::already_exists(
                RecordKind::Material,
                &material.material_id,
            ));
        }

        let NewMaterial {
            material_id,
            name,
            supplier_id,
            batch_number,
        } = material;

        self.records.insert(
            material_id.clone(),
            MaterialRecord::registered(
                name.clone(),
                supplier_id.clone(),
                batch_number.clone(),
                ctx.now,
            ),
        );

        Ok(LedgerEventKind::MaterialRegistered {
            material_id,
            name,
            supplier_id,
            batch_number,
        })
    }

    /// Overwrite a material's ethical status. All other fields are untouched.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::Unauthorized`] if the caller is not the admin,
    /// or [`LedgerError::NotFound`] if the material is not registered.
    pub fn update_ethical_status(
        &mut self,
        gate: &AdminGate,
        ctx: &CallContext,
        material_id: MaterialId,
        status: bool,
    ) -> Result<LedgerEventKind, LedgerError> {
        gate.authorize(&ctx.caller)?;
        let Some(record) = self.records.get_mut(&material_id) else {
            return Err(LedgerError::not_found(RecordKind::Material, &material_id));
        };

        record.ethical_status = status;

        Ok(LedgerEventKind::EthicalStatusUpdated {
            material_id,
            status,
        })
    }

    /// Look up a material.
    pub fn get(&self, material_id: &MaterialId) -> Option<&MaterialRecord> {
        self.records.get(material_id)
    }

    /// Iterate over all materials in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&MaterialId, &MaterialRecord)> {
        self.records.iter()
    }
}
