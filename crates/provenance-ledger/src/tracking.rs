//! Custody tracking log.
//!
//! Entries are keyed by the composite `(material, stage)`. Each stage of a
//! material holds at most one entry: re-tracking a stage replaces it
//! (last write wins), while distinct stages accumulate in any order.
//!
//! Tracking is not admin-gated. Any caller may record a stage; the caller is
//! stored as the entry's handler. The material must already be registered.

use std::collections::BTreeMap;

use provenance_types::{LedgerEventKind, MaterialId, StageId, TrackingEntry};

use crate::context::CallContext;
use crate::error::{LedgerError, RecordKind};
use crate::material::MaterialRegistry;

/// Sparse per-material map of stage entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackingLog {
    entries: BTreeMap<MaterialId, BTreeMap<StageId, TrackingEntry>>,
}

impl TrackingLog {
    /// Create an empty log.
    pub const fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Return the total number of stage entries across all materials.
    pub fn len(&self) -> usize {
        self.entries.values().map(BTreeMap::len).sum()
    }

    /// Return whether the log has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Record (or replace) the entry for `stage_id` of `material_id`.
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::NotFound`] if `materials` has no such material.
    pub fn track(
        &mut self,
        materials: &MaterialRegistry,
        ctx: &CallContext,
        material_id: MaterialId,
        stage_id: StageId,
        location: String,
        notes: String,
    ) -> Result<LedgerEventKind, LedgerError> {
        if !materials.contains(&material_id) {
            return Err(LedgerError::not_found(RecordKind::Material, &material_id));
        }

        let entry = TrackingEntry {
            timestamp: ctx.now,
            location: location.clone(),
            handler: ctx.caller.clone(),
            notes: notes.clone(),
        };
        self.entries
            .entry(material_id.clone())
            .or_default()
            .insert(stage_id, entry);

        Ok(LedgerEventKind::MaterialTracked {
            material_id,
            stage_id,
            location,
            notes,
        })
    }

    /// Look up the entry for one stage of a material.
    pub fn get(&self, material_id: &MaterialId, stage_id: StageId) -> Option<&TrackingEntry> {
        self.entries.get(material_id)?.get(&stage_id)
    }

    /// Return the tracked stages of a material in ascending order.
    pub fn stages(&self, material_id: &MaterialId) -> Vec<StageId> {
        self.entries
            .get(material_id)
            .map(|stages| stages.keys().copied().collect())
            .unwrap_or_default()
    }

    /// Return the nested `material -> stage -> entry` map.
    pub const fn as_map(&self) -> &BTreeMap<MaterialId, BTreeMap<StageId, TrackingEntry>> {
        &self.entries
    }
}
