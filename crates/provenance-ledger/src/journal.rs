//! Append-only journal of applied mutations.
//!
//! The journal keeps the full history that the registries overwrite: every
//! verification (with its notes) and every re-tracked stage. Entries are
//! never modified or deleted.

use provenance_types::{LedgerEvent, LedgerEventKind, MaterialId, SupplierId};

use crate::context::CallContext;

/// Applied mutations in the order the ledger applied them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Journal {
    events: Vec<LedgerEvent>,
}

impl Journal {
    /// Create an empty journal.
    pub const fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Return the number of recorded events.
    pub const fn len(&self) -> usize {
        self.events.len()
    }

    /// Return whether no event has been recorded.
    pub const fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Append an event for a call that has just been applied. Returns its
    /// sequence number.
    pub fn append(&mut self, ctx: &CallContext, kind: LedgerEventKind) -> u64 {
        let sequence = u64::try_from(self.events.len()).unwrap_or(u64::MAX);
        self.events.push(LedgerEvent {
            sequence,
            height: ctx.now,
            caller: ctx.caller.clone(),
            kind,
        });
        sequence
    }

    /// Return all events, oldest first.
    pub fn all(&self) -> &[LedgerEvent] {
        &self.events
    }

    /// Return the events concerning one material, oldest first.
    pub fn for_material(&self, material_id: &MaterialId) -> Vec<&LedgerEvent> {
        self.events
            .iter()
            .filter(|e| e.kind.material_id() == Some(material_id))
            .collect()
    }

    /// Return the events concerning one supplier, oldest first.
    pub fn for_supplier(&self, supplier_id: &SupplierId) -> Vec<&LedgerEvent> {
        self.events
            .iter()
            .filter(|e| e.kind.supplier_id() == Some(supplier_id))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use provenance_types::{BlockHeight, Principal, StageId};

    use super::*;

    fn ctx(height: u64) -> CallContext {
        CallContext::new(Principal::new("admin"), BlockHeight(height))
    }

    fn tracked(material: &str, stage: u64) -> LedgerEventKind {
        LedgerEventKind::MaterialTracked {
            material_id: MaterialId::new(material),
            stage_id: StageId(stage),
            location: "Site".to_owned(),
            notes: String::new(),
        }
    }

    #[test]
    fn new_journal_is_empty() {
        let journal = Journal::new();
        assert!(journal.is_empty());
        assert_eq!(journal.len(), 0);
    }

    #[test]
    fn append_assigns_sequence_and_stamp() {
        let mut journal = Journal::new();
        assert_eq!(journal.append(&ctx(100), tracked("m-1", 1)), 0);
        assert_eq!(journal.append(&ctx(101), tracked("m-1", 1)), 1);

        let second = journal.all().last();
        assert_eq!(second.map(|e| e.height), Some(BlockHeight(101)));
        assert_eq!(second.map(|e| &e.caller), Some(&Principal::new("admin")));
        assert_eq!(journal.len(), 2);
    }

    #[test]
    fn for_material_filters() {
        let mut journal = Journal::new();
        journal.append(&ctx(100), tracked("m-1", 1));
        journal.append(&ctx(100), tracked("m-2", 1));
        journal.append(
            &ctx(100),
            LedgerEventKind::SupplierRegistered {
                supplier_id: SupplierId::new("s-1"),
                name: "Eco Fabrics Inc".to_owned(),
            },
        );
        journal.append(&ctx(101), tracked("m-1", 2));

        let history = journal.for_material(&MaterialId::new("m-1"));
        assert_eq!(history.len(), 2);
        assert_eq!(journal.for_supplier(&SupplierId::new("s-1")).len(), 1);
    }
}
