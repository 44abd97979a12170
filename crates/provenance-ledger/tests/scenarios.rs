//! End-to-end scenarios for the provenance ledger facade.
//!
//! Covers the supplier verification and material tracking flows, plus the
//! state-preservation guarantees for rejected calls.

// Integration tests use unwrap extensively for clarity -- panicking on
// failure is the correct behavior in test code.
#![allow(clippy::unwrap_used, clippy::missing_panics_doc, clippy::too_many_lines)]

use provenance_ledger::{
    BlockHeightClock, CallContext, ErrorKind, LogicalClock, NewMaterial, ProvenanceLedger,
};
use provenance_types::{BlockHeight, MaterialId, Principal, StageId, SupplierId};

const ADMIN: &str = "ST1PQHQKV0RJXZFY1DGX8MNSNYVE3VGZJSRTPGZGM";
const OUTSIDER: &str = "ST2CY5V39NHDPWSXMW9QDT3HC3GD6Q6XX4CFRK9AG";

// =============================================================================
// Helpers
// =============================================================================

struct Harness {
    ledger: ProvenanceLedger,
    clock: BlockHeightClock,
}

impl Harness {
    fn new() -> Self {
        Self {
            ledger: ProvenanceLedger::new(Principal::new(ADMIN)),
            clock: BlockHeightClock::new(BlockHeight(100)),
        }
    }

    fn as_admin(&self) -> CallContext {
        CallContext::from_clock(Principal::new(ADMIN), &self.clock)
    }

    fn as_outsider(&self) -> CallContext {
        CallContext::from_clock(Principal::new(OUTSIDER), &self.clock)
    }

    fn register_cotton(&self) {
        self.ledger
            .register_material(&self.as_admin(), cotton())
            .unwrap();
    }
}

fn cotton() -> NewMaterial {
    NewMaterial {
        material_id: MaterialId::new("material-001"),
        name: "Organic Cotton".to_owned(),
        supplier_id: SupplierId::new("supplier-001"),
        batch_number: "BATCH-2023-001".to_owned(),
    }
}

// =============================================================================
// Supplier verification
// =============================================================================

#[test]
fn register_then_verify_supplier() {
    let h = Harness::new();
    let id = SupplierId::new("supplier-001");

    h.ledger
        .register_supplier(&h.as_admin(), id.clone(), "Eco Fabrics Inc".to_owned())
        .unwrap();
    let record = h.ledger.get_supplier(&id).unwrap();
    assert_eq!(record.name, "Eco Fabrics Inc");
    assert!(!record.verified);
    assert!(!h.ledger.is_supplier_verified(&id));

    h.ledger
        .verify_supplier(&h.as_admin(), id.clone(), 85, "Meets ethical standards".to_owned())
        .unwrap();
    let record = h.ledger.get_supplier(&id).unwrap();
    assert!(h.ledger.is_supplier_verified(&id));
    assert_eq!(record.ethical_score, 85);
    assert_eq!(record.verification_date, BlockHeight(100));
}

#[test]
fn verification_date_follows_the_clock() {
    let h = Harness::new();
    let id = SupplierId::new("supplier-001");
    h.ledger
        .register_supplier(&h.as_admin(), id.clone(), "Eco Fabrics Inc".to_owned())
        .unwrap();

    h.clock.advance_to(BlockHeight(250)).unwrap();
    h.ledger
        .verify_supplier(&h.as_admin(), id.clone(), 70, String::new())
        .unwrap();

    let record = h.ledger.get_supplier(&id).unwrap();
    assert_eq!(record.verification_date, h.clock.now());
    assert_eq!(record.verifier, Principal::new(ADMIN));
}

#[test]
fn duplicate_supplier_is_rejected_with_code_100() {
    let h = Harness::new();
    let id = SupplierId::new("supplier-001");
    h.ledger
        .register_supplier(&h.as_admin(), id.clone(), "Eco Fabrics Inc".to_owned())
        .unwrap();

    let err = h
        .ledger
        .register_supplier(&h.as_admin(), id.clone(), "Duplicate Supplier".to_owned())
        .unwrap_err();
    assert_eq!(err.code(), 100);
    assert_eq!(h.ledger.get_supplier(&id).unwrap().name, "Eco Fabrics Inc");
}

#[test]
fn verifying_unknown_supplier_is_not_found() {
    let h = Harness::new();
    let err = h
        .ledger
        .verify_supplier(&h.as_admin(), SupplierId::new("non-existent"), 85, String::new())
        .unwrap_err();
    assert_eq!(err.code(), 404);
    assert!(h.ledger.get_supplier(&SupplierId::new("non-existent")).is_none());
    assert!(!h.ledger.is_supplier_verified(&SupplierId::new("non-existent")));
}

#[test]
fn outsider_cannot_register_supplier() {
    let h = Harness::new();
    let before = h.ledger.snapshot();

    let err = h
        .ledger
        .register_supplier(
            &h.as_outsider(),
            SupplierId::new("supplier-001"),
            "Eco Fabrics Inc".to_owned(),
        )
        .unwrap_err();

    assert_eq!(err.code(), 403);
    assert_eq!(h.ledger.snapshot(), before);
}

// =============================================================================
// Material registry and tracking
// =============================================================================

#[test]
fn register_then_track_material() {
    let h = Harness::new();
    h.register_cotton();

    let material = h.ledger.get_material(&MaterialId::new("material-001")).unwrap();
    assert_eq!(material.supplier_id, SupplierId::new("supplier-001"));
    assert_eq!(material.production_date, BlockHeight(100));
    assert!(!material.ethical_status);

    h.ledger
        .track_material(
            &h.as_admin(),
            MaterialId::new("material-001"),
            StageId(1),
            "Processing Facility A".to_owned(),
            "received".to_owned(),
        )
        .unwrap();

    let entry = h
        .ledger
        .get_material_tracking(&MaterialId::new("material-001"), StageId(1))
        .unwrap();
    assert_eq!(entry.location, "Processing Facility A");
    assert_eq!(entry.timestamp, BlockHeight(100));
}

#[test]
fn tracking_missing_material_creates_nothing() {
    let h = Harness::new();
    let before = h.ledger.snapshot();

    let err = h
        .ledger
        .track_material(
            &h.as_admin(),
            MaterialId::new("missing-material"),
            StageId(1),
            "Processing Facility A".to_owned(),
            "received".to_owned(),
        )
        .unwrap_err();

    assert_eq!(err.code(), 404);
    assert!(
        h.ledger
            .get_material_tracking(&MaterialId::new("missing-material"), StageId(1))
            .is_none()
    );
    assert_eq!(h.ledger.snapshot(), before);
}

#[test]
fn outsider_may_track_but_not_mutate() {
    let h = Harness::new();
    h.register_cotton();
    let id = MaterialId::new("material-001");

    h.ledger
        .track_material(
            &h.as_outsider(),
            id.clone(),
            StageId(2),
            "Port".to_owned(),
            "loaded".to_owned(),
        )
        .unwrap();
    let entry = h.ledger.get_material_tracking(&id, StageId(2)).unwrap();
    assert_eq!(entry.handler, Principal::new(OUTSIDER));

    let before = h.ledger.snapshot();
    let err = h
        .ledger
        .update_ethical_status(&h.as_outsider(), id.clone(), true)
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Unauthorized);
    let err = h
        .ledger
        .register_material(
            &h.as_outsider(),
            NewMaterial {
                material_id: MaterialId::new("material-002"),
                ..cotton()
            },
        )
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Unauthorized);
    assert_eq!(h.ledger.snapshot(), before);
}

#[test]
fn retracking_a_stage_keeps_only_the_latest() {
    let h = Harness::new();
    h.register_cotton();
    let id = MaterialId::new("material-001");

    h.ledger
        .track_material(
            &h.as_admin(),
            id.clone(),
            StageId(1),
            "Site A".to_owned(),
            "first".to_owned(),
        )
        .unwrap();
    h.clock.advance().unwrap();
    h.ledger
        .track_material(
            &h.as_admin(),
            id.clone(),
            StageId(1),
            "Site B".to_owned(),
            "second".to_owned(),
        )
        .unwrap();

    let entry = h.ledger.get_material_tracking(&id, StageId(1)).unwrap();
    assert_eq!(entry.location, "Site B");
    assert_eq!(entry.notes, "second");
    assert_eq!(entry.timestamp, BlockHeight(101));
    assert_eq!(h.ledger.stages_for_material(&id), vec![StageId(1)]);
}

#[test]
fn ethical_status_update_round() {
    let h = Harness::new();
    h.register_cotton();
    let id = MaterialId::new("material-001");

    h.ledger
        .update_ethical_status(&h.as_admin(), id.clone(), true)
        .unwrap();
    let record = h.ledger.get_material(&id).unwrap();
    assert!(record.ethical_status);
    assert_eq!(record.name, "Organic Cotton");
    assert_eq!(record.batch_number, "BATCH-2023-001");

    let err = h
        .ledger
        .update_ethical_status(&h.as_admin(), MaterialId::new("missing"), true)
        .unwrap_err();
    assert_eq!(err.code(), 404);
}

#[test]
fn duplicate_material_is_rejected_with_code_100() {
    let h = Harness::new();
    h.register_cotton();

    let err = h
        .ledger
        .register_material(
            &h.as_admin(),
            NewMaterial {
                name: "Duplicate Material".to_owned(),
                supplier_id: SupplierId::new("supplier-002"),
                batch_number: "BATCH-2023-002".to_owned(),
                ..cotton()
            },
        )
        .unwrap_err();

    assert_eq!(err.code(), 100);
    let record = h.ledger.get_material(&MaterialId::new("material-001")).unwrap();
    assert_eq!(record.name, "Organic Cotton");
    assert_eq!(h.ledger.material_count(), 1);
}

#[test]
fn material_may_reference_unregistered_supplier() {
    let h = Harness::new();
    h.register_cotton();
    assert!(h.ledger.get_supplier(&SupplierId::new("supplier-001")).is_none());
    assert!(h.ledger.get_material(&MaterialId::new("material-001")).is_some());
}
