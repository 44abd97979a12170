//! Concurrent callers against one shared ledger.
//!
//! Registration races must admit exactly one winner, and tracking calls from
//! many handlers must all land without losing distinct stages.

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::thread;

use provenance_ledger::{CallContext, ErrorKind, NewMaterial, ProvenanceLedger};
use provenance_types::{BlockHeight, MaterialId, Principal, StageId, SupplierId};

const THREADS: u64 = 8;

fn admin() -> CallContext {
    CallContext::new(Principal::new("admin"), BlockHeight(100))
}

#[test]
fn duplicate_registration_race_has_one_winner() {
    let ledger = ProvenanceLedger::new(Principal::new("admin"));

    let outcomes: Vec<_> = thread::scope(|scope| {
        let handles: Vec<_> = (0..THREADS)
            .map(|n| {
                let ledger = &ledger;
                scope.spawn(move || {
                    ledger.register_supplier(
                        &admin(),
                        SupplierId::new("supplier-001"),
                        format!("Contender {n}"),
                    )
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    let winners = outcomes.iter().filter(|r| r.is_ok()).count();
    let duplicates = outcomes
        .iter()
        .filter(|r| {
            r.as_ref().err().map(provenance_ledger::LedgerError::kind)
                == Some(ErrorKind::AlreadyExists)
        })
        .count();

    assert_eq!(winners, 1);
    assert_eq!(duplicates, outcomes.len() - 1);
    assert_eq!(ledger.supplier_count(), 1);
    assert_eq!(ledger.events().len(), 1);
}

#[test]
fn parallel_handlers_track_distinct_stages() {
    let ledger = ProvenanceLedger::new(Principal::new("admin"));
    ledger
        .register_material(
            &admin(),
            NewMaterial {
                material_id: MaterialId::new("material-001"),
                name: "Organic Cotton".to_owned(),
                supplier_id: SupplierId::new("supplier-001"),
                batch_number: "BATCH-2023-001".to_owned(),
            },
        )
        .unwrap();

    thread::scope(|scope| {
        for stage in 0..THREADS {
            let ledger = &ledger;
            scope.spawn(move || {
                let ctx = CallContext::new(
                    Principal::new(format!("handler-{stage}")),
                    BlockHeight(100 + stage),
                );
                ledger
                    .track_material(
                        &ctx,
                        MaterialId::new("material-001"),
                        StageId(stage),
                        format!("Site {stage}"),
                        String::new(),
                    )
                    .unwrap();
            });
        }
    });

    let id = MaterialId::new("material-001");
    let stages = ledger.stages_for_material(&id);
    assert_eq!(stages, (0..THREADS).map(StageId).collect::<Vec<_>>());
    for stage in stages {
        let entry = ledger.get_material_tracking(&id, stage).unwrap();
        assert_eq!(entry.handler, Principal::new(format!("handler-{}", stage.get())));
    }

    let sequences: Vec<u64> = ledger.events().iter().map(|e| e.sequence).collect();
    assert_eq!(sequences, (0..=THREADS).collect::<Vec<_>>());
}
