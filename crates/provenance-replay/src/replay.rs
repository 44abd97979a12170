//! Deterministic replay of scripted calls.
//!
//! The [`Replayer`] plays the host's role: it advances the block-height clock
//! to each step's height, stamps a [`CallContext`] with the step's caller,
//! and applies the call to a fresh ledger. Ledger rejections are captured as
//! outcomes; only host failures (clock regressions) abort the replay.
//!
//! The same script always yields the same outcomes and final snapshot.

use serde::Serialize;

use provenance_ledger::{
    BlockHeightClock, CallContext, ClockError, LedgerError, LedgerSnapshot, LogicalClock,
    NewMaterial, ProvenanceLedger,
};
use provenance_types::{BlockHeight, MaterialId, Principal, StageId, SupplierId};

use crate::error::ReplayError;
use crate::script::{Call, Step};

/// Result of one call as reported to the host.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// The call succeeded; mutations report `true`, reads their value.
    Ok(serde_json::Value),
    /// The ledger rejected the call.
    Err {
        /// Numeric code (403, 100, or 404).
        code: u32,
        /// Human-readable reason.
        message: String,
    },
}

impl From<LedgerError> for Outcome {
    fn from(err: LedgerError) -> Self {
        Self::Err {
            code: err.code(),
            message: err.to_string(),
        }
    }
}

/// One replayed step and its outcome.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepOutcome {
    /// Zero-based step index.
    pub step: usize,
    /// Call name.
    pub call: &'static str,
    /// Caller identity.
    pub caller: Principal,
    /// Height the call executed at.
    pub height: BlockHeight,
    /// What the ledger returned.
    pub result: Outcome,
}

/// Applies scripted steps to a ledger owned by the replayer.
#[derive(Debug)]
pub struct Replayer {
    ledger: ProvenanceLedger,
    clock: BlockHeightClock,
}

impl Replayer {
    /// Create a replayer over a fresh ledger.
    pub const fn new(admin: Principal, genesis: BlockHeight) -> Self {
        Self {
            ledger: ProvenanceLedger::new(admin),
            clock: BlockHeightClock::new(genesis),
        }
    }

    /// Return the ledger being replayed into.
    pub const fn ledger(&self) -> &ProvenanceLedger {
        &self.ledger
    }

    /// Replay every step in order.
    ///
    /// # Errors
    ///
    /// Returns [`ReplayError::Clock`] if any step's height is below the one
    /// before it. Heights are checked up front, so a rejected script leaves
    /// the ledger untouched.
    pub fn run(&self, steps: &[Step]) -> Result<Vec<StepOutcome>, ReplayError> {
        self.check_heights(steps)?;
        steps
            .iter()
            .enumerate()
            .map(|(index, step)| self.apply(index, step))
            .collect()
    }

    /// Return a snapshot of the ledger's tables.
    pub fn snapshot(&self) -> LedgerSnapshot {
        self.ledger.snapshot()
    }

    fn check_heights(&self, steps: &[Step]) -> Result<(), ReplayError> {
        let mut current = self.clock.now();
        for (index, step) in steps.iter().enumerate() {
            let requested = BlockHeight(step.height);
            if requested < current {
                return Err(ReplayError::Clock {
                    step: index,
                    source: ClockError::Regression { current, requested },
                });
            }
            current = requested;
        }
        Ok(())
    }

    fn apply(&self, index: usize, step: &Step) -> Result<StepOutcome, ReplayError> {
        self.clock
            .advance_to(BlockHeight(step.height))
            .map_err(|source| ReplayError::Clock {
                step: index,
                source,
            })?;
        let ctx = CallContext::from_clock(Principal::new(step.caller.as_str()), &self.clock);

        let result = self.dispatch(&ctx, step.call.clone())?;
        tracing::debug!(step = index, call = step.call.name(), ?result, "step replayed");

        Ok(StepOutcome {
            step: index,
            call: step.call.name(),
            caller: ctx.caller,
            height: ctx.now,
            result,
        })
    }

    fn dispatch(&self, ctx: &CallContext, call: Call) -> Result<Outcome, ReplayError> {
        let ledger = &self.ledger;
        let outcome = match call {
            Call::RegisterSupplier { supplier_id, name } => {
                mutation(ledger.register_supplier(ctx, SupplierId::new(supplier_id), name))
            }
            Call::VerifySupplier {
                supplier_id,
                ethical_score,
                notes,
            } => mutation(ledger.verify_supplier(
                ctx,
                SupplierId::new(supplier_id),
                ethical_score,
                notes,
            )),
            Call::GetSupplier { supplier_id } => Outcome::Ok(serde_json::to_value(
                ledger.get_supplier(&SupplierId::new(supplier_id)),
            )?),
            Call::IsSupplierVerified { supplier_id } => Outcome::Ok(serde_json::Value::Bool(
                ledger.is_supplier_verified(&SupplierId::new(supplier_id)),
            )),
            Call::RegisterMaterial {
                material_id,
                name,
                supplier_id,
                batch_number,
            } => mutation(ledger.register_material(
                ctx,
                NewMaterial {
                    material_id: MaterialId::new(material_id),
                    name,
                    supplier_id: SupplierId::new(supplier_id),
                    batch_number,
                },
            )),
            Call::UpdateEthicalStatus {
                material_id,
                status,
            } => mutation(ledger.update_ethical_status(ctx, MaterialId::new(material_id), status)),
            Call::GetMaterial { material_id } => Outcome::Ok(serde_json::to_value(
                ledger.get_material(&MaterialId::new(material_id)),
            )?),
            Call::TrackMaterial {
                material_id,
                stage_id,
                location,
                notes,
            } => mutation(ledger.track_material(
                ctx,
                MaterialId::new(material_id),
                StageId(stage_id),
                location,
                notes,
            )),
            Call::GetMaterialTracking {
                material_id,
                stage_id,
            } => Outcome::Ok(serde_json::to_value(
                ledger.get_material_tracking(&MaterialId::new(material_id), StageId(stage_id)),
            )?),
        };
        Ok(outcome)
    }
}

/// Map a mutation result to the host's `(ok true) | (err code)` shape.
fn mutation(result: Result<(), LedgerError>) -> Outcome {
    match result {
        Ok(()) => Outcome::Ok(serde_json::Value::Bool(true)),
        Err(err) => err.into(),
    }
}
