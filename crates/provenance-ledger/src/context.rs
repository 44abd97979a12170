//! Per-call execution context.

use provenance_types::{BlockHeight, Principal};

use crate::clock::LogicalClock;

/// Identity and logical time of a single call.
///
/// Supplied by the host for every call; the ledger never reads either value
/// from ambient state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallContext {
    /// The identity issuing the call.
    pub caller: Principal,
    /// Block height at which the call executes.
    pub now: BlockHeight,
}

impl CallContext {
    /// Build a context from explicit values.
    pub const fn new(caller: Principal, now: BlockHeight) -> Self {
        Self { caller, now }
    }

    /// Build a context stamped with the clock's current height.
    pub fn from_clock(caller: Principal, clock: &impl LogicalClock) -> Self {
        Self {
            caller,
            now: clock.now(),
        }
    }
}
