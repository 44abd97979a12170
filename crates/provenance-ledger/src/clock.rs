//! Logical clock consumed by the ledger.
//!
//! The ledger never reads wall-clock time. The host advances a block-height
//! counter and every call is stamped with the height current at the call, so
//! replaying the same calls at the same heights rebuilds the same state.
//!
//! # Design Principles
//!
//! - Heights only move forward; a regression is an error, not a clamp.
//! - All advancement uses checked arithmetic (no silent overflow).

use std::sync::atomic::{AtomicU64, Ordering};

use provenance_types::BlockHeight;

/// Errors raised by host-side clock advancement.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClockError {
    /// Height counter would overflow.
    #[error("block height overflow: cannot advance beyond u64::MAX")]
    HeightOverflow,

    /// Requested height is lower than the current one.
    #[error("block height regression: current {current}, requested {requested}")]
    Regression {
        /// The clock's current height.
        current: BlockHeight,
        /// The rejected target height.
        requested: BlockHeight,
    },
}

/// Source of the current logical time.
pub trait LogicalClock {
    /// Return the current block height.
    fn now(&self) -> BlockHeight;
}

/// A block-height counter advanced by the host.
///
/// Shared by reference between the host loop and callers building a
/// [`CallContext`](crate::CallContext); advancement is atomic.
#[derive(Debug, Default)]
pub struct BlockHeightClock {
    height: AtomicU64,
}

impl BlockHeightClock {
    /// Create a clock starting at `genesis`.
    pub const fn new(genesis: BlockHeight) -> Self {
        Self {
            height: AtomicU64::new(genesis.0),
        }
    }

    /// Advance by one block. Returns the new height.
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::HeightOverflow`] at `u64::MAX`.
    pub fn advance(&self) -> Result<BlockHeight, ClockError> {
        self.height
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |h| h.checked_add(1))
            .map_err(|_current| ClockError::HeightOverflow)
            .and_then(|previous| {
                BlockHeight(previous)
                    .checked_next()
                    .ok_or(ClockError::HeightOverflow)
            })
    }

    /// Move the clock to `target`. Staying at the current height is allowed.
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::Regression`] if `target` is below the current height.
    pub fn advance_to(&self, target: BlockHeight) -> Result<BlockHeight, ClockError> {
        self.height
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |h| {
                (target.0 >= h).then_some(target.0)
            })
            .map(|_previous| target)
            .map_err(|current| ClockError::Regression {
                current: BlockHeight(current),
                requested: target,
            })
    }
}

impl LogicalClock for BlockHeightClock {
    fn now(&self) -> BlockHeight {
        BlockHeight(self.height.load(Ordering::Acquire))
    }
}

/// A clock pinned to one height. Useful in tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FixedClock(pub BlockHeight);

impl LogicalClock for FixedClock {
    fn now(&self) -> BlockHeight {
        self.0
    }
}
