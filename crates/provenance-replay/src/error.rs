//! Error types for the replay host.
//!
//! Ledger rejections are not errors here: they are recorded as step outcomes.
//! These variants cover the host's own failures.

use provenance_ledger::ClockError;

/// Errors that stop a replay.
#[derive(Debug, thiserror::Error)]
pub enum ReplayError {
    /// Failed to read the script file.
    #[error("failed to read script: {0}")]
    Io(#[from] std::io::Error),

    /// The script is not a valid list of steps.
    #[error("failed to parse script YAML: {0}")]
    Script(#[from] serde_yml::Error),

    /// A step asked for a block height below the current one.
    #[error("step {step}: {source}")]
    Clock {
        /// Zero-based index of the offending step.
        step: usize,
        /// The clock's rejection.
        source: ClockError,
    },

    /// Serialization or deserialization failure.
    #[error("serde error: {0}")]
    Serde(#[from] serde_json::Error),
}
