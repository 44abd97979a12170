//! Error taxonomy for ledger calls.
//!
//! The set of failures is closed: every rejected call maps to exactly one
//! [`ErrorKind`], and each kind surfaces to the host as a fixed numeric code.
//! A rejected call never leaves a partial write behind.

use provenance_types::Principal;

/// Code returned when the caller is not the ledger admin.
pub const ERR_UNAUTHORIZED: u32 = 403;

/// Code returned when a create targets a key that is already present.
pub const ERR_ALREADY_EXISTS: u32 = 100;

/// Code returned when a mutation targets a key that is absent.
pub const ERR_NOT_FOUND: u32 = 404;

/// Which table a key belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    /// The supplier registry.
    Supplier,
    /// The material registry.
    Material,
}

impl core::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Supplier => f.write_str("supplier"),
            Self::Material => f.write_str("material"),
        }
    }
}

/// Discriminant of a [`LedgerError`], stripped of diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Gated mutation attempted by a non-admin caller.
    Unauthorized,
    /// Create on a key already present.
    AlreadyExists,
    /// Mutation or tracking on a key that is absent.
    NotFound,
}

impl ErrorKind {
    /// Return the numeric code surfaced to the host.
    pub const fn code(self) -> u32 {
        match self {
            Self::Unauthorized => ERR_UNAUTHORIZED,
            Self::AlreadyExists => ERR_ALREADY_EXISTS,
            Self::NotFound => ERR_NOT_FOUND,
        }
    }
}

/// Errors returned by ledger calls.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    /// The caller is not the configured admin.
    #[error("unauthorized: {caller} is not the ledger admin")]
    Unauthorized {
        /// The rejected caller.
        caller: Principal,
    },

    /// A record with this key already exists.
    #[error("{record} already exists: {key}")]
    AlreadyExists {
        /// Table the key belongs to.
        record: RecordKind,
        /// The duplicate key.
        key: String,
    },

    /// No record with this key exists.
    #[error("{record} not found: {key}")]
    NotFound {
        /// Table the key was looked up in.
        record: RecordKind,
        /// The missing key.
        key: String,
    },
}

impl LedgerError {
    /// Return the error's kind.
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Unauthorized { .. } => ErrorKind::Unauthorized,
            Self::AlreadyExists { .. } => ErrorKind::AlreadyExists,
            Self::NotFound { .. } => ErrorKind::NotFound,
        }
    }

    /// Return the numeric code surfaced to the host (403, 100, or 404).
    pub const fn code(&self) -> u32 {
        self.kind().code()
    }

    pub(crate) fn already_exists(record: RecordKind, key: impl core::fmt::Display) -> Self {
        Self::AlreadyExists {
            record,
            key: key.to_string(),
        }
    }

    pub(crate) fn not_found(record: RecordKind, key: impl core::fmt::Display) -> Self {
        Self::NotFound {
            record,
            key: key.to_string(),
        }
    }
}
