//! Authorization gate for mutating calls.

use provenance_types::Principal;

use crate::error::LedgerError;

/// Compares callers against the single admin fixed at ledger construction.
///
/// The admin never changes after construction. Reads do not consult the gate,
/// and neither does material tracking: custody events are attributed to their
/// handler instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminGate {
    admin: Principal,
}

impl AdminGate {
    /// Create a gate for the given admin identity.
    pub const fn new(admin: Principal) -> Self {
        Self { admin }
    }

    /// Return the admin identity.
    pub const fn admin(&self) -> &Principal {
        &self.admin
    }

    /// Return whether `caller` is the admin.
    pub fn is_authorized(&self, caller: &Principal) -> bool {
        *caller == self.admin
    }

    /// Reject any caller other than the admin.
    pub fn authorize(&self, caller: &Principal) -> Result<(), LedgerError> {
        if self.is_authorized(caller) {
            Ok(())
        } else {
            Err(LedgerError::Unauthorized {
                caller: caller.clone(),
            })
        }
    }
}
