//! Replay script format.
//!
//! A script is a YAML list of steps. Each step names the caller, the block
//! height the call executes at, and one ledger call:
//!
//! ```yaml
//! - caller: ST1PQHQKV0RJXZFY1DGX8MNSNYVE3VGZJSRTPGZGM
//!   height: 100
//!   call:
//!     register_supplier:
//!       supplier_id: supplier-001
//!       name: Eco Fabrics Inc
//! ```
//!
//! Heights must be non-decreasing across steps.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ReplayError;

/// One scripted call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    /// Identity issuing the call.
    pub caller: String,
    /// Block height the call executes at.
    pub height: u64,
    /// The call itself, written as a single-key map (`register_supplier: {...}`).
    #[serde(with = "serde_yml::with::singleton_map")]
    pub call: Call,
}

/// A ledger call with its arguments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Call {
    /// Register a supplier.
    RegisterSupplier {
        /// Supplier key.
        supplier_id: String,
        /// Display name.
        name: String,
    },
    /// Verify a supplier.
    VerifySupplier {
        /// Supplier key.
        supplier_id: String,
        /// Score to assign.
        ethical_score: u32,
        /// Verifier notes.
        #[serde(default)]
        notes: String,
    },
    /// Read a supplier.
    GetSupplier {
        /// Supplier key.
        supplier_id: String,
    },
    /// Check a supplier's verification flag.
    IsSupplierVerified {
        /// Supplier key.
        supplier_id: String,
    },
    /// Register a material.
    RegisterMaterial {
        /// Material key.
        material_id: String,
        /// Display name.
        name: String,
        /// Producing supplier key.
        supplier_id: String,
        /// Producer batch number.
        batch_number: String,
    },
    /// Overwrite a material's ethical status.
    UpdateEthicalStatus {
        /// Material key.
        material_id: String,
        /// New status.
        status: bool,
    },
    /// Read a material.
    GetMaterial {
        /// Material key.
        material_id: String,
    },
    /// Record a custody event.
    TrackMaterial {
        /// Material key.
        material_id: String,
        /// Stage number.
        stage_id: u64,
        /// Location at this stage.
        location: String,
        /// Handler notes.
        #[serde(default)]
        notes: String,
    },
    /// Read a custody event.
    GetMaterialTracking {
        /// Material key.
        material_id: String,
        /// Stage number.
        stage_id: u64,
    },
}

impl Call {
    /// Return the call's name as written in scripts.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::RegisterSupplier { .. } => "register_supplier",
            Self::VerifySupplier { .. } => "verify_supplier",
            Self::GetSupplier { .. } => "get_supplier",
            Self::IsSupplierVerified { .. } => "is_supplier_verified",
            Self::RegisterMaterial { .. } => "register_material",
            Self::UpdateEthicalStatus { .. } => "update_ethical_status",
            Self::GetMaterial { .. } => "get_material",
            Self::TrackMaterial { .. } => "track_material",
            Self::GetMaterialTracking { .. } => "get_material_tracking",
        }
    }
}

/// Parse a script from YAML text.
pub fn parse(yaml: &str) -> Result<Vec<Step>, ReplayError> {
    Ok(serde_yml::from_str(yaml)?)
}

/// Load a script from a YAML file.
pub fn load(path: &Path) -> Result<Vec<Step>, ReplayError> {
    let contents = std::fs::read_to_string(path)?;
    parse(&contents)
}
