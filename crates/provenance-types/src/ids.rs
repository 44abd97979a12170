//! Type-safe key and identity wrappers.
//!
//! Supplier and material keys are opaque strings chosen by the host (for
//! example `supplier-001`). Wrapping them prevents a material key from being
//! passed where a supplier key is expected. Stage ids and block heights are
//! integer newtypes for the same reason.

use serde::{Deserialize, Serialize};

/// Generates a newtype wrapper around an owned [`String`] key.
macro_rules! define_key {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wrap a key value.
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            /// Borrow the key as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Return the inner [`String`] value.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_owned())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_key! {
    /// Unique key of a supplier record.
    SupplierId
}

define_key! {
    /// Unique key of a material record.
    MaterialId
}

define_key! {
    /// Identity of an actor issuing a call (an account address in the host).
    Principal
}

/// A discrete point in a material's custody chain (processing, shipping, ...).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct StageId(pub u64);

impl StageId {
    /// Return the raw stage number.
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl core::fmt::Display for StageId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for StageId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// Logical time: the block height supplied by the host environment.
///
/// Height `0` doubles as the "never happened" sentinel for
/// [`SupplierRecord::verification_date`](crate::SupplierRecord::verification_date).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct BlockHeight(pub u64);

impl BlockHeight {
    /// The genesis height, also used as the unset sentinel.
    pub const ZERO: Self = Self(0);

    /// Return the raw height.
    pub const fn get(self) -> u64 {
        self.0
    }

    /// Return the following height, or `None` on overflow.
    pub const fn checked_next(self) -> Option<Self> {
        match self.0.checked_add(1) {
            Some(next) => Some(Self(next)),
            None => None,
        }
    }
}

impl core::fmt::Display for BlockHeight {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for BlockHeight {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_display_their_value() {
        let id = SupplierId::new("supplier-001");
        assert_eq!(id.to_string(), "supplier-001");
        assert_eq!(id.as_str(), "supplier-001");
    }

    #[test]
    fn keys_serialize_transparently() {
        let id = MaterialId::from("material-001");
        let json = serde_json::to_string(&id).ok();
        assert_eq!(json.as_deref(), Some("\"material-001\""));
    }

    #[test]
    fn block_height_next_stops_at_max() {
        assert_eq!(BlockHeight(7).checked_next(), Some(BlockHeight(8)));
        assert_eq!(BlockHeight(u64::MAX).checked_next(), None);
    }

    #[test]
    fn default_height_is_zero_sentinel() {
        assert_eq!(BlockHeight::default(), BlockHeight::ZERO);
    }
}
