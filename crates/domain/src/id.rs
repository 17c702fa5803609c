//! Accessory identifier — a UUID derived deterministically from a label.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Namespace for label-derived accessory identifiers.
///
/// Fixed forever: changing it would re-identify every published accessory
/// and orphan the host's cached entries.
const LABEL_NAMESPACE: Uuid = Uuid::from_u128(0xc33f_6c21_a1d4_45ab_9f5e_2b1a_07d8_4e10);

/// Unique identifier for an [`Accessory`](crate::accessory::Accessory).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AccessoryId(Uuid);

impl AccessoryId {
    /// Derive the identifier for a label.
    ///
    /// Pure function of the label: the same label yields the same id on
    /// every call, in every process run.
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        Self(Uuid::new_v5(&LABEL_NAMESPACE, label.as_bytes()))
    }

    /// Generate a fresh random identifier (host-assigned identity).
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID.
    #[must_use]
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Access the inner UUID.
    #[must_use]
    pub fn as_uuid(self) -> Uuid {
        self.0
    }
}

impl fmt::Display for AccessoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for AccessoryId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}
