//! Resolved target — the addressable outcome of a successful resolution.
//!
//! Never cached across invocations: the underlying accessories may be added,
//! removed, or restarted independently, so every disarm request re-resolves.

use crate::id::AccessoryId;
use crate::strategy::HttpEndpoint;

/// Where the disarm command should be sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedTarget {
    /// A live characteristic in the host's registry, addressed by accessory
    /// identity. The display name rides along for diagnostics.
    Registry {
        accessory_id: AccessoryId,
        display_name: String,
    },
    /// An out-of-process HTTP control endpoint.
    Endpoint(HttpEndpoint),
}
