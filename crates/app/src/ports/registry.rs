//! Registry port — the host's accessory cache and publication surface.
//!
//! This is the only place the plugin mutates the host's accessory set: one
//! register call for the canonical trigger accessory, one unregister call
//! per stale cached entry.

use std::future::Future;

use disarmrelay_domain::accessory::Accessory;
use disarmrelay_domain::error::RelayError;
use disarmrelay_domain::id::AccessoryId;

/// Cached-accessory snapshot plus register/unregister.
pub trait AccessoryRegistry: Send + Sync {
    /// Accessories the host restored from its cache for this plugin.
    fn cached(&self) -> impl Future<Output = Result<Vec<Accessory>, RelayError>> + Send;

    /// Publish a new accessory to the host.
    fn register(&self, accessory: Accessory)
    -> impl Future<Output = Result<(), RelayError>> + Send;

    /// Remove a cached accessory from the host.
    fn unregister(&self, id: AccessoryId) -> impl Future<Output = Result<(), RelayError>> + Send;
}
