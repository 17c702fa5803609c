//! Catalog port — the host's accessory/characteristic object model, consumed.
//!
//! The host owns every accessory except the plugin's own trigger switch. The
//! catalog is a read-mostly view; the only write this plugin ever performs
//! against a foreign accessory is the disarm characteristic set, expressed
//! through [`CharacteristicWriter`].

use std::future::Future;

use disarmrelay_domain::accessory::Accessory;
use disarmrelay_domain::characteristic::{CharacteristicType, CharacteristicValue};
use disarmrelay_domain::error::RelayError;
use disarmrelay_domain::id::AccessoryId;
use disarmrelay_domain::service::ServiceType;

/// Read-only view over the set of accessories known to the host.
pub trait AccessoryCatalog: Send + Sync {
    /// Enumerate every accessory the host currently exposes, in the host's
    /// own registry order.
    fn accessories(&self) -> impl Future<Output = Result<Vec<Accessory>, RelayError>> + Send;

    /// The host's internal bridged accessory list, when the host grants
    /// access to it.
    ///
    /// `None` means the capability was not granted; callers must report
    /// that as a discovery failure rather than probing host internals.
    fn bridge_accessories(&self) -> impl Future<Output = Option<Vec<Accessory>>> + Send {
        async { None }
    }
}

/// Write access to a live characteristic, addressed by accessory identity.
pub trait CharacteristicWriter: Send + Sync {
    /// Set a characteristic value and wait for the host to acknowledge it.
    fn write(
        &self,
        accessory: AccessoryId,
        service: ServiceType,
        characteristic: CharacteristicType,
        value: CharacteristicValue,
    ) -> impl Future<Output = Result<(), RelayError>> + Send;
}
