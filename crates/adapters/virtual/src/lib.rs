//! # disarmrelay-adapter-virtual
//!
//! In-process simulation of the accessory host, for the daemon's demo wiring
//! and the end-to-end tests. The real host is an external collaborator; this
//! adapter stands in for every host-side port:
//!
//! | Port | Behaviour |
//! |------|-----------|
//! | `AccessoryCatalog` | Serves the seeded accessory set in insertion order |
//! | `CharacteristicWriter` | Applies writes to live accessories and records them |
//! | `AccessoryRegistry` | Cache snapshot plus register/unregister |
//! | `SwitchStatePublisher` | Records pushed "On" values |
//!
//! ## Dependency rule
//!
//! Depends on `disarmrelay-app` (port traits) and `disarmrelay-domain` only.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use disarmrelay_app::ports::{
    AccessoryCatalog, AccessoryRegistry, CharacteristicWriter, SwitchStatePublisher,
};
use disarmrelay_domain::accessory::Accessory;
use disarmrelay_domain::characteristic::{Characteristic, CharacteristicType, CharacteristicValue};
use disarmrelay_domain::error::{DiscoveryError, NotFoundError, RelayError};
use disarmrelay_domain::id::AccessoryId;
use disarmrelay_domain::service::{Service, ServiceType};

/// A characteristic write the simulated host accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedWrite {
    pub accessory: AccessoryId,
    pub service: ServiceType,
    pub characteristic: CharacteristicType,
    pub value: CharacteristicValue,
}

#[derive(Default)]
struct Inner {
    /// Everything the host exposes, foreign accessories included.
    accessories: Mutex<Vec<Accessory>>,
    /// The subset cached for this plugin.
    cache: Mutex<Vec<Accessory>>,
    writes: Mutex<Vec<RecordedWrite>>,
    switch_updates: Mutex<Vec<bool>>,
    bridge_access: AtomicBool,
}

/// A simulated accessory host. Cloning shares the same host state.
#[derive(Clone, Default)]
pub struct VirtualHost {
    inner: Arc<Inner>,
}

impl VirtualHost {
    /// Create an empty host that withholds bridge access.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Grant access to the bridged accessory list.
    #[must_use]
    pub fn with_bridge_access(self) -> Self {
        self.inner.bridge_access.store(true, Ordering::SeqCst);
        self
    }

    /// Seed a foreign accessory (owned by another plugin on the host).
    #[must_use]
    pub fn with_accessory(self, accessory: Accessory) -> Self {
        lock(&self.inner.accessories).push(accessory);
        self
    }

    /// Seed the plugin's restored cache. Cached accessories are live on the
    /// host too.
    #[must_use]
    pub fn with_cached(self, accessory: Accessory) -> Self {
        lock(&self.inner.accessories).push(accessory.clone());
        lock(&self.inner.cache).push(accessory);
        self
    }

    /// Writes accepted so far, in order.
    #[must_use]
    pub fn writes(&self) -> Vec<RecordedWrite> {
        lock(&self.inner.writes).clone()
    }

    /// "On" values pushed by the plugin, in order.
    #[must_use]
    pub fn switch_updates(&self) -> Vec<bool> {
        lock(&self.inner.switch_updates).clone()
    }

    /// Current host accessory set (test observability).
    #[must_use]
    pub fn accessories_snapshot(&self) -> Vec<Accessory> {
        lock(&self.inner.accessories).clone()
    }
}

/// A simulated security-system accessory that accepts target-state writes.
#[must_use]
pub fn simulated_alarm(name: &str) -> Accessory {
    Accessory::new(name).with_manufacturer("Somfy").with_service(
        Service::new(ServiceType::SecuritySystem).with_characteristic(Characteristic::new(
            CharacteristicType::SecuritySystemTargetState,
            CharacteristicValue::UInt8(1),
        )),
    )
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl AccessoryCatalog for VirtualHost {
    fn accessories(&self) -> impl Future<Output = Result<Vec<Accessory>, RelayError>> + Send {
        let result = lock(&self.inner.accessories).clone();
        async { Ok(result) }
    }

    fn bridge_accessories(&self) -> impl Future<Output = Option<Vec<Accessory>>> + Send {
        let result = self
            .inner
            .bridge_access
            .load(Ordering::SeqCst)
            .then(|| lock(&self.inner.accessories).clone());
        async { result }
    }
}

impl CharacteristicWriter for VirtualHost {
    fn write(
        &self,
        accessory: AccessoryId,
        service: ServiceType,
        characteristic: CharacteristicType,
        value: CharacteristicValue,
    ) -> impl Future<Output = Result<(), RelayError>> + Send {
        let result = self.apply_write(accessory, service, characteristic, value);
        async { result }
    }
}

impl VirtualHost {
    fn apply_write(
        &self,
        accessory: AccessoryId,
        service: ServiceType,
        characteristic: CharacteristicType,
        value: CharacteristicValue,
    ) -> Result<(), RelayError> {
        let mut accessories = lock(&self.inner.accessories);

        let Some(target) = accessories.iter_mut().find(|a| a.id == accessory) else {
            let candidates = accessories.iter().map(|a| a.display_name.clone()).collect();
            return Err(NotFoundError {
                wanted: format!("accessory {accessory}"),
                candidates,
            }
            .into());
        };
        let display_name = target.display_name.clone();

        let Some(live_service) = target
            .services
            .iter_mut()
            .find(|s| s.service_type == service)
        else {
            return Err(DiscoveryError::MissingService {
                accessory: display_name,
                service,
            }
            .into());
        };

        let Some(slot) = live_service
            .characteristics
            .iter_mut()
            .find(|c| c.characteristic_type == characteristic)
        else {
            return Err(DiscoveryError::MissingCharacteristic {
                accessory: display_name,
                characteristic,
            }
            .into());
        };

        slot.value = value.clone();
        lock(&self.inner.writes).push(RecordedWrite {
            accessory,
            service,
            characteristic,
            value,
        });
        Ok(())
    }
}

impl AccessoryRegistry for VirtualHost {
    fn cached(&self) -> impl Future<Output = Result<Vec<Accessory>, RelayError>> + Send {
        let result = lock(&self.inner.cache).clone();
        async { Ok(result) }
    }

    fn register(
        &self,
        accessory: Accessory,
    ) -> impl Future<Output = Result<(), RelayError>> + Send {
        lock(&self.inner.accessories).push(accessory.clone());
        lock(&self.inner.cache).push(accessory);
        async { Ok(()) }
    }

    fn unregister(&self, id: AccessoryId) -> impl Future<Output = Result<(), RelayError>> + Send {
        lock(&self.inner.accessories).retain(|a| a.id != id);
        lock(&self.inner.cache).retain(|a| a.id != id);
        async { Ok(()) }
    }
}

impl SwitchStatePublisher for VirtualHost {
    fn publish_on(&self, on: bool) -> impl Future<Output = ()> + Send {
        lock(&self.inner.switch_updates).push(on);
        async {}
    }
}
