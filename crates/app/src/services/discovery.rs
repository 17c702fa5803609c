//! Discovery coordinator — reconciles the host's accessory cache against the
//! canonical trigger accessory.

use disarmrelay_domain::accessory::Accessory;
use disarmrelay_domain::characteristic::{Characteristic, CharacteristicType, CharacteristicValue};
use disarmrelay_domain::error::RelayError;
use disarmrelay_domain::id::AccessoryId;
use disarmrelay_domain::service::{Service, ServiceType};

use crate::ports::AccessoryRegistry;

/// Fixed label of the trigger-switch accessory. Its UUID derives from this
/// string, so changing it re-identifies the accessory and turns every
/// previously cached entry stale.
pub const TRIGGER_LABEL: &str = "Disarm Alarm";

/// Canonical identity of the trigger accessory.
#[must_use]
pub fn canonical_id() -> AccessoryId {
    AccessoryId::from_label(TRIGGER_LABEL)
}

/// Creates or restores the canonical trigger accessory and prunes stale
/// cached entries.
pub struct DiscoveryCoordinator<R> {
    registry: R,
}

impl<R: AccessoryRegistry> DiscoveryCoordinator<R> {
    /// Create a coordinator over the given registry.
    pub fn new(registry: R) -> Self {
        Self { registry }
    }

    /// Run reconciliation on the host's "ready" signal.
    ///
    /// Partition the restored cache into the canonical accessory (at most
    /// one) and stale entries; unregister every stale entry; restore the
    /// canonical accessory if present, otherwise create and register it.
    /// Idempotent: a second run against a correct cache only takes the
    /// restore path.
    ///
    /// # Errors
    ///
    /// Propagates registry failures from the host.
    #[tracing::instrument(skip(self))]
    pub async fn reconcile(&self) -> Result<Accessory, RelayError> {
        let canonical = canonical_id();
        let cached = self.registry.cached().await?;

        let (matching, stale): (Vec<_>, Vec<_>) =
            cached.into_iter().partition(|a| a.id == canonical);

        for accessory in stale {
            tracing::info!(accessory = %accessory.display_name, "unregistering stale cached accessory");
            self.registry.unregister(accessory.id).await?;
        }

        if let Some(existing) = matching.into_iter().next() {
            tracing::info!(accessory = %existing.display_name, "restoring existing accessory from cache");
            return Ok(existing);
        }

        tracing::info!(accessory = TRIGGER_LABEL, "adding new accessory");
        let accessory = trigger_accessory();
        self.registry.register(accessory.clone()).await?;
        Ok(accessory)
    }
}

/// The canonical trigger accessory: an information service plus a single
/// Switch service whose On characteristic starts off.
fn trigger_accessory() -> Accessory {
    Accessory::new(TRIGGER_LABEL)
        .with_service(
            Service::new(ServiceType::AccessoryInformation)
                .with_characteristic(Characteristic::new(
                    CharacteristicType::Manufacturer,
                    CharacteristicValue::Text("disarmrelay".to_string()),
                ))
                .with_characteristic(Characteristic::new(
                    CharacteristicType::Model,
                    CharacteristicValue::Text("Disarm Trigger Switch".to_string()),
                ))
                .with_characteristic(Characteristic::new(
                    CharacteristicType::SerialNumber,
                    CharacteristicValue::Text("DTS-001".to_string()),
                )),
        )
        .with_service(
            Service::new(ServiceType::Switch)
                .with_characteristic(Characteristic::new(
                    CharacteristicType::Name,
                    CharacteristicValue::Text(TRIGGER_LABEL.to_string()),
                ))
                .with_characteristic(Characteristic::new(
                    CharacteristicType::On,
                    CharacteristicValue::Bool(false),
                )),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::future::Future;
    use std::sync::Mutex;

    #[derive(Default)]
    struct InMemoryRegistry {
        cached: Mutex<Vec<Accessory>>,
        registered: Mutex<Vec<Accessory>>,
        unregistered: Mutex<Vec<AccessoryId>>,
    }

    impl InMemoryRegistry {
        fn with_cached(cached: Vec<Accessory>) -> Self {
            Self {
                cached: Mutex::new(cached),
                ..Self::default()
            }
        }
    }

    impl AccessoryRegistry for &'static InMemoryRegistry {
        fn cached(&self) -> impl Future<Output = Result<Vec<Accessory>, RelayError>> + Send {
            let result = self.cached.lock().unwrap().clone();
            async { Ok(result) }
        }

        fn register(
            &self,
            accessory: Accessory,
        ) -> impl Future<Output = Result<(), RelayError>> + Send {
            self.cached.lock().unwrap().push(accessory.clone());
            self.registered.lock().unwrap().push(accessory);
            async { Ok(()) }
        }

        fn unregister(&self, id: AccessoryId) -> impl Future<Output = Result<(), RelayError>> + Send {
            self.cached.lock().unwrap().retain(|a| a.id != id);
            self.unregistered.lock().unwrap().push(id);
            async { Ok(()) }
        }
    }

    fn leaked_registry(cached: Vec<Accessory>) -> &'static InMemoryRegistry {
        Box::leak(Box::new(InMemoryRegistry::with_cached(cached)))
    }

    #[tokio::test]
    async fn should_register_canonical_accessory_when_cache_is_empty() {
        let registry = leaked_registry(Vec::new());
        let coordinator = DiscoveryCoordinator::new(registry);

        let accessory = coordinator.reconcile().await.unwrap();

        assert_eq!(accessory.id, canonical_id());
        assert_eq!(accessory.display_name, TRIGGER_LABEL);
        assert_eq!(registry.registered.lock().unwrap().len(), 1);
        assert!(registry.unregistered.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn should_prune_stale_entry_and_register_canonical() {
        let stale = Accessory::new("Disarm Somfy Protect");
        let stale_id = stale.id;
        let registry = leaked_registry(vec![stale]);
        let coordinator = DiscoveryCoordinator::new(registry);

        coordinator.reconcile().await.unwrap();

        assert_eq!(*registry.unregistered.lock().unwrap(), vec![stale_id]);
        assert_eq!(registry.registered.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn should_restore_canonical_accessory_without_registering() {
        let registry = leaked_registry(vec![trigger_accessory()]);
        let coordinator = DiscoveryCoordinator::new(registry);

        let accessory = coordinator.reconcile().await.unwrap();

        assert_eq!(accessory.display_name, TRIGGER_LABEL);
        assert!(registry.registered.lock().unwrap().is_empty());
        assert!(registry.unregistered.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn should_be_idempotent_across_runs() {
        let registry = leaked_registry(vec![Accessory::new("Disarm Somfy Protect")]);
        let coordinator = DiscoveryCoordinator::new(registry);

        coordinator.reconcile().await.unwrap();
        coordinator.reconcile().await.unwrap();

        // Second run restores the now-correct cache: still exactly one
        // register and one unregister in total.
        assert_eq!(registry.registered.lock().unwrap().len(), 1);
        assert_eq!(registry.unregistered.lock().unwrap().len(), 1);
    }

    #[test]
    fn should_expose_switch_service_with_off_on_characteristic() {
        let accessory = trigger_accessory();
        let on = accessory
            .characteristic(ServiceType::Switch, CharacteristicType::On)
            .unwrap();
        assert_eq!(on.value, CharacteristicValue::Bool(false));

        let info = accessory.service(ServiceType::AccessoryInformation).unwrap();
        assert!(info.characteristic(CharacteristicType::Manufacturer).is_some());
        assert!(info.characteristic(CharacteristicType::SerialNumber).is_some());
    }
}
