//! Alarm resolver — locates the single target alarm accessory.
//!
//! Four strategies, selected once from configuration. Every registry-based
//! strategy reports the full list of display names it considered when it
//! fails; that list is the operator's main tool for fixing a misconfigured
//! alarm name, so it lives in the error itself, not in optional logging.

use disarmrelay_domain::accessory::Accessory;
use disarmrelay_domain::characteristic::CharacteristicType;
use disarmrelay_domain::error::{ConfigurationError, DiscoveryError, NotFoundError, RelayError};
use disarmrelay_domain::service::ServiceType;
use disarmrelay_domain::strategy::ResolutionStrategy;
use disarmrelay_domain::target::ResolvedTarget;

use crate::ports::AccessoryCatalog;

/// Case-insensitive display-name fragments that mark a heuristic candidate.
const HEURISTIC_NAME_FRAGMENTS: [&str; 2] = ["somfy", "protect"];

/// Manufacturer tags that mark a heuristic candidate.
const KNOWN_MANUFACTURERS: [&str; 2] = ["Somfy", "Myfox"];

/// Locates the target alarm per the configured strategy.
///
/// Targets are never cached: accessories may be added, removed, or restarted
/// between activations, so every disarm request resolves afresh.
pub struct AlarmResolver<C> {
    catalog: C,
    strategy: ResolutionStrategy,
}

impl<C: AccessoryCatalog> AlarmResolver<C> {
    /// Create a resolver over the given catalog and strategy.
    pub fn new(catalog: C, strategy: ResolutionStrategy) -> Self {
        Self { catalog, strategy }
    }

    /// Locate the alarm, or explain why none was found.
    ///
    /// # Errors
    ///
    /// [`RelayError::Configuration`] when a name strategy runs without an
    /// alarm name, [`RelayError::NotFound`] when no accessory matches,
    /// [`RelayError::Discovery`] when a matched accessory lacks the
    /// security-system capability or the host withholds bridge access.
    #[tracing::instrument(skip(self))]
    pub async fn resolve(&self) -> Result<ResolvedTarget, RelayError> {
        match &self.strategy {
            ResolutionStrategy::NameMatch { alarm_name } => {
                let accessories = self.catalog.accessories().await?;
                Self::resolve_exact(alarm_name, &accessories)
            }
            ResolutionStrategy::Heuristic => {
                let accessories = self.catalog.accessories().await?;
                Self::resolve_heuristic(&accessories)
            }
            ResolutionStrategy::BridgeTraversal { alarm_name } => {
                let Some(accessories) = self.catalog.bridge_accessories().await else {
                    return Err(DiscoveryError::BridgeUnavailable.into());
                };
                Self::resolve_bridged(alarm_name, &accessories)
            }
            // No registry lookup at all; failures surface at execution time.
            ResolutionStrategy::Http(endpoint) => Ok(ResolvedTarget::Endpoint(endpoint.clone())),
        }
    }

    fn resolve_exact(
        alarm_name: &str,
        accessories: &[Accessory],
    ) -> Result<ResolvedTarget, RelayError> {
        if alarm_name.is_empty() {
            return Err(ConfigurationError::MissingAlarmName.into());
        }
        log_search_trace(accessories);

        // Exact string equality only.
        let Some(target) = accessories.iter().find(|a| a.display_name == alarm_name) else {
            return Err(NotFoundError::name(alarm_name, display_names(accessories)).into());
        };
        tracing::info!(accessory = %target.display_name, "found target accessory");

        require_target_state(target)?;
        Ok(registry_target(target))
    }

    fn resolve_heuristic(accessories: &[Accessory]) -> Result<ResolvedTarget, RelayError> {
        log_search_trace(accessories);

        // Registry order is preserved; the first candidate exposing a
        // security-system service wins, not the best one.
        let winner = accessories
            .iter()
            .filter(|a| is_heuristic_candidate(a))
            .find(|a| a.service(ServiceType::SecuritySystem).is_some());

        match winner {
            Some(target) => {
                tracing::info!(accessory = %target.display_name, "heuristic matched accessory");
                Ok(registry_target(target))
            }
            None => Err(NotFoundError::heuristic(display_names(accessories)).into()),
        }
    }

    fn resolve_bridged(
        alarm_name: &str,
        accessories: &[Accessory],
    ) -> Result<ResolvedTarget, RelayError> {
        if alarm_name.is_empty() {
            return Err(ConfigurationError::MissingAlarmName.into());
        }
        log_search_trace(accessories);

        let Some(target) = accessories.iter().find(|a| a.display_name == alarm_name) else {
            return Err(NotFoundError::name(alarm_name, display_names(accessories)).into());
        };

        // Bridged snapshots are matched against the raw service and
        // characteristic collections.
        let Some(service) = target
            .services
            .iter()
            .find(|s| s.service_type == ServiceType::SecuritySystem)
        else {
            return Err(DiscoveryError::MissingService {
                accessory: target.display_name.clone(),
                service: ServiceType::SecuritySystem,
            }
            .into());
        };
        if !service
            .characteristics
            .iter()
            .any(|c| c.characteristic_type == CharacteristicType::SecuritySystemTargetState)
        {
            return Err(DiscoveryError::MissingCharacteristic {
                accessory: target.display_name.clone(),
                characteristic: CharacteristicType::SecuritySystemTargetState,
            }
            .into());
        }
        tracing::info!(accessory = %target.display_name, "found target accessory via bridge");
        Ok(registry_target(target))
    }
}

fn registry_target(accessory: &Accessory) -> ResolvedTarget {
    ResolvedTarget::Registry {
        accessory_id: accessory.id,
        display_name: accessory.display_name.clone(),
    }
}

fn display_names(accessories: &[Accessory]) -> Vec<String> {
    accessories.iter().map(|a| a.display_name.clone()).collect()
}

fn log_search_trace(accessories: &[Accessory]) {
    tracing::info!(total = accessories.len(), "searching host accessories");
    if accessories.is_empty() {
        tracing::warn!(
            "the host exposes no foreign accessories; nothing to match the alarm against"
        );
    }
}

fn is_heuristic_candidate(accessory: &Accessory) -> bool {
    let name = accessory.display_name.to_lowercase();
    HEURISTIC_NAME_FRAGMENTS.iter().any(|f| name.contains(f))
        || accessory
            .manufacturer
            .as_deref()
            .is_some_and(|m| KNOWN_MANUFACTURERS.contains(&m))
}

/// The matched accessory must expose a security-system service with a
/// target-state characteristic; anything less is a capability failure, not
/// a mismatch.
fn require_target_state(accessory: &Accessory) -> Result<(), RelayError> {
    let Some(service) = accessory.service(ServiceType::SecuritySystem) else {
        return Err(DiscoveryError::MissingService {
            accessory: accessory.display_name.clone(),
            service: ServiceType::SecuritySystem,
        }
        .into());
    };
    if service
        .characteristic(CharacteristicType::SecuritySystemTargetState)
        .is_none()
    {
        return Err(DiscoveryError::MissingCharacteristic {
            accessory: accessory.display_name.clone(),
            characteristic: CharacteristicType::SecuritySystemTargetState,
        }
        .into());
    }
    Ok(())
}
