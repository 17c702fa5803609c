//! Service — a typed capability grouping on an accessory.

use std::fmt;

use crate::characteristic::{Characteristic, CharacteristicType};

/// The service types this plugin recognises.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceType {
    AccessoryInformation,
    Switch,
    SecuritySystem,
}

impl fmt::Display for ServiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AccessoryInformation => f.write_str("AccessoryInformation"),
            Self::Switch => f.write_str("Switch"),
            Self::SecuritySystem => f.write_str("SecuritySystem"),
        }
    }
}

/// A service snapshot: its type and the characteristics it carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Service {
    pub service_type: ServiceType,
    pub characteristics: Vec<Characteristic>,
}

impl Service {
    #[must_use]
    pub fn new(service_type: ServiceType) -> Self {
        Self {
            service_type,
            characteristics: Vec::new(),
        }
    }

    /// Append a characteristic to this service.
    #[must_use]
    pub fn with_characteristic(mut self, characteristic: Characteristic) -> Self {
        self.characteristics.push(characteristic);
        self
    }

    /// Look up a characteristic by type.
    #[must_use]
    pub fn characteristic(&self, characteristic_type: CharacteristicType) -> Option<&Characteristic> {
        self.characteristics
            .iter()
            .find(|c| c.characteristic_type == characteristic_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::characteristic::{CharacteristicValue, DISARM};

    #[test]
    fn should_find_characteristic_by_type() {
        let service = Service::new(ServiceType::SecuritySystem).with_characteristic(
            Characteristic::new(
                CharacteristicType::SecuritySystemTargetState,
                CharacteristicValue::UInt8(DISARM),
            ),
        );

        let found = service.characteristic(CharacteristicType::SecuritySystemTargetState);
        assert!(found.is_some());
    }

    #[test]
    fn should_return_none_for_absent_characteristic() {
        let service = Service::new(ServiceType::Switch);
        assert!(service.characteristic(CharacteristicType::On).is_none());
    }

    #[test]
    fn should_display_service_type_name() {
        assert_eq!(ServiceType::SecuritySystem.to_string(), "SecuritySystem");
    }
}
