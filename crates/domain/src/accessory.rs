//! Accessory — a read-only snapshot of a device the host exposes.
//!
//! Accessories are owned by the host; this plugin only ever creates its own
//! trigger-switch accessory and treats everything else as an externally-owned
//! collection it enumerates through the catalog port.

use crate::characteristic::{Characteristic, CharacteristicType};
use crate::id::AccessoryId;
use crate::service::{Service, ServiceType};

/// A discrete controllable device exposed to the home-automation host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Accessory {
    pub id: AccessoryId,
    pub display_name: String,
    /// Manufacturer tag from the host's accessory metadata, when known.
    pub manufacturer: Option<String>,
    pub services: Vec<Service>,
}

impl Accessory {
    /// Create an accessory whose identity derives from its label.
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        let display_name = label.into();
        Self {
            id: AccessoryId::from_label(&display_name),
            display_name,
            manufacturer: None,
            services: Vec::new(),
        }
    }

    /// Override the host-assigned identity.
    #[must_use]
    pub fn with_id(mut self, id: AccessoryId) -> Self {
        self.id = id;
        self
    }

    #[must_use]
    pub fn with_manufacturer(mut self, manufacturer: impl Into<String>) -> Self {
        self.manufacturer = Some(manufacturer.into());
        self
    }

    /// Append a service to this accessory.
    #[must_use]
    pub fn with_service(mut self, service: Service) -> Self {
        self.services.push(service);
        self
    }

    /// Look up a service by type.
    #[must_use]
    pub fn service(&self, service_type: ServiceType) -> Option<&Service> {
        self.services
            .iter()
            .find(|s| s.service_type == service_type)
    }

    /// Look up a characteristic by service and characteristic type.
    #[must_use]
    pub fn characteristic(
        &self,
        service_type: ServiceType,
        characteristic_type: CharacteristicType,
    ) -> Option<&Characteristic> {
        self.service(service_type)
            .and_then(|s| s.characteristic(characteristic_type))
    }
}
