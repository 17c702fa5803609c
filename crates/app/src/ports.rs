//! Port definitions — traits that adapters implement.
//!
//! Ports are the boundaries between the application core and the outside world.
//! They are defined here (in `app`) so that both the use-case layer and the
//! adapter layer can depend on them without creating circular dependencies.

pub mod catalog;
pub mod disarmer;
pub mod http;
pub mod publisher;
pub mod registry;

pub use catalog::{AccessoryCatalog, CharacteristicWriter};
pub use disarmer::{Disarmed, Disarmer};
pub use http::{DisarmHttpClient, HttpReply};
pub use publisher::SwitchStatePublisher;
pub use registry::AccessoryRegistry;
