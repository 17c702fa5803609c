//! # disarmrelay-app
//!
//! Application layer — use-cases and **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound ports):
//!   - `AccessoryCatalog` — enumerate the host's accessories (plus the
//!     optional bridged-list capability)
//!   - `CharacteristicWriter` — write characteristic values on live accessories
//!   - `AccessoryRegistry` — cached snapshot plus register/unregister
//!   - `DisarmHttpClient` — POST the disarm command to an HTTP endpoint
//!   - `SwitchStatePublisher` — push the switch's visible value to the host
//! - Define **driving/inbound ports** as use-case structs:
//!   - `AlarmResolver` — locate the target alarm per the configured strategy
//!   - `DisarmExecutor` — issue the disarm command and classify the outcome
//!   - `DisarmPipeline` — resolve then execute, one attempt per activation
//!   - `TriggerSwitch` — the stateless on/off control surface
//!   - `DiscoveryCoordinator` — reconcile the host cache against the
//!     canonical trigger accessory
//! - Orchestrate domain objects without knowing *how* the host or the
//!   network IO works
//!
//! ## Dependency rule
//! Depends on `disarmrelay-domain` only (plus `tokio` for the reset timer).
//! Never imports adapter crates. Adapters depend on *this* crate, not the
//! reverse.

pub mod ports;
pub mod services;
