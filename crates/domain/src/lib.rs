//! # disarmrelay-domain
//!
//! Pure domain model for the disarmrelay accessory-host plugin.
//!
//! ## Responsibilities
//! - Foundational types: the label-derived [`AccessoryId`](id::AccessoryId),
//!   error conventions
//! - Define **Accessories** (read-only snapshots of devices the host exposes)
//! - Define **Services** and **Characteristics** (typed capability groupings
//!   and their value slots, including the fixed
//!   [`DISARM`](characteristic::DISARM) target-state value)
//! - Define the **resolution strategies** and the **resolved target** they
//!   produce
//! - Define the full disarm error taxonomy
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod accessory;
pub mod characteristic;
pub mod error;
pub mod id;
pub mod service;
pub mod strategy;
pub mod target;
