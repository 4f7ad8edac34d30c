//! # SalonBook Core
//!
//! Domain model and scheduling rules for booking salon appointments between a
//! client, a master (service provider) and a catalog service.
//!
//! The crate owns the appointment invariant: for a given master, no two
//! non-cancelled appointments share the same appointment time. Persistence is
//! reached only through the [`store::EntityStore`] port, and "now" is read from
//! an injected [`Clock`], so every rule can be exercised deterministically.

pub mod errors;
pub mod mock;
pub mod models;
pub mod services;
pub mod store;

pub use mockable::{Clock, DefaultClock};
