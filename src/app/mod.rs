//! Application core: classifiers and policy behind port traits.
//!
//! [`service::EnergyService`] owns the three classifiers and the derived
//! decision.  All interaction with hardware happens through the traits in
//! [`ports`], keeping this layer testable without real peripherals.

pub mod events;
pub mod ports;
pub mod service;
