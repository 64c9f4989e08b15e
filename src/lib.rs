//! Backup power energy core.
//!
//! Classifies the three monitored rails (accumulator, main supply, boost
//! probe) with hysteretic state machines and derives the actuation
//! decision: is the accumulator usable, should it be charged, should it
//! power the load, should it be isolated.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                    Adapters (outer ring)                     │
//! │   PinActuator (ActuatorPort)   LogEventSink (EventSink)      │
//! │   DecisionCell (ActuatorPort)  SimulatedAdc (AdcPort, sim)   │
//! │                                                              │
//! │   ─────────────── Port Trait Boundary ───────────────        │
//! │                                                              │
//! │   ┌──────────────────────────────────────────────────────┐   │
//! │   │           EnergyService (pure logic)                 │   │
//! │   │   accumulator · supply · load FSMs → decide()        │   │
//! │   └──────────────────────────────────────────────────────┘   │
//! │                                                              │
//! │   SampleScheduler (round robin) · EventQueue · Diagnostics   │
//! └──────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod events;
pub mod fsm;
pub mod policy;
pub mod publish;
pub mod runtime;
pub mod scheduler;
pub mod sensors;

#[cfg(feature = "sim")]
pub mod sim;

pub use app::service::{EnergyService, EnergySnapshot};
pub use config::EnergyConfig;
pub use error::{ConfigError, Error, Result};
pub use fsm::accumulator::AccumulatorState;
pub use fsm::load::LoadState;
pub use fsm::supply::SupplyState;
pub use policy::{EnergyDecision, decide};
pub use runtime::EnergyRuntime;
pub use sensors::{Channel, VoltageSample};
