//! Outbound application events.
//!
//! The [`EnergyService`](super::service::EnergyService) emits these through
//! the [`EventSink`](super::ports::EventSink) port.

use crate::fsm::accumulator::AccumulatorState;
use crate::fsm::load::LoadState;
use crate::fsm::supply::SupplyState;
use crate::policy::EnergyDecision;

/// Structured events emitted by the energy core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEvent {
    /// States were reset to their defaults (boot or explicit reset).
    Initialized(EnergyDecision),

    AccumulatorChanged { from: AccumulatorState, to: AccumulatorState },

    SupplyChanged { from: SupplyState, to: SupplyState },

    LoadChanged { from: LoadState, to: LoadState },

    /// Supply recovery forced the load back to `ProbablyActive`.
    LoadReactivated,

    /// The recomputed decision differs from the previous one.
    DecisionChanged { from: EnergyDecision, to: EnergyDecision },
}
