//! Energy service: the owned aggregate holding all rail state.
//!
//! [`EnergyService`] owns the three rail classifiers and the derived
//! decision.  There is no global state: build as many independent
//! instances as needed (one per device, one per test).
//!
//! ```text
//!  VoltageSample ──▶ ┌──────────────────────────────┐ ──▶ EventSink
//!                    │        EnergyService          │
//!                    │  accumulator · supply · load  │
//!   ActuatorPort ◀── │        decide() → decision    │
//!                    └──────────────────────────────┘
//! ```
//!
//! Every classifier update is followed by a full policy recompute, so
//! [`EnergyService::decision`] always reflects the current state triple.

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::config::EnergyConfig;
use crate::error::Result;
use crate::fsm::accumulator::{AccumulatorClassifier, AccumulatorState};
use crate::fsm::load::{LoadClassifier, LoadState};
use crate::fsm::supply::{SupplyClassifier, SupplyEffect, SupplyState};
use crate::policy::{EnergyDecision, decide};
use crate::sensors::{Channel, VoltageSample};

use super::events::AppEvent;
use super::ports::{ActuatorPort, EventSink};

/// Point-in-time view of the aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnergySnapshot {
    pub accumulator: AccumulatorState,
    pub supply: SupplyState,
    pub load: LoadState,
    pub decision: EnergyDecision,
}

pub struct EnergyService {
    accumulator: AccumulatorClassifier,
    supply: SupplyClassifier,
    load: LoadClassifier,
    decision: EnergyDecision,
}

impl EnergyService {
    /// Build from a validated configuration, in the initial state.
    pub fn new(config: &EnergyConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    /// Build with the board's default thresholds.
    pub fn with_defaults() -> Self {
        Self::build(&EnergyConfig::default())
    }

    fn build(config: &EnergyConfig) -> Self {
        let mut service = Self {
            accumulator: AccumulatorClassifier::new(&config.accumulator),
            supply: SupplyClassifier::new(&config.supply),
            load: LoadClassifier::new(&config.load),
            decision: EnergyDecision::default(),
        };
        service.initialize();
        service
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Reset to (Usable, Present, ProbablyActive) and derive the decision.
    /// Callable at boot and between test scenarios.
    pub fn initialize(&mut self) -> EnergyDecision {
        self.accumulator.reset();
        self.supply.reset();
        self.load.reset();
        self.recompute()
    }

    /// [`initialize`](Self::initialize), then announce and apply the
    /// initial decision.
    pub fn start(&mut self, hw: &mut impl ActuatorPort, sink: &mut impl EventSink) {
        let decision = self.initialize();
        info!("EnergyService initialized: {:?}", self.snapshot());
        sink.emit(&AppEvent::Initialized(decision));
        hw.apply(&decision);
    }

    // ── Classifier updates ────────────────────────────────────

    /// Classify an accumulator rail sample and recompute the decision.
    pub fn update_accumulator(&mut self, raw: u8) -> AccumulatorState {
        let state = self.accumulator.update(raw);
        self.recompute();
        state
    }

    /// Classify a main supply sample, apply the recovery effect if any,
    /// and recompute the decision.
    pub fn update_supply(&mut self, raw: u8) -> SupplyState {
        let update = self.supply.update(raw);
        if let Some(effect) = update.effect {
            self.apply_effect(effect);
        }
        self.recompute();
        update.state
    }

    /// Classify a boost probe sample and recompute the decision.
    pub fn update_load(&mut self, raw: u8) -> LoadState {
        let state = self.load.update(raw);
        self.recompute();
        state
    }

    /// Full cycle for one completed conversion: classify, recompute, emit
    /// what changed, and hand the decision to the actuator.
    pub fn handle_sample(
        &mut self,
        sample: VoltageSample,
        hw: &mut impl ActuatorPort,
        sink: &mut impl EventSink,
    ) -> EnergyDecision {
        let before = self.snapshot();

        match sample.channel {
            Channel::Accumulator => {
                self.update_accumulator(sample.raw);
            }
            Channel::Load => {
                self.update_load(sample.raw);
            }
            Channel::Supply => {
                self.update_supply(sample.raw);
            }
        }

        let after = self.snapshot();
        Self::emit_changes(&before, &after, sink);
        hw.apply(&after.decision);
        after.decision
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn decision(&self) -> EnergyDecision {
        self.decision
    }

    pub fn accumulator_state(&self) -> AccumulatorState {
        self.accumulator.state()
    }

    pub fn supply_state(&self) -> SupplyState {
        self.supply.state()
    }

    pub fn load_state(&self) -> LoadState {
        self.load.state()
    }

    pub fn snapshot(&self) -> EnergySnapshot {
        EnergySnapshot {
            accumulator: self.accumulator.state(),
            supply: self.supply.state(),
            load: self.load.state(),
            decision: self.decision,
        }
    }

    // ── Internal ──────────────────────────────────────────────

    fn apply_effect(&mut self, effect: SupplyEffect) {
        match effect {
            SupplyEffect::ReactivateLoad => {
                if self.load.reactivate() {
                    info!("supply recovered: load assumed active again");
                }
            }
        }
    }

    fn recompute(&mut self) -> EnergyDecision {
        let next = decide(self.accumulator.state(), self.supply.state(), self.load.state());
        if next != self.decision {
            debug!("decision: {:?} -> {:?}", self.decision, next);
        }
        self.decision = next;
        next
    }

    fn emit_changes(before: &EnergySnapshot, after: &EnergySnapshot, sink: &mut impl EventSink) {
        if before.accumulator != after.accumulator {
            sink.emit(&AppEvent::AccumulatorChanged { from: before.accumulator, to: after.accumulator });
        }
        if before.supply != after.supply {
            sink.emit(&AppEvent::SupplyChanged { from: before.supply, to: after.supply });
        }
        if before.load != after.load {
            // The only way back to ProbablyActive is supply recovery.
            if after.load == LoadState::ProbablyActive {
                sink.emit(&AppEvent::LoadReactivated);
            } else {
                sink.emit(&AppEvent::LoadChanged { from: before.load, to: after.load });
            }
        }
        if before.decision != after.decision {
            sink.emit(&AppEvent::DecisionChanged { from: before.decision, to: after.decision });
        }
    }
}
