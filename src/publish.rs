//! Lock-free publication of the latest decision.
//!
//! The core writes the decision after every recompute; a consumer in
//! another context (main loop, indicator task) reads it without locking.
//! The four flags are packed into one byte so a single atomic store
//! publishes a consistent record.

use core::sync::atomic::{AtomicU8, Ordering};

use crate::app::ports::ActuatorPort;
use crate::policy::EnergyDecision;

pub struct DecisionCell {
    bits: AtomicU8,
}

impl DecisionCell {
    pub const fn new() -> Self {
        Self { bits: AtomicU8::new(0) }
    }

    pub fn publish(&self, decision: &EnergyDecision) {
        self.bits.store(decision.to_bits(), Ordering::Release);
    }

    pub fn load(&self) -> EnergyDecision {
        EnergyDecision::from_bits(self.bits.load(Ordering::Acquire))
    }
}

impl Default for DecisionCell {
    fn default() -> Self {
        Self::new()
    }
}

/// A shared reference is enough to publish.
impl ActuatorPort for &DecisionCell {
    fn apply(&mut self, decision: &EnergyDecision) {
        self.publish(decision);
    }
}
