//! Main supply health classifier.
//!
//! ```text
//!  PRESENT ──[raw < 180]──▶ FAILING ──[raw > 198]──▶ PRESENT
//!                                         │
//!                                         └─▶ effect: ReactivateLoad
//! ```
//!
//! Recovery of the main supply is assumed to re-energise the downstream
//! consumer.  The classifier does not touch the load state itself; it
//! returns the effect and the owner of both classifiers applies it.

use serde::{Deserialize, Serialize};

use super::{Guard, Rule, RuleTable};
use crate::config::SupplyThresholds;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum SupplyState {
    Present = 0,
    Failing = 1,
}

/// Cross-classifier effect produced by a supply update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupplyEffect {
    /// The supply came back: load must be assumed active again.
    ReactivateLoad,
}

/// Result of one supply sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SupplyUpdate {
    pub state: SupplyState,
    pub effect: Option<SupplyEffect>,
}

pub fn build_rule_table(t: &SupplyThresholds) -> RuleTable<SupplyState, 2> {
    use SupplyState::{Failing, Present};

    RuleTable::new(
        "supply",
        None,
        [
            Rule::new(Present, Guard::Below(t.failing_below), Failing),
            Rule::new(Failing, Guard::Above(t.recovered_above), Present),
        ],
    )
}

pub struct SupplyClassifier {
    table: RuleTable<SupplyState, 2>,
    state: SupplyState,
}

impl SupplyClassifier {
    pub const INITIAL: SupplyState = SupplyState::Present;

    pub fn new(thresholds: &SupplyThresholds) -> Self {
        Self {
            table: build_rule_table(thresholds),
            state: Self::INITIAL,
        }
    }

    pub fn state(&self) -> SupplyState {
        self.state
    }

    /// Classify one supply rail sample.
    pub fn update(&mut self, raw: u8) -> SupplyUpdate {
        let before = self.state;
        self.table.step(&mut self.state, raw);

        let effect = (before == SupplyState::Failing && self.state == SupplyState::Present)
            .then_some(SupplyEffect::ReactivateLoad);

        SupplyUpdate { state: self.state, effect }
    }

    pub fn reset(&mut self) {
        self.state = Self::INITIAL;
    }
}
