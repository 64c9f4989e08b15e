//! Downstream load activity classifier.
//!
//! The boost converter output is used as a probe: while the consumer draws
//! current the output stays regulated; once it stops, the output saturates.
//!
//! ```text
//!  PROBABLY_ACTIVE ──[raw > 241]──▶ INACTIVE  (sticky)
//!         ▲                             │
//!         └──── supply recovery ────────┘
//! ```

use serde::{Deserialize, Serialize};

use super::{Guard, Rule, RuleTable};
use crate::config::LoadThresholds;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum LoadState {
    ProbablyActive = 0,
    Inactive = 1,
}

pub fn build_rule_table(t: &LoadThresholds) -> RuleTable<LoadState, 1> {
    RuleTable::new(
        "load",
        None,
        [Rule::new(
            LoadState::ProbablyActive,
            Guard::Above(t.inactive_above),
            LoadState::Inactive,
        )],
    )
}

pub struct LoadClassifier {
    table: RuleTable<LoadState, 1>,
    state: LoadState,
}

impl LoadClassifier {
    pub const INITIAL: LoadState = LoadState::ProbablyActive;

    pub fn new(thresholds: &LoadThresholds) -> Self {
        Self {
            table: build_rule_table(thresholds),
            state: Self::INITIAL,
        }
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    /// Classify one boost probe sample.
    pub fn update(&mut self, raw: u8) -> LoadState {
        self.table.step(&mut self.state, raw);
        self.state
    }

    /// Assume the consumer is active again.  Only the supply recovery path
    /// and a full reset go through here.  Returns `true` if it was inactive.
    pub(crate) fn reactivate(&mut self) -> bool {
        let was_inactive = self.state == LoadState::Inactive;
        self.state = LoadState::ProbablyActive;
        was_inactive
    }

    pub fn reset(&mut self) {
        self.state = Self::INITIAL;
    }
}
