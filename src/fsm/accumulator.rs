//! Accumulator usability classifier.
//!
//! ```text
//!              any state ──[raw < 50 || raw > 114]──▶ ABSENT
//!
//!  ABSENT ──[next valid sample]──▶ NOT_USABLE
//!
//!  NOT_USABLE ──[> 80]──▶ USABLE_BUT_LOW ──[> 107]──▶ USABLE
//!      │  ▲                  │     ▲                    │
//!      │  └──────[< 80]──────┘     └───────[< 91]───────┘
//!      └─────────────[> 91]──────────────────▶ USABLE
//!  USABLE ──[< 80]──▶ NOT_USABLE   (via USABLE_BUT_LOW, same sample)
//! ```
//!
//! Leaving `Absent` always lands on `NotUsable`, whatever the magnitude of
//! the first valid sample; finer classification resumes on the next one.

use serde::{Deserialize, Serialize};

use super::{Guard, Preempt, Rule, RuleTable};
use crate::config::AccumulatorThresholds;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum AccumulatorState {
    /// Physically absent, or rail outside sane bounds.
    Absent = 0,
    /// Present but too discharged to be relied upon.
    NotUsable = 1,
    /// Usable, with a low charge level.
    UsableButLow = 2,
    /// Usable.
    Usable = 3,
}

impl AccumulatorState {
    /// Usable or UsableButLow.
    pub const fn is_usable(self) -> bool {
        matches!(self, Self::UsableButLow | Self::Usable)
    }

    /// NotUsable or UsableButLow: present and not full.
    pub const fn needs_charge(self) -> bool {
        matches!(self, Self::NotUsable | Self::UsableButLow)
    }

    pub const fn is_present(self) -> bool {
        !matches!(self, Self::Absent)
    }
}

const RULES: usize = 7;

/// Build the ordered rule table from thresholds.
pub fn build_rule_table(t: &AccumulatorThresholds) -> RuleTable<AccumulatorState, RULES> {
    use AccumulatorState::{Absent, NotUsable, Usable, UsableButLow};

    RuleTable::new(
        "accumulator",
        Some(Preempt {
            guard: Guard::Outside { low: t.absent_below, high: t.absent_above },
            to: Absent,
        }),
        [
            Rule::new(Absent, Guard::Always, NotUsable),
            Rule::new(NotUsable, Guard::Above(t.low_enter_above), UsableButLow),
            Rule::new(NotUsable, Guard::Above(t.usable_enter_above), Usable),
            Rule::new(UsableButLow, Guard::Below(t.low_exit_below), NotUsable),
            Rule::new(UsableButLow, Guard::Above(t.recharged_above), Usable),
            Rule::new(Usable, Guard::Below(t.usable_exit_below), UsableButLow),
            Rule::new(Usable, Guard::Below(t.low_exit_below), NotUsable),
        ],
    )
}

pub struct AccumulatorClassifier {
    table: RuleTable<AccumulatorState, RULES>,
    state: AccumulatorState,
}

impl AccumulatorClassifier {
    pub const INITIAL: AccumulatorState = AccumulatorState::Usable;

    pub fn new(thresholds: &AccumulatorThresholds) -> Self {
        Self {
            table: build_rule_table(thresholds),
            state: Self::INITIAL,
        }
    }

    pub fn state(&self) -> AccumulatorState {
        self.state
    }

    /// Classify one accumulator rail sample.
    pub fn update(&mut self, raw: u8) -> AccumulatorState {
        self.table.step(&mut self.state, raw);
        self.state
    }

    pub fn reset(&mut self) {
        self.state = Self::INITIAL;
    }
}
