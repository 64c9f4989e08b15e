//! Table-driven hysteretic classifiers.
//!
//! Each rail classifier is a small finite state machine whose transitions
//! are rows in a fixed-size rule table:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  RuleTable                                               │
//! │  preempt: guard ──▶ state      (checked first, any state) │
//! │  ┌──────────────┬────────────────┬──────────────────┐    │
//! │  │ from         │ guard          │ to               │    │
//! │  ├──────────────┼────────────────┼──────────────────┤    │
//! │  │ NotUsable    │ raw > 80       │ UsableButLow     │    │
//! │  │ NotUsable    │ raw > 91       │ Usable           │    │
//! │  │ ...          │ ...            │ ...              │    │
//! │  └──────────────┴────────────────┴──────────────────┘    │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! On each sample the engine first checks the preempting rule.  If it does
//! not fire, **every** row whose `from` matches the state held *before* the
//! sample is evaluated top to bottom, and each matching guard overwrites
//! the result.  A single sample can therefore move two steps
//! (Usable → UsableButLow → NotUsable) when two rows of the same origin
//! both match; the last matching row wins.

pub mod accumulator;
pub mod load;
pub mod supply;

use core::fmt::Debug;

use log::info;

// ---------------------------------------------------------------------------
// Guards
// ---------------------------------------------------------------------------

/// Condition on a raw 8-bit sample.  All comparisons are strict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Guard {
    /// Always holds.
    Always,
    /// `raw > threshold`.
    Above(u8),
    /// `raw < threshold`.
    Below(u8),
    /// `raw < low || raw > high`.
    Outside { low: u8, high: u8 },
}

impl Guard {
    pub const fn holds(self, raw: u8) -> bool {
        match self {
            Self::Always => true,
            Self::Above(t) => raw > t,
            Self::Below(t) => raw < t,
            Self::Outside { low, high } => raw < low || raw > high,
        }
    }
}

// ---------------------------------------------------------------------------
// Rules
// ---------------------------------------------------------------------------

/// One row: while in `from`, a sample satisfying `guard` selects `to`.
#[derive(Debug, Clone, Copy)]
pub struct Rule<S> {
    pub from: S,
    pub guard: Guard,
    pub to: S,
}

impl<S> Rule<S> {
    pub const fn new(from: S, guard: Guard, to: S) -> Self {
        Self { from, guard, to }
    }
}

/// A rule that applies from any state and short-circuits the table.
#[derive(Debug, Clone, Copy)]
pub struct Preempt<S> {
    pub guard: Guard,
    pub to: S,
}

/// Fixed-size ordered rule table.  No heap, no `dyn`.
#[derive(Debug, Clone)]
pub struct RuleTable<S, const N: usize> {
    name: &'static str,
    preempt: Option<Preempt<S>>,
    rules: [Rule<S>; N],
}

impl<S: Copy + Eq + Debug, const N: usize> RuleTable<S, N> {
    pub const fn new(name: &'static str, preempt: Option<Preempt<S>>, rules: [Rule<S>; N]) -> Self {
        Self { name, preempt, rules }
    }

    /// Compute the state following `current` for one sample.  Total: any
    /// `raw` yields a state, and a state with no matching row stays put.
    pub fn next(&self, current: S, raw: u8) -> S {
        if let Some(p) = self.preempt {
            if p.guard.holds(raw) {
                return p.to;
            }
        }

        self.rules
            .iter()
            .filter(|rule| rule.from == current)
            .fold(current, |acc, rule| if rule.guard.holds(raw) { rule.to } else { acc })
    }

    /// Apply one sample to `state` in place, logging a transition.
    /// Returns `true` if the state changed.
    pub fn step(&self, state: &mut S, raw: u8) -> bool {
        let next = self.next(*state, raw);
        if next == *state {
            return false;
        }
        info!("{} transition: {:?} -> {:?} (raw={})", self.name, *state, next, raw);
        *state = next;
        true
    }
}
