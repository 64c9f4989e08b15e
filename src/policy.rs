//! Policy engine: classifier states → actuation decision.
//!
//! ```text
//!   AccumulatorState ─┐
//!   SupplyState ──────┼──▶ decide() ──▶ EnergyDecision { usable, charge, solicit, isolate }
//!   LoadState ────────┘
//! ```
//!
//! `decide` is a pure, total function: it has no memory, and the decision
//! record is always recomputed from scratch after every classifier update.

use serde::{Deserialize, Serialize};

use crate::fsm::accumulator::AccumulatorState;
use crate::fsm::load::LoadState;
use crate::fsm::supply::SupplyState;

/// Actuation decision.  Four independent flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct EnergyDecision {
    /// The accumulator holds usable charge.
    pub usable: bool,
    /// Charge the accumulator from the main supply.
    pub should_charge: bool,
    /// Draw from the accumulator to power the load.
    pub should_solicit: bool,
    /// Disconnect the accumulator from the circuit.
    pub should_isolate: bool,
}

impl EnergyDecision {
    const USABLE: u8 = 0b0001;
    const CHARGE: u8 = 0b0010;
    const SOLICIT: u8 = 0b0100;
    const ISOLATE: u8 = 0b1000;

    /// Pack into the low nibble of a byte.
    pub const fn to_bits(self) -> u8 {
        (self.usable as u8 * Self::USABLE)
            | (self.should_charge as u8 * Self::CHARGE)
            | (self.should_solicit as u8 * Self::SOLICIT)
            | (self.should_isolate as u8 * Self::ISOLATE)
    }

    /// Unpack; bits above the low nibble are ignored.
    pub const fn from_bits(bits: u8) -> Self {
        Self {
            usable: bits & Self::USABLE != 0,
            should_charge: bits & Self::CHARGE != 0,
            should_solicit: bits & Self::SOLICIT != 0,
            should_isolate: bits & Self::ISOLATE != 0,
        }
    }
}

/// Compute the decision for a classifier state triple.
///
/// The checks under a failing supply run in a fixed order: solicitation is
/// decided from the accumulator and load, then an unusable accumulator
/// isolates, and last an inactive load isolates regardless of what came
/// before.
pub fn decide(acc: AccumulatorState, sup: SupplyState, load: LoadState) -> EnergyDecision {
    let mut d = EnergyDecision {
        usable: acc.is_usable(),
        ..EnergyDecision::default()
    };

    match sup {
        SupplyState::Present => {
            d.should_charge = acc.needs_charge();
        }
        SupplyState::Failing => {
            if acc.is_usable() {
                if load == LoadState::ProbablyActive {
                    d.should_solicit = true;
                }
            } else {
                d.should_isolate = true;
            }

            if load == LoadState::Inactive {
                d.should_isolate = true;
            }
        }
    }

    d
}
