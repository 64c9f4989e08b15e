//! Runtime diagnostics.
//!
//! Counters for samples per channel, dropped timer ticks and decision
//! changes, plus a short history of the most recent decision changes.
//! Everything lives in RAM and starts from zero at boot.

use heapless::HistoryBuffer;
use serde::{Deserialize, Serialize};

use crate::policy::EnergyDecision;
use crate::sensors::{Channel, VoltageSample};

const HISTORY_LEN: usize = 8;

/// A decision change and the sample that caused it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionChange {
    /// Index of the sample (0-based, across all channels).
    pub sample_index: u32,
    pub channel: Channel,
    pub raw: u8,
    pub decision: EnergyDecision,
}

/// Serialisable copy of the diagnostics, oldest history entry first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosticsReport {
    pub samples: [u32; Channel::COUNT],
    pub dropped_ticks: u32,
    pub decision_changes: u32,
    pub recent_changes: heapless::Vec<DecisionChange, HISTORY_LEN>,
}

#[derive(Default)]
pub struct Diagnostics {
    samples: [u32; Channel::COUNT],
    dropped_ticks: u32,
    decision_changes: u32,
    history: HistoryBuffer<DecisionChange, HISTORY_LEN>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one classified sample.  `before` is the decision prior to it.
    pub fn record_sample(&mut self, sample: VoltageSample, before: EnergyDecision, after: EnergyDecision) {
        let index = self.total_samples();
        let slot = &mut self.samples[sample.channel as usize];
        *slot = slot.wrapping_add(1);

        if before != after {
            self.decision_changes = self.decision_changes.wrapping_add(1);
            self.history.write(DecisionChange {
                sample_index: index,
                channel: sample.channel,
                raw: sample.raw,
                decision: after,
            });
        }
    }

    pub fn record_dropped_tick(&mut self) {
        self.dropped_ticks = self.dropped_ticks.wrapping_add(1);
    }

    pub fn samples(&self, channel: Channel) -> u32 {
        self.samples[channel as usize]
    }

    pub fn total_samples(&self) -> u32 {
        self.samples.iter().fold(0u32, |acc, n| acc.wrapping_add(*n))
    }

    pub fn dropped_ticks(&self) -> u32 {
        self.dropped_ticks
    }

    pub fn decision_changes(&self) -> u32 {
        self.decision_changes
    }

    /// Most recent decision change, if any.
    pub fn last_change(&self) -> Option<&DecisionChange> {
        self.history.recent()
    }

    pub fn report(&self) -> DiagnosticsReport {
        let mut recent_changes = heapless::Vec::new();
        for change in self.history.oldest_ordered() {
            // Same capacity as the history buffer: cannot overflow.
            let _ = recent_changes.push(*change);
        }
        DiagnosticsReport {
            samples: self.samples,
            dropped_ticks: self.dropped_ticks,
            decision_changes: self.decision_changes,
            recent_changes,
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}
