//! Energy core configuration parameters
//!
//! Classifier thresholds (raw 8-bit magnitudes, see [`crate::sensors`]) and
//! sampling parameters.  The configuration is fixed when the core is built;
//! nothing re-tunes it at runtime.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::sensors::Channel;

/// Accumulator rail thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccumulatorThresholds {
    /// Below this the accumulator is considered physically absent (~2.0 V).
    pub absent_below: u8,
    /// Above this the rail is out of sane bounds (~4.5 V).
    pub absent_above: u8,
    /// NotUsable → UsableButLow when above (~3.2 V).
    pub low_enter_above: u8,
    /// UsableButLow / Usable → NotUsable when below (~3.2 V).
    pub low_exit_below: u8,
    /// NotUsable → Usable when above (~3.6 V).
    pub usable_enter_above: u8,
    /// Usable → UsableButLow when below (~3.6 V).
    pub usable_exit_below: u8,
    /// UsableButLow → Usable when above (~4.2 V, end of charge).
    pub recharged_above: u8,
}

impl Default for AccumulatorThresholds {
    fn default() -> Self {
        Self {
            absent_below: 50,
            absent_above: 114,
            low_enter_above: 80,
            low_exit_below: 80,
            usable_enter_above: 91,
            usable_exit_below: 91,
            recharged_above: 107,
        }
    }
}

/// Main supply thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplyThresholds {
    /// Present → Failing when below (~7.05 V).
    pub failing_below: u8,
    /// Failing → Present when above (~7.8 V).
    pub recovered_above: u8,
}

impl Default for SupplyThresholds {
    fn default() -> Self {
        Self {
            failing_below: 180,
            recovered_above: 198,
        }
    }
}

/// Boost probe threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadThresholds {
    /// ProbablyActive → Inactive when the boost output saturates above (~9.5 V).
    pub inactive_above: u8,
}

impl Default for LoadThresholds {
    fn default() -> Self {
        Self { inactive_above: 241 }
    }
}

/// Round-robin sampling parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SamplingConfig {
    /// Fixed cyclic order in which channels are converted.
    pub channel_order: [Channel; Channel::COUNT],
    /// Period of the timing event that starts a conversion (microseconds).
    pub sample_period_us: u32,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            channel_order: [Channel::Accumulator, Channel::Load, Channel::Supply],
            sample_period_us: 100,
        }
    }
}

/// Complete core configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EnergyConfig {
    pub accumulator: AccumulatorThresholds,
    pub supply: SupplyThresholds,
    pub load: LoadThresholds,
    pub sampling: SamplingConfig,
}

impl EnergyConfig {
    /// Check the hysteresis and ordering constraints the classifiers rely on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let a = &self.accumulator;

        if a.absent_below >= a.absent_above {
            return Err(ConfigError::ThresholdOrder("absent_below must be below absent_above"));
        }
        // Usability thresholds must sit inside the presence window, otherwise
        // the absence check masks them.
        if a.low_exit_below < a.absent_below || a.low_enter_above < a.absent_below {
            return Err(ConfigError::ThresholdOrder("low thresholds below presence window"));
        }
        if a.recharged_above >= a.absent_above {
            return Err(ConfigError::ThresholdOrder("recharged_above outside presence window"));
        }
        if a.low_exit_below > a.low_enter_above {
            return Err(ConfigError::ThresholdOrder("low_exit_below above low_enter_above"));
        }
        if a.usable_exit_below > a.usable_enter_above {
            return Err(ConfigError::ThresholdOrder("usable_exit_below above usable_enter_above"));
        }
        // Same-direction thresholds must be separated.
        if a.low_enter_above >= a.usable_enter_above {
            return Err(ConfigError::NoHysteresisGap("low_enter_above / usable_enter_above"));
        }
        if a.usable_enter_above >= a.recharged_above {
            return Err(ConfigError::NoHysteresisGap("usable_enter_above / recharged_above"));
        }
        if a.low_exit_below >= a.usable_exit_below {
            return Err(ConfigError::NoHysteresisGap("low_exit_below / usable_exit_below"));
        }

        if self.supply.failing_below >= self.supply.recovered_above {
            return Err(ConfigError::NoHysteresisGap("failing_below / recovered_above"));
        }

        let order = &self.sampling.channel_order;
        for (i, ch) in order.iter().enumerate() {
            if order[..i].contains(ch) {
                return Err(ConfigError::DuplicateChannel(*ch));
            }
        }
        if self.sampling.sample_period_us == 0 {
            return Err(ConfigError::ZeroSamplePeriod);
        }

        Ok(())
    }
}
