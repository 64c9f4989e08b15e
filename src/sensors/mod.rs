//! Analog rail model: channels, samples and unit conversions.
//!
//! Every rail reaches the converter through a fixed 1:2 resistive divider
//! and is digitised on 8 bits against a 5 V reference:
//!
//! ```text
//!   rail ──┬── R ──┐
//!          │       ├──▶ ADC (0..=255, 255 = 5.0 V at the pin)
//!          └── R ──┘
//!
//!   raw ≈ volts × 10 × 2.55      e.g. 4.2 V  ──▶ 107
//! ```

use serde::{Deserialize, Serialize};

/// Logical sampling channel.  Closed set: the scheduler can only ever name
/// one of these three rails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Channel {
    /// Backup accumulator output.
    Accumulator = 0,
    /// Boost converter output, used as a probe for load activity.
    Load = 1,
    /// Main supply.
    Supply = 2,
}

impl Channel {
    pub const COUNT: usize = 3;

    pub const ALL: [Channel; Self::COUNT] = [Self::Accumulator, Self::Load, Self::Supply];

    /// Analog input the rail is wired to on the reference board.
    pub const fn analog_input(self) -> u8 {
        match self {
            Self::Accumulator => 4,
            Self::Load => 5,
            Self::Supply => 6,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Accumulator => "accumulator",
            Self::Load => "load",
            Self::Supply => "supply",
        }
    }
}

impl core::fmt::Display for Channel {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

/// One completed conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoltageSample {
    pub channel: Channel,
    pub raw: u8,
}

impl VoltageSample {
    pub const fn new(channel: Channel, raw: u8) -> Self {
        Self { channel, raw }
    }

    /// Rail voltage in tenths of a volt (before the divider).
    pub fn decivolts(&self) -> u16 {
        decivolts_from_raw(self.raw)
    }
}

/// Raw reading for a rail at `decivolts` tenths of a volt.
///
/// Integer arithmetic, truncating, matching the calibration used by the
/// on-target tests: 42 (4.2 V) → 107, 35 → 89.  Saturates at 255.
pub fn raw_from_decivolts(decivolts: u16) -> u8 {
    let raw = u32::from(decivolts) * 255 / 100;
    raw.min(u32::from(u8::MAX)) as u8
}

/// Inverse of [`raw_from_decivolts`], truncating.
pub fn decivolts_from_raw(raw: u8) -> u16 {
    u16::from(raw) * 100 / 255
}
