//! Error types for the energy core.
//!
//! The decision path itself is infallible: every 8-bit sample is legal and
//! every transition is total.  Errors only arise when building the core
//! from a configuration that would break the classifiers' hysteresis.

use core::fmt;

use crate::sensors::Channel;

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Configuration is invalid.
    Config(ConfigError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "config: {e}"),
        }
    }
}

impl core::error::Error for Error {}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// Two thresholds are in the wrong order.
    ThresholdOrder(&'static str),
    /// Two thresholds in the same direction coincide or cross.
    NoHysteresisGap(&'static str),
    /// The sampling order names a channel twice (and so omits another).
    DuplicateChannel(Channel),
    /// The timing event period is zero.
    ZeroSamplePeriod,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ThresholdOrder(which) => write!(f, "threshold order: {which}"),
            Self::NoHysteresisGap(which) => write!(f, "no hysteresis gap: {which}"),
            Self::DuplicateChannel(ch) => write!(f, "channel {ch} sampled twice"),
            Self::ZeroSamplePeriod => write!(f, "sample period is zero"),
        }
    }
}

impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
