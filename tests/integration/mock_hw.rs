//! Mock hardware for integration tests.
//!
//! Records every actuator call, every emitted event and every requested
//! conversion so tests can assert on the full history.

use backup_power::Channel;
use backup_power::EnergyDecision;
use backup_power::app::events::AppEvent;
use backup_power::app::ports::{ActuatorPort, AdcPort, EventSink};

// ── Actuator ─────────────────────────────────────────────────

#[derive(Default)]
pub struct MockActuator {
    pub applied: Vec<EnergyDecision>,
}

#[allow(dead_code)]
impl MockActuator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<EnergyDecision> {
        self.applied.last().copied()
    }
}

impl ActuatorPort for MockActuator {
    fn apply(&mut self, decision: &EnergyDecision) {
        self.applied.push(*decision);
    }
}

// ── Event sink ───────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingSink {
    pub events: Vec<AppEvent>,
}

#[allow(dead_code)]
impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, pred: impl Fn(&AppEvent) -> bool) -> usize {
        self.events.iter().filter(|e| pred(e)).count()
    }
}

impl EventSink for RecordingSink {
    fn emit(&mut self, event: &AppEvent) {
        self.events.push(*event);
    }
}

// ── Converter ────────────────────────────────────────────────

/// Converter with fixed rail values that remembers every request.
#[derive(Default)]
pub struct MockAdc {
    pub rails: [u8; Channel::COUNT],
    pub requests: Vec<Channel>,
}

#[allow(dead_code)]
impl MockAdc {
    pub fn with_rails(accumulator: u8, load: u8, supply: u8) -> Self {
        let mut adc = Self::default();
        adc.rails[Channel::Accumulator as usize] = accumulator;
        adc.rails[Channel::Load as usize] = load;
        adc.rails[Channel::Supply as usize] = supply;
        adc
    }

    /// Value for the most recent request.
    pub fn result(&self) -> u8 {
        self.requests.last().map_or(0, |ch| self.rails[*ch as usize])
    }

    pub fn set(&mut self, channel: Channel, raw: u8) {
        self.rails[channel as usize] = raw;
    }
}

impl AdcPort for MockAdc {
    fn start_conversion(&mut self, channel: Channel) {
        self.requests.push(channel);
    }
}
