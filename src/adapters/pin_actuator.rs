//! GPIO actuator adapter.
//!
//! Drives the reference board's outputs from the decision record through
//! `embedded-hal` output pins:
//!
//! | Output          | Level                        |
//! |-----------------|------------------------------|
//! | charge enable   | `should_charge`              |
//! | boost enable    | `should_solicit`             |
//! | isolation switch| `should_isolate`             |
//! | LED attention   | `!usable \|\| should_charge` |
//! | LED ready       | `usable`                     |
//! | LED solicit     | `should_solicit`             |
//!
//! Pin write failures are logged and the remaining outputs still written.

use embedded_hal::digital::{OutputPin, PinState};
use log::warn;

use crate::app::ports::ActuatorPort;
use crate::policy::EnergyDecision;

/// Output levels derived from a decision.  `true` = driven high.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OutputLevels {
    pub charge_enable: bool,
    pub boost_enable: bool,
    pub isolate: bool,
    pub led_attention: bool,
    pub led_ready: bool,
    pub led_solicit: bool,
}

impl From<&EnergyDecision> for OutputLevels {
    fn from(d: &EnergyDecision) -> Self {
        Self {
            charge_enable: d.should_charge,
            boost_enable: d.should_solicit,
            isolate: d.should_isolate,
            led_attention: !d.usable || d.should_charge,
            led_ready: d.usable,
            led_solicit: d.should_solicit,
        }
    }
}

/// The six output pins of the board.
pub struct PinSet<C, B, I, LA, LR, LS> {
    pub charge_enable: C,
    pub boost_enable: B,
    pub isolate: I,
    pub led_attention: LA,
    pub led_ready: LR,
    pub led_solicit: LS,
}

pub struct PinActuator<C, B, I, LA, LR, LS> {
    pins: PinSet<C, B, I, LA, LR, LS>,
    last: Option<OutputLevels>,
}

impl<C, B, I, LA, LR, LS> PinActuator<C, B, I, LA, LR, LS>
where
    C: OutputPin,
    B: OutputPin,
    I: OutputPin,
    LA: OutputPin,
    LR: OutputPin,
    LS: OutputPin,
{
    pub fn new(pins: PinSet<C, B, I, LA, LR, LS>) -> Self {
        Self { pins, last: None }
    }

    /// Levels most recently written, if any.
    pub fn levels(&self) -> Option<OutputLevels> {
        self.last
    }

    pub fn release(self) -> PinSet<C, B, I, LA, LR, LS> {
        self.pins
    }

    fn write(&mut self, levels: OutputLevels) {
        drive(&mut self.pins.charge_enable, "charge_enable", levels.charge_enable);
        drive(&mut self.pins.boost_enable, "boost_enable", levels.boost_enable);
        drive(&mut self.pins.isolate, "isolate", levels.isolate);
        drive(&mut self.pins.led_attention, "led_attention", levels.led_attention);
        drive(&mut self.pins.led_ready, "led_ready", levels.led_ready);
        drive(&mut self.pins.led_solicit, "led_solicit", levels.led_solicit);
        self.last = Some(levels);
    }
}

fn drive(pin: &mut impl OutputPin, name: &str, high: bool) {
    if let Err(e) = pin.set_state(PinState::from(high)) {
        warn!("pin {name}: write failed: {e:?}");
    }
}

impl<C, B, I, LA, LR, LS> ActuatorPort for PinActuator<C, B, I, LA, LR, LS>
where
    C: OutputPin,
    B: OutputPin,
    I: OutputPin,
    LA: OutputPin,
    LR: OutputPin,
    LS: OutputPin,
{
    fn apply(&mut self, decision: &EnergyDecision) {
        self.write(OutputLevels::from(decision));
    }
}
