//! Host-side simulation of the sampling front end.
//!
//! [`SimulatedAdc`] stands in for the shared converter: it remembers which
//! channel was requested and answers with the configured rail value.
//! [`Simulator`] drives an [`EnergyRuntime`] from a parsed trace and
//! records the decision after every step.

pub mod trace;

use std::path::Path;

use anyhow::{Context, Result};
use log::info;

use crate::adapters::log_sink::LogEventSink;
use crate::app::ports::{AdcPort, NullSink};
use crate::config::EnergyConfig;
use crate::events::Event;
use crate::policy::EnergyDecision;
use crate::runtime::EnergyRuntime;
use crate::sensors::{Channel, VoltageSample};

use trace::{Step, parse_trace};

/// Simulated converter with one fixed value per rail.
#[derive(Debug, Default)]
pub struct SimulatedAdc {
    rails: [u8; Channel::COUNT],
    requested: Option<Channel>,
    conversions: u32,
}

impl SimulatedAdc {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_rail(&mut self, channel: Channel, raw: u8) {
        self.rails[channel as usize] = raw;
    }

    pub fn rail(&self, channel: Channel) -> u8 {
        self.rails[channel as usize]
    }

    /// Finish the requested conversion.  `None` if nothing was requested.
    pub fn complete(&mut self) -> Option<u8> {
        self.requested.take().map(|ch| self.rail(ch))
    }

    /// Conversions started so far.
    pub fn conversions(&self) -> u32 {
        self.conversions
    }
}

impl AdcPort for SimulatedAdc {
    fn start_conversion(&mut self, channel: Channel) {
        self.requested = Some(channel);
        self.conversions += 1;
    }
}

pub type SimRuntime = EnergyRuntime<SimulatedAdc, NullSink, LogEventSink>;

pub struct Simulator {
    runtime: SimRuntime,
}

impl Simulator {
    pub fn new(config: &EnergyConfig) -> Result<Self> {
        let mut runtime = EnergyRuntime::new(config, SimulatedAdc::new(), NullSink, LogEventSink::new())
            .context("building simulation runtime")?;
        runtime.start();
        Ok(Self { runtime })
    }

    /// One timer → conversion cycle on the current channel.
    pub fn cycle(&mut self) -> EnergyDecision {
        self.runtime.dispatch(Event::TimerElapsed);
        match self.runtime.adc_mut().complete() {
            Some(raw) => self.runtime.dispatch(Event::ConversionComplete(raw)).unwrap_or(self.runtime.decision()),
            None => self.runtime.decision(),
        }
    }

    /// Execute one step and return the decision afterwards.
    pub fn step(&mut self, step: Step) -> EnergyDecision {
        match step {
            Step::Sample(channel, raw) => self.runtime.inject(VoltageSample::new(channel, raw)),
            Step::Rails { accumulator, load, supply } => {
                let adc = self.runtime.adc_mut();
                adc.set_rail(Channel::Accumulator, accumulator);
                adc.set_rail(Channel::Load, load);
                adc.set_rail(Channel::Supply, supply);
                self.runtime.decision()
            }
            Step::Tick(n) => {
                for _ in 0..n {
                    self.cycle();
                }
                self.runtime.decision()
            }
            Step::Reset => {
                self.runtime.start();
                self.runtime.decision()
            }
        }
    }

    pub fn run(&mut self, steps: &[Step]) -> Vec<EnergyDecision> {
        steps.iter().map(|s| self.step(*s)).collect()
    }

    pub fn runtime(&self) -> &SimRuntime {
        &self.runtime
    }
}

/// Parse and run a trace with the default configuration.
pub fn replay(text: &str) -> Result<Vec<EnergyDecision>> {
    let steps = parse_trace(text)?;
    let mut sim = Simulator::new(&EnergyConfig::default())?;
    let decisions = sim.run(&steps);
    info!("replayed {} steps, {} decision changes", steps.len(), sim.runtime().diagnostics().decision_changes());
    Ok(decisions)
}

/// [`replay`] a trace file.
pub fn replay_file(path: impl AsRef<Path>) -> Result<Vec<EnergyDecision>> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).with_context(|| format!("reading trace {}", path.display()))?;
    replay(&text).with_context(|| format!("replaying {}", path.display()))
}
