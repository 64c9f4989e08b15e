//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing every application event through the
//! `log` facade, which the firmware routes to its serial console.

use log::info;

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;
use crate::policy::EnergyDecision;

/// Adapter that logs every [`AppEvent`].
#[derive(Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

fn flags(d: &EnergyDecision) -> [char; 4] {
    [
        if d.usable { 'U' } else { '-' },
        if d.should_charge { 'C' } else { '-' },
        if d.should_solicit { 'S' } else { '-' },
        if d.should_isolate { 'I' } else { '-' },
    ]
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Initialized(d) => {
                let [u, c, s, i] = flags(d);
                info!("INIT   | decision={u}{c}{s}{i}");
            }
            AppEvent::AccumulatorChanged { from, to } => {
                info!("ACCU   | {:?} -> {:?}", from, to);
            }
            AppEvent::SupplyChanged { from, to } => {
                info!("SUPPLY | {:?} -> {:?}", from, to);
            }
            AppEvent::LoadChanged { from, to } => {
                info!("LOAD   | {:?} -> {:?}", from, to);
            }
            AppEvent::LoadReactivated => {
                info!("LOAD   | reactivated by supply recovery");
            }
            AppEvent::DecisionChanged { from, to } => {
                let [u0, c0, s0, i0] = flags(from);
                let [u1, c1, s1, i1] = flags(to);
                info!("DECIDE | {u0}{c0}{s0}{i0} -> {u1}{c1}{s1}{i1}");
            }
        }
    }
}
