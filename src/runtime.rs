//! Event dispatch: binds scheduler, service and ports together.
//!
//! ```text
//!   Event::TimerElapsed          ──▶ scheduler.on_timer(adc)
//!   Event::ConversionComplete(r) ──▶ scheduler.on_conversion_complete(r)
//!                                      └─▶ service.handle_sample(sample, actuator, sink)
//!                                            └─▶ diagnostics.record_sample(..)
//! ```
//!
//! Events must be dispatched one at a time, in the order the hardware
//! delivered them.  The runtime is not reentrant and holds no locks.

use crate::app::ports::{ActuatorPort, AdcPort, EventSink};
use crate::app::service::EnergyService;
use crate::config::EnergyConfig;
use crate::diagnostics::Diagnostics;
use crate::error::Result;
use crate::events::{Event, EventConsumer, EventQueue};
use crate::policy::EnergyDecision;
use crate::scheduler::SampleScheduler;
use crate::sensors::{Channel, VoltageSample};

pub struct EnergyRuntime<A, H, S> {
    service: EnergyService,
    scheduler: SampleScheduler,
    diagnostics: Diagnostics,
    adc: A,
    actuator: H,
    sink: S,
}

impl<A: AdcPort, H: ActuatorPort, S: EventSink> EnergyRuntime<A, H, S> {
    /// Build from a validated configuration.  Call [`start`](Self::start)
    /// before dispatching events.
    pub fn new(config: &EnergyConfig, adc: A, actuator: H, sink: S) -> Result<Self> {
        Ok(Self {
            service: EnergyService::new(config)?,
            scheduler: SampleScheduler::new(&config.sampling),
            diagnostics: Diagnostics::new(),
            adc,
            actuator,
            sink,
        })
    }

    /// Reset every state to its default and push the initial decision out.
    pub fn start(&mut self) {
        self.scheduler.reset();
        self.service.start(&mut self.actuator, &mut self.sink);
    }

    /// Dispatch one event.  Returns the recomputed decision for a
    /// conversion-complete event.
    pub fn dispatch(&mut self, event: Event) -> Option<EnergyDecision> {
        match event {
            Event::TimerElapsed => {
                if self.scheduler.on_timer(&mut self.adc).is_none() {
                    self.diagnostics.record_dropped_tick();
                }
                None
            }
            Event::ConversionComplete(raw) => {
                let sample = self.scheduler.on_conversion_complete(raw);
                Some(self.inject(sample))
            }
        }
    }

    /// Feed a sample straight to its classifier, bypassing the scheduler.
    /// Used by test harnesses that script samples per channel.
    pub fn inject(&mut self, sample: VoltageSample) -> EnergyDecision {
        let before = self.service.decision();
        let after = self.service.handle_sample(sample, &mut self.actuator, &mut self.sink);
        self.diagnostics.record_sample(sample, before, after);
        after
    }

    /// Dispatch everything pending in `queue`, in FIFO order.
    pub fn run_pending(&mut self, queue: &mut EventQueue) {
        queue.drain(|event| {
            self.dispatch(event);
        });
    }

    /// Dispatch everything the consumer half currently holds, in FIFO
    /// order, while the producer half stays with the interrupt handlers.
    /// Returns the number of events dispatched.
    pub fn run_pending_from(&mut self, rx: &mut EventConsumer<'_>) -> usize {
        let mut dispatched = 0;
        while let Some(event) = rx.dequeue() {
            self.dispatch(event);
            dispatched += 1;
        }
        dispatched
    }

    // ── Accessors ─────────────────────────────────────────────

    pub fn service(&self) -> &EnergyService {
        &self.service
    }

    pub fn decision(&self) -> EnergyDecision {
        self.service.decision()
    }

    /// Channel the next conversion will be taken on.
    pub fn next_channel(&self) -> Channel {
        self.scheduler.current()
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn adc(&self) -> &A {
        &self.adc
    }

    pub fn adc_mut(&mut self) -> &mut A {
        &mut self.adc
    }

    pub fn actuator(&self) -> &H {
        &self.actuator
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}
