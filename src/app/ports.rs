//! Port traits: the boundary between the energy core and the hardware.
//!
//! ```text
//!   AdcPort ◀── SampleScheduler        EnergyService ──▶ ActuatorPort
//!                                                  └──▶ EventSink
//! ```
//!
//! Adapters (real peripherals, simulation, test recorders) implement these
//! traits.  The core consumes them via generics and never touches
//! registers directly.

use crate::policy::EnergyDecision;
use crate::sensors::Channel;

// ───────────────────────────────────────────────────────────────
// Conversion port (domain → shared ADC)
// ───────────────────────────────────────────────────────────────

/// The single, shared analog-to-digital conversion resource.
///
/// The scheduler guarantees at most one conversion is outstanding; the
/// result comes back later as a conversion-complete event.
pub trait AdcPort {
    /// Select `channel` and start a conversion.
    fn start_conversion(&mut self, channel: Channel);
}

// ───────────────────────────────────────────────────────────────
// Actuator port (domain → outputs)
// ───────────────────────────────────────────────────────────────

/// Consumer of the decision record.  Called after every recompute, whether
/// or not the decision changed.
pub trait ActuatorPort {
    fn apply(&mut self, decision: &EnergyDecision);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (domain → logging / telemetry)
// ───────────────────────────────────────────────────────────────

/// The core emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}

/// Sink that drops everything.
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&mut self, _event: &super::events::AppEvent) {}
}

impl ActuatorPort for NullSink {
    fn apply(&mut self, _decision: &EnergyDecision) {}
}

/// Fan a decision out to two actuators, in order.
impl<A: ActuatorPort, B: ActuatorPort> ActuatorPort for (A, B) {
    fn apply(&mut self, decision: &EnergyDecision) {
        self.0.apply(decision);
        self.1.apply(decision);
    }
}

impl<T: ActuatorPort + ?Sized> ActuatorPort for &mut T {
    fn apply(&mut self, decision: &EnergyDecision) {
        (**self).apply(decision);
    }
}

impl<T: EventSink + ?Sized> EventSink for &mut T {
    fn emit(&mut self, event: &super::events::AppEvent) {
        (**self).emit(event);
    }
}
