//! Round-robin voltage sample scheduler.
//!
//! One conversion resource, three rails.  The scheduler owns the channel
//! cursor and serialises access to the converter:
//!
//! ```text
//!   timer event ──▶ on_timer()  ──▶ AdcPort::start_conversion(current)
//!                                          │
//!   ADC complete ──▶ on_conversion_complete(raw)
//!                        │  sample = (current, raw)
//!                        │  cursor  = next in fixed order
//!                        ▼
//!                  EnergyService::handle_sample(sample)
//!
//!   default order:  Accumulator ─▶ Load ─▶ Supply ─▶ Accumulator ─▶ …
//! ```
//!
//! The order is fixed at construction and never depends on sample values.
//! A timer event that arrives while a conversion is still outstanding is
//! dropped, so two conversions are never in flight at once.

use log::{debug, trace};

use crate::app::ports::AdcPort;
use crate::config::SamplingConfig;
use crate::sensors::{Channel, VoltageSample};

pub struct SampleScheduler {
    order: [Channel; Channel::COUNT],
    cursor: usize,
    /// Channel of the conversion in flight, if any.
    pending: Option<Channel>,
}

impl SampleScheduler {
    pub fn new(config: &SamplingConfig) -> Self {
        Self {
            order: config.channel_order,
            cursor: 0,
            pending: None,
        }
    }

    /// Channel the next conversion will be (or is being) taken on.
    pub fn current(&self) -> Channel {
        self.order[self.cursor]
    }

    pub fn order(&self) -> [Channel; Channel::COUNT] {
        self.order
    }

    pub fn is_converting(&self) -> bool {
        self.pending.is_some()
    }

    /// Periodic timing event.  Starts a conversion on the current channel
    /// and returns it, or returns `None` if one is already outstanding.
    pub fn on_timer(&mut self, adc: &mut impl AdcPort) -> Option<Channel> {
        if let Some(busy) = self.pending {
            debug!("timer tick dropped: conversion on {busy} still outstanding");
            return None;
        }
        let channel = self.current();
        adc.start_conversion(channel);
        self.pending = Some(channel);
        Some(channel)
    }

    /// Conversion-complete event.  Tags `raw` with the current channel and
    /// advances the cursor.
    pub fn on_conversion_complete(&mut self, raw: u8) -> VoltageSample {
        let channel = self.current();
        if self.pending.take().is_none() {
            debug!("conversion complete without request, attributed to {channel}");
        }
        trace!("sample {channel}={raw}");
        self.cursor = (self.cursor + 1) % Channel::COUNT;
        VoltageSample::new(channel, raw)
    }

    /// Back to the first channel with nothing in flight.
    pub fn reset(&mut self) {
        self.cursor = 0;
        self.pending = None;
    }
}
