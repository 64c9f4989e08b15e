//! Fuzz target: `EnergyRuntime::dispatch`
//!
//! Interprets the input as a stream of interrupt events (even byte: timer
//! tick, odd byte followed by a value: conversion complete) and checks the
//! runtime never panics and never publishes a contradictory decision.
//!
//! cargo fuzz run fuzz_event_stream

#![no_main]

use backup_power::app::ports::{AdcPort, NullSink};
use backup_power::events::Event;
use backup_power::publish::DecisionCell;
use backup_power::{Channel, EnergyConfig, EnergyRuntime};
use libfuzzer_sys::fuzz_target;

struct Adc;

impl AdcPort for Adc {
    fn start_conversion(&mut self, _channel: Channel) {}
}

fuzz_target!(|data: &[u8]| {
    let cell = DecisionCell::new();
    let Ok(mut rt) = EnergyRuntime::new(&EnergyConfig::default(), Adc, &cell, NullSink) else {
        return;
    };
    rt.start();

    let mut bytes = data.iter().copied();
    while let Some(b) = bytes.next() {
        let event = if b % 2 == 0 {
            Event::TimerElapsed
        } else {
            Event::ConversionComplete(bytes.next().unwrap_or(b))
        };
        rt.dispatch(event);

        let d = cell.load();
        assert_eq!(d, rt.decision());
        assert!(!(d.should_solicit && d.should_isolate));
        assert!(!(d.should_charge && d.should_isolate));
    }

    let diag = rt.diagnostics();
    assert!(diag.decision_changes() <= diag.total_samples());
});
