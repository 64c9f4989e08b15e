//! EnergyService → ports: what reaches the actuator and the event sink.

use backup_power::app::events::AppEvent;
use backup_power::app::ports::NullSink;
use backup_power::{
    AccumulatorState, Channel, EnergyConfig, EnergyDecision, EnergyService, LoadState, SupplyState, VoltageSample,
};

use crate::mock_hw::{MockActuator, RecordingSink};

fn started() -> (EnergyService, MockActuator, RecordingSink) {
    let mut svc = EnergyService::new(&EnergyConfig::default()).unwrap();
    let mut hw = MockActuator::new();
    let mut sink = RecordingSink::new();
    svc.start(&mut hw, &mut sink);
    (svc, hw, sink)
}

#[test]
fn start_announces_and_applies_initial_decision() {
    let (_svc, hw, sink) = started();
    let initial = EnergyDecision { usable: true, ..EnergyDecision::default() };
    assert_eq!(hw.applied, [initial]);
    assert_eq!(sink.events, [AppEvent::Initialized(initial)]);
}

#[test]
fn every_sample_reaches_the_actuator() {
    let (mut svc, mut hw, mut sink) = started();
    for raw in [100, 100, 100] {
        svc.handle_sample(VoltageSample::new(Channel::Accumulator, raw), &mut hw, &mut sink);
    }
    // Unchanged decisions are still applied.
    assert_eq!(hw.applied.len(), 4);
    assert_eq!(sink.events.len(), 1);
}

#[test]
fn outage_sequence_emits_each_transition() {
    let (mut svc, mut hw, mut sink) = started();
    sink.events.clear();

    svc.handle_sample(VoltageSample::new(Channel::Supply, 150), &mut hw, &mut sink);
    svc.handle_sample(VoltageSample::new(Channel::Load, 250), &mut hw, &mut sink);
    svc.handle_sample(VoltageSample::new(Channel::Supply, 220), &mut hw, &mut sink);

    let kinds: Vec<&'static str> = sink
        .events
        .iter()
        .map(|e| match e {
            AppEvent::Initialized(_) => "init",
            AppEvent::AccumulatorChanged { .. } => "accumulator",
            AppEvent::SupplyChanged { .. } => "supply",
            AppEvent::LoadChanged { .. } => "load",
            AppEvent::LoadReactivated => "reactivated",
            AppEvent::DecisionChanged { .. } => "decision",
        })
        .collect();
    assert_eq!(
        kinds,
        ["supply", "decision", "load", "decision", "supply", "reactivated", "decision"]
    );
    assert_eq!(svc.load_state(), LoadState::ProbablyActive);
    assert_eq!(hw.last(), Some(EnergyDecision { usable: true, ..EnergyDecision::default() }));
}

#[test]
fn absent_accumulator_under_outage_is_isolated() {
    let (mut svc, mut hw, mut sink) = started();
    svc.handle_sample(VoltageSample::new(Channel::Supply, 0), &mut hw, &mut sink);
    let d = svc.handle_sample(VoltageSample::new(Channel::Accumulator, 0), &mut hw, &mut sink);
    assert_eq!(svc.accumulator_state(), AccumulatorState::Absent);
    assert_eq!(svc.supply_state(), SupplyState::Failing);
    assert_eq!(d, EnergyDecision { should_isolate: true, ..EnergyDecision::default() });
}

#[test]
fn independent_instances_do_not_share_state() {
    let mut a = EnergyService::with_defaults();
    let b = EnergyService::with_defaults();
    a.handle_sample(VoltageSample::new(Channel::Supply, 0), &mut NullSink, &mut NullSink);
    assert_eq!(a.supply_state(), SupplyState::Failing);
    assert_eq!(b.supply_state(), SupplyState::Present);
}

#[test]
fn custom_thresholds_are_honoured() {
    let mut config = EnergyConfig::default();
    config.load.inactive_above = 200;
    let mut svc = EnergyService::new(&config).unwrap();
    assert_eq!(svc.update_load(201), LoadState::Inactive);
}
