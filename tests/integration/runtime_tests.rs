//! Event queue → runtime → scheduler → service, as the firmware wires it.

use backup_power::config::{EnergyConfig, SamplingConfig};
use backup_power::events::{Event, EventQueue};
use backup_power::publish::DecisionCell;
use backup_power::{Channel, EnergyDecision, EnergyRuntime, SupplyState};

use crate::mock_hw::{MockActuator, MockAdc, RecordingSink};

type Runtime<H> = EnergyRuntime<MockAdc, H, RecordingSink>;

fn runtime(adc: MockAdc) -> Runtime<MockActuator> {
    let mut rt = EnergyRuntime::new(&EnergyConfig::default(), adc, MockActuator::new(), RecordingSink::new()).unwrap();
    rt.start();
    rt
}

/// One timer period: tick, then the converter answers.
fn cycle<H: backup_power::app::ports::ActuatorPort>(rt: &mut Runtime<H>, queue: &mut EventQueue) {
    queue.push(Event::TimerElapsed);
    rt.run_pending(queue);
    let raw = rt.adc().result();
    queue.push(Event::ConversionComplete(raw));
    rt.run_pending(queue);
}

#[test]
fn samples_rails_round_robin() {
    let mut rt = runtime(MockAdc::with_rails(100, 120, 220));
    let mut q = EventQueue::new();
    for _ in 0..6 {
        cycle(&mut rt, &mut q);
    }
    assert_eq!(
        rt.adc().requests,
        [
            Channel::Accumulator,
            Channel::Load,
            Channel::Supply,
            Channel::Accumulator,
            Channel::Load,
            Channel::Supply
        ]
    );
    for ch in Channel::ALL {
        assert_eq!(rt.diagnostics().samples(ch), 2);
    }
    // Initial apply plus one per sample.
    assert_eq!(rt.actuator().applied.len(), 7);
}

#[test]
fn outage_is_picked_up_within_one_round() {
    let mut rt = runtime(MockAdc::with_rails(100, 120, 220));
    let mut q = EventQueue::new();
    for _ in 0..3 {
        cycle(&mut rt, &mut q);
    }
    assert!(!rt.decision().should_solicit);

    rt.adc_mut().set(Channel::Supply, 150);
    for _ in 0..3 {
        cycle(&mut rt, &mut q);
    }
    assert_eq!(rt.service().supply_state(), SupplyState::Failing);
    assert!(rt.decision().should_solicit);
    assert_eq!(rt.diagnostics().decision_changes(), 1);
    let change = rt.diagnostics().last_change().copied().unwrap();
    assert_eq!(change.channel, Channel::Supply);
    assert_eq!(change.sample_index, 5);
}

#[test]
fn ticks_during_conversion_are_dropped() {
    let mut rt = runtime(MockAdc::with_rails(100, 120, 220));
    let mut q = EventQueue::new();
    q.push(Event::TimerElapsed);
    q.push(Event::TimerElapsed);
    q.push(Event::TimerElapsed);
    rt.run_pending(&mut q);
    assert_eq!(rt.adc().requests.len(), 1);
    assert_eq!(rt.diagnostics().dropped_ticks(), 2);

    q.push(Event::ConversionComplete(100));
    rt.run_pending(&mut q);
    assert_eq!(rt.next_channel(), Channel::Load);
}

#[test]
fn decision_cell_sees_every_update() {
    static CELL: DecisionCell = DecisionCell::new();
    let mut rt = EnergyRuntime::new(
        &EnergyConfig::default(),
        MockAdc::with_rails(100, 250, 150),
        (MockActuator::new(), &CELL),
        RecordingSink::new(),
    )
    .unwrap();
    rt.start();
    assert_eq!(CELL.load(), EnergyDecision { usable: true, ..EnergyDecision::default() });

    let mut q = EventQueue::new();
    for _ in 0..3 {
        cycle(&mut rt, &mut q);
    }
    // Load saturated, then supply failed: isolate, no solicit.
    let expected = EnergyDecision { usable: true, should_isolate: true, ..EnergyDecision::default() };
    assert_eq!(CELL.load(), expected);
    assert_eq!(rt.actuator().0.last(), Some(expected));
}

#[test]
fn custom_channel_order() {
    let config = EnergyConfig {
        sampling: SamplingConfig {
            channel_order: [Channel::Supply, Channel::Load, Channel::Accumulator],
            ..SamplingConfig::default()
        },
        ..EnergyConfig::default()
    };
    let mut rt = EnergyRuntime::new(&config, MockAdc::with_rails(100, 120, 150), MockActuator::new(), RecordingSink::new())
        .unwrap();
    rt.start();
    let mut q = EventQueue::new();
    cycle(&mut rt, &mut q);
    assert_eq!(rt.adc().requests, [Channel::Supply]);
    assert!(rt.decision().should_solicit);
}

#[test]
fn restart_rewinds_scheduler_and_states() {
    let mut rt = runtime(MockAdc::with_rails(0, 0, 0));
    let mut q = EventQueue::new();
    cycle(&mut rt, &mut q);
    cycle(&mut rt, &mut q);
    rt.start();
    assert_eq!(rt.next_channel(), Channel::Accumulator);
    assert_eq!(rt.decision(), EnergyDecision { usable: true, ..EnergyDecision::default() });
}

#[test]
fn split_queue_feeds_runtime_while_both_halves_live() {
    let mut rt = runtime(MockAdc::with_rails(100, 120, 150));
    let mut q = EventQueue::new();
    let (mut tx, mut rx) = q.split();

    for _ in 0..3 {
        tx.enqueue(Event::TimerElapsed).unwrap();
        assert_eq!(rt.run_pending_from(&mut rx), 1);
        let raw = rt.adc().result();
        tx.enqueue(Event::ConversionComplete(raw)).unwrap();
        assert_eq!(rt.run_pending_from(&mut rx), 1);
    }

    assert_eq!(rt.run_pending_from(&mut rx), 0);
    assert_eq!(rt.diagnostics().total_samples(), 3);
    assert_eq!(rt.service().supply_state(), SupplyState::Failing);
    assert!(rt.decision().should_solicit);
}

#[test]
fn producer_on_another_thread() {
    const CYCLES: usize = 200;

    let mut rt = runtime(MockAdc::with_rails(100, 120, 220));
    let mut q = EventQueue::new();
    let (mut tx, mut rx) = q.split();

    std::thread::scope(|s| {
        s.spawn(move || {
            for i in 0..CYCLES {
                for event in [Event::TimerElapsed, Event::ConversionComplete(if i % 3 == 2 { 150 } else { 100 })] {
                    while tx.enqueue(event).is_err() {
                        std::thread::yield_now();
                    }
                }
            }
        });

        let mut seen = 0;
        while seen < 2 * CYCLES {
            seen += rt.run_pending_from(&mut rx);
            std::thread::yield_now();
        }
    });

    assert_eq!(rt.diagnostics().total_samples(), CYCLES as u32);
    assert_eq!(rt.diagnostics().dropped_ticks(), 0);
    assert!(rt.decision().should_solicit);
}
