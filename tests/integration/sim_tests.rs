//! Trace replay through the host simulator.

use backup_power::EnergyConfig;
use backup_power::sim::trace::parse_trace;
use backup_power::sim::{Simulator, replay, replay_file};

#[test]
fn charge_cycle_trace() {
    let trace = "\
        # accumulator charge cycle, decivolts at the rail\n\
        acc 42dv\nacc 39dv\nacc 36dv\nacc 35dv\nacc 39dv\nacc 42dv\n\
        acc 43dv\nacc 42dv\nacc 38dv\nacc 36dv\nacc 35dv\n";
    let charge: Vec<u8> = replay(trace).unwrap().iter().map(|d| d.should_charge as u8).collect();
    assert_eq!(charge, [0, 0, 0, 1, 1, 1, 0, 0, 0, 0, 1]);
}

#[test]
fn scheduler_driven_outage() {
    let steps = parse_trace(
        "rails 40dv 85dv 60dv\n\
         tick 3\n\
         rails 40dv 95dv 60dv\n\
         tick 3\n\
         rails 40dv 95dv 80dv\n\
         tick 3\n",
    )
    .unwrap();
    let mut sim = Simulator::new(&EnergyConfig::default()).unwrap();
    let out = sim.run(&steps);
    assert!(out[1].should_solicit);
    assert!(out[3].should_isolate && !out[3].should_solicit);
    // Supply back: charge nothing, the accumulator is full.
    assert_eq!(out[5], backup_power::EnergyDecision { usable: true, ..Default::default() });
    assert_eq!(sim.runtime().adc().conversions(), 9);
}

#[test]
fn trace_file_round_trip() {
    let path = std::env::temp_dir().join(format!("backup-power-trace-{}.txt", std::process::id()));
    std::fs::write(&path, "sup 150\nload 250\n").unwrap();
    let out = replay_file(&path).unwrap();
    std::fs::remove_file(&path).ok();
    assert!(out[0].should_solicit);
    assert!(out[1].should_isolate);
}

#[test]
fn bad_trace_reports_line() {
    let err = replay("acc 1\n\nbogus 2\n").unwrap_err();
    assert!(format!("{err:#}").contains("line 3"));
}
