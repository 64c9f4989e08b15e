//! Fuzz target: `EnergyService` classifiers
//!
//! Each pair of input bytes is (channel selector, raw value).  After every
//! sample the stored decision must equal a fresh `decide` on the current
//! states.
//!
//! cargo fuzz run fuzz_sample_stream

#![no_main]

use backup_power::{Channel, EnergyService, decide};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mut svc = EnergyService::with_defaults();

    for pair in data.chunks_exact(2) {
        let raw = pair[1];
        match Channel::ALL[pair[0] as usize % Channel::COUNT] {
            Channel::Accumulator => {
                svc.update_accumulator(raw);
            }
            Channel::Load => {
                svc.update_load(raw);
            }
            Channel::Supply => {
                svc.update_supply(raw);
            }
        }
        let s = svc.snapshot();
        assert_eq!(s.decision, decide(s.accumulator, s.supply, s.load));
    }

    svc.initialize();
    assert_eq!(svc.snapshot(), EnergyService::with_defaults().snapshot());
});
