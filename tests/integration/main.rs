//! Integration test driver for the `tests/integration/` submodules.
//!
//! Each `mod` below exercises one path through the crate against the
//! mock adapters in `mock_hw`.  Everything runs on the host.

mod mock_hw;
mod runtime_tests;
mod service_tests;
#[cfg(feature = "sim")]
mod sim_tests;
