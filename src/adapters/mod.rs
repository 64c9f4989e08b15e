//! Adapters: concrete implementations of the port traits.
//!
//! | Adapter        | Implements    | Connects to                 |
//! |----------------|---------------|-----------------------------|
//! | `log_sink`     | EventSink     | `log` facade / serial       |
//! | `pin_actuator` | ActuatorPort  | `embedded-hal` output pins  |

pub mod log_sink;
pub mod pin_actuator;
