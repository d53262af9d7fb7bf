//! Timewarp Ports
//!
//! Port definitions (traits) for the timewarp virtual clock.
//! These define the boundary between time-dependent code and its time source.

mod clock;
mod error;

pub use clock::Clock;
pub use error::{ClockError, ClockResult};
