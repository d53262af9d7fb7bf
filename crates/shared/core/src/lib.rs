//! Timewarp Core Domain
//!
//! Pure value types for the timewarp virtual clock.
//! This crate contains no locking, no channels, and is 100% unit testable.

pub mod values;

// Re-export commonly used types at crate root
pub use values::{CalendarOffset, Duration, MomentId, Timestamp};
