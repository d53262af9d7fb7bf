use timewarp_core::{Duration, Timestamp};

/// Port for time abstraction
///
/// Time-dependent code takes a `Clock` instead of reading the wall clock, so
/// production runs on real time and tests move a virtual clock explicitly.
pub trait Clock: Send + Sync {
    /// Get the current time according to this clock
    fn now(&self) -> Timestamp;

    /// Get the clock's name/identifier for debugging
    fn name(&self) -> &str {
        "Clock"
    }

    /// Time passed since `since`; negative if `since` lies ahead
    fn elapsed_since(&self, since: Timestamp) -> Duration {
        self.now() - since
    }

    /// Get current time as milliseconds since Unix epoch
    fn now_millis(&self) -> i64 {
        self.now().timestamp_millis()
    }
}
