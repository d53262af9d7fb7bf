use chrono::Utc;
use timewarp_core::Timestamp;
use timewarp_ports::Clock;

/// Real system clock for production use
///
/// This simply returns the current wall-clock time, so code written against
/// the [`Clock`] port can run on real time and be driven by a
/// [`VirtualClock`](crate::VirtualClock) in tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Utc::now()
    }

    fn name(&self) -> &str {
        "SystemClock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::VirtualClock;
    use chrono::{Duration, TimeZone};
    use std::thread;

    #[test]
    fn test_system_clock_follows_wall_time() {
        let clock = SystemClock;
        let start = clock.now();
        thread::sleep(std::time::Duration::from_millis(10));

        assert!(clock.elapsed_since(start) >= Duration::milliseconds(9));
        assert_eq!(clock.name(), "SystemClock");
    }

    #[test]
    fn test_port_is_interchangeable() {
        fn expired(clock: &dyn Clock, since: Timestamp, ttl: Duration) -> bool {
            clock.elapsed_since(since) >= ttl
        }

        let start = Utc.with_ymd_and_hms(2049, 5, 6, 0, 0, 0).unwrap();
        let ttl = Duration::seconds(30);
        let virtual_clock = VirtualClock::new(start);

        virtual_clock.travel(Duration::seconds(29));
        assert!(!expired(&virtual_clock, start, ttl));
        virtual_clock.travel(Duration::seconds(1));
        assert!(expired(&virtual_clock, start, ttl));
        assert_eq!(virtual_clock.now_millis(), start.timestamp_millis() + 30_000);

        assert!(expired(&SystemClock, Utc::now() - Duration::hours(1), ttl));
    }
}
