use chrono::Utc;
use crossbeam_channel::Receiver;
use log::debug;
use parking_lot::{Mutex, MutexGuard};
use std::fmt;
use std::sync::Arc;
use timewarp_core::{CalendarOffset, Duration, Timestamp};
use timewarp_ports::{Clock, ClockError, ClockResult};

use crate::config::ClockConfig;
use crate::moment::Deliver;
use crate::observer::Observer;
use crate::schedule::Schedule;
use crate::ticker::Ticker;
use crate::timer::Timer;

/// Virtual clock - time only moves when told to
///
/// Owns the current simulated time and every pending moment. Moving the clock
/// with [`set`](Self::set), [`travel`](Self::travel) or
/// [`travel_by_calendar_offset`](Self::travel_by_calendar_offset) fires all
/// moments due by the new time before the call returns, earliest deadline
/// first and, on ties, in registration order.
///
/// ```text
///  travel(d) ──► lock ──► now += d ──► take due ──► fire in order ──► unlock
///                                                    │
///                                  ticker re-arm ◄───┘ (lock-held API)
/// ```
///
/// Cloning is cheap and every clone drives the same timeline. All methods are
/// thread-safe; each one is a single critical section.
///
/// # Liveness
///
/// Moments fire with the clock lock held. A timer or ticker whose channel
/// still holds an unread value blocks inside its fire until that value is
/// received, and every other clock call waits meanwhile. Drain channels
/// promptly; receiving on a channel from the same thread that moves the clock
/// is fine as long as it happens between moves.
#[derive(Clone)]
pub struct VirtualClock {
    inner: Arc<ClockInner>,
}

struct ClockInner {
    name: String,
    schedule: Mutex<Schedule>,
}

impl VirtualClock {
    /// Create a clock frozen at `start`
    pub fn new(start: Timestamp) -> Self {
        Self::with_config(ClockConfig::starting_at(start))
    }

    /// Create a clock from configuration
    ///
    /// Without a configured start the clock freezes at the current wall time.
    pub fn with_config(config: ClockConfig) -> Self {
        let start = config.start.unwrap_or_else(Utc::now);
        debug!("{} starting at {}", config.name, start);
        Self {
            inner: Arc::new(ClockInner {
                name: config.name,
                schedule: Mutex::new(Schedule::new(start)),
            }),
        }
    }

    pub(crate) fn lock(&self) -> MutexGuard<'_, Schedule> {
        self.inner.schedule.lock()
    }

    /// Current simulated time
    pub fn now(&self) -> Timestamp {
        self.lock().now()
    }

    /// Number of moments waiting for the clock to reach them
    pub fn pending(&self) -> usize {
        self.lock().pending()
    }

    /// Earliest pending deadline, if any
    pub fn next_deadline(&self) -> Option<Timestamp> {
        self.lock().next_deadline()
    }

    /// Jump to `time`, forward or backward, firing everything due by then
    pub fn set(&self, time: Timestamp) {
        let mut schedule = self.lock();
        let fired = schedule.advance_to(time);
        debug!("{} set to {} ({} fired)", self.inner.name, time, fired);
    }

    /// Move by `duration` (negative travels to the past) and return the new time
    ///
    /// # Panics
    ///
    /// If the new time overflows [`Timestamp`].
    pub fn travel(&self, duration: Duration) -> Timestamp {
        let mut schedule = self.lock();
        let target = schedule.now() + duration;
        let fired = schedule.advance_to(target);
        debug!(
            "{} travelled {} to {} ({} fired)",
            self.inner.name, duration, target, fired
        );
        target
    }

    /// Move by a calendar offset and return the new time
    ///
    /// Years and months are applied first, clamping the day of month to the
    /// end of a shorter month, then days. On error the clock is untouched.
    pub fn travel_by_calendar_offset(
        &self,
        years: i32,
        months: i32,
        days: i32,
    ) -> ClockResult<Timestamp> {
        let offset = CalendarOffset::new(years, months, days);
        let mut schedule = self.lock();
        let from = schedule.now();
        let target = offset
            .apply(from)
            .ok_or(ClockError::CalendarOutOfRange { from, offset })?;
        let fired = schedule.advance_to(target);
        debug!(
            "{} travelled {} to {} ({} fired)",
            self.inner.name, offset, target, fired
        );
        Ok(target)
    }

    /// Channel that receives the due time once the clock reaches `now + duration`
    ///
    /// # Panics
    ///
    /// If the deadline overflows [`Timestamp`].
    pub fn after(&self, duration: Duration) -> Receiver<Timestamp> {
        let (tx, rx) = crossbeam_channel::bounded(1);
        let mut schedule = self.lock();
        let deadline = schedule.now() + duration;
        schedule.plan(deadline, Deliver::new(tx));
        rx
    }

    /// Block the calling thread until another thread moves the clock past
    /// `now + duration`
    pub fn sleep(&self, duration: Duration) {
        // Nothing can cancel this moment, so recv returns once it fires
        let _ = self.after(duration).recv();
    }

    /// One-shot timer firing at `now + duration`
    pub fn timer(&self, duration: Duration) -> Timer {
        Timer::start(self.clone(), duration)
    }

    /// Periodic ticker, first firing at `now + duration`
    pub fn ticker(&self, duration: Duration) -> Ticker {
        Ticker::start(self.clone(), duration)
    }

    /// Signal raised by the next scheduling event after this call
    pub fn observe(&self) -> Observer {
        Observer::new(self.lock().observe())
    }
}

impl Default for VirtualClock {
    fn default() -> Self {
        Self::with_config(ClockConfig::default())
    }
}

impl Clock for VirtualClock {
    fn now(&self) -> Timestamp {
        VirtualClock::now(self)
    }

    fn name(&self) -> &str {
        &self.inner.name
    }
}

impl fmt::Debug for VirtualClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VirtualClock")
            .field("name", &self.inner.name)
            .finish_non_exhaustive()
    }
}
