use crossbeam_channel::{Receiver, Sender};
use log::debug;
use parking_lot::Mutex;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use timewarp_core::{Duration, MomentId, Timestamp};

use crate::moment::Fire;
use crate::schedule::Schedule;
use crate::virtual_clock::VirtualClock;

/// Periodic ticker on a [`VirtualClock`]
///
/// Each fire delivers its due time and immediately re-arms for the time the
/// clock was moved to plus the current interval. Overshooting a deadline
/// therefore shifts every later tick by the same amount.
///
/// Re-arming happens while the clock lock is held, so exactly one fire is
/// pending while the ticker runs, even against concurrent [`reset`](Self::reset)
/// calls. The flip side: if the previous tick is still unread the fire blocks
/// on the channel, stalling the whole clock until it is received. Drain the
/// channel between clock moves.
///
/// Dropping every receiver of the channel ends the ticker at its next fire.
pub struct Ticker {
    clock: VirtualClock,
    rx: Receiver<Timestamp>,
    state: Arc<TickerState>,
}

/// Shared between the handle and its pending moment
///
/// `moment` is only written with the clock lock held; `interval` is only
/// locked after the clock lock.
struct TickerState {
    tx: Sender<Timestamp>,
    interval: Mutex<Duration>,
    moment: AtomicU64,
}

impl TickerState {
    fn moment(&self) -> MomentId {
        MomentId::from_raw(self.moment.load(Ordering::SeqCst))
    }

    fn set_moment(&self, id: MomentId) {
        self.moment.store(id.as_u64(), Ordering::SeqCst);
    }
}

/// The ticker's pending moment
struct Tick {
    state: Arc<TickerState>,
}

impl Fire for Tick {
    fn fire(self: Box<Self>, schedule: &mut Schedule, due: Timestamp) {
        if self.state.tx.send(due).is_err() {
            debug!("ticker channel closed, not re-arming after {}", due);
            return;
        }
        let interval = *self.state.interval.lock();
        let next = schedule.now() + interval;
        let state = Arc::clone(&self.state);
        let id = schedule.plan(next, self);
        state.set_moment(id);
    }
}

impl Ticker {
    pub(crate) fn start(clock: VirtualClock, interval: Duration) -> Self {
        let (tx, rx) = crossbeam_channel::bounded(1);
        let state = Arc::new(TickerState {
            tx,
            interval: Mutex::new(interval),
            moment: AtomicU64::new(MomentId::FIRST.as_u64()),
        });
        {
            let mut schedule = clock.lock();
            let deadline = schedule.now() + interval;
            let id = schedule.plan(
                deadline,
                Box::new(Tick {
                    state: Arc::clone(&state),
                }),
            );
            state.set_moment(id);
        }
        Self { clock, rx, state }
    }

    /// Same receiver for the whole life of the ticker
    pub fn channel(&self) -> &Receiver<Timestamp> {
        &self.rx
    }

    /// Interval used by the next re-arm
    pub fn interval(&self) -> Duration {
        *self.state.interval.lock()
    }

    /// Due time of the pending tick; `None` while stopped
    pub fn next_tick(&self) -> Option<Timestamp> {
        self.clock.lock().deadline_of(self.state.moment())
    }

    /// Cancel the pending tick, if any
    pub fn stop(&self) {
        self.clock.lock().cancel(self.state.moment());
    }

    /// Switch to `interval` and fire next at `now + interval`
    ///
    /// Restarts a stopped ticker. Unread ticks stay in the channel.
    pub fn reset(&self, interval: Duration) {
        let mut schedule = self.clock.lock();
        *self.state.interval.lock() = interval;
        let deadline = schedule.now() + interval;
        if !schedule.replan(self.state.moment(), deadline) {
            let id = schedule.plan(
                deadline,
                Box::new(Tick {
                    state: Arc::clone(&self.state),
                }),
            );
            self.state.set_moment(id);
        }
    }
}
