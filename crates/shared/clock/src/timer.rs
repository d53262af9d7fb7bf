use crossbeam_channel::{Receiver, Sender};
use std::sync::atomic::{AtomicU64, Ordering};
use timewarp_core::{Duration, MomentId, Timestamp};

use crate::moment::Deliver;
use crate::virtual_clock::VirtualClock;

/// One-shot timer on a [`VirtualClock`]
///
/// Delivers its due time on [`channel`](Self::channel) once the clock reaches
/// it. At most one fire is ever pending: [`reset`](Self::reset) moves it
/// rather than adding another.
///
/// The channel holds one value. If a reset timer fires again before the
/// previous value was received, the clock blocks until it is.
pub struct Timer {
    clock: VirtualClock,
    tx: Sender<Timestamp>,
    rx: Receiver<Timestamp>,
    /// Last moment registered for this timer; may have fired since
    moment: AtomicU64,
}

impl Timer {
    pub(crate) fn start(clock: VirtualClock, duration: Duration) -> Self {
        let (tx, rx) = crossbeam_channel::bounded(1);
        let moment = {
            let mut schedule = clock.lock();
            let deadline = schedule.now() + duration;
            schedule.plan(deadline, Deliver::new(tx.clone()))
        };
        Self {
            clock,
            tx,
            rx,
            moment: AtomicU64::new(moment.as_u64()),
        }
    }

    fn moment(&self) -> MomentId {
        MomentId::from_raw(self.moment.load(Ordering::SeqCst))
    }

    /// Same receiver for the whole life of the timer
    pub fn channel(&self) -> &Receiver<Timestamp> {
        &self.rx
    }

    /// Deadline of the pending fire; `None` once fired or stopped
    pub fn deadline(&self) -> Option<Timestamp> {
        self.clock.lock().deadline_of(self.moment())
    }

    /// Cancel the pending fire
    ///
    /// Returns true if a fire was pending and is now cancelled, false if the
    /// timer already fired or was already stopped.
    pub fn stop(&self) -> bool {
        self.clock.lock().cancel(self.moment())
    }

    /// Re-arm for `now + duration`, whether or not the timer already fired
    ///
    /// A pending fire is moved in place; otherwise a new one is registered
    /// on the same channel. An unread value stays in the channel.
    pub fn reset(&self, duration: Duration) {
        let mut schedule = self.clock.lock();
        let deadline = schedule.now() + duration;
        if !schedule.replan(self.moment(), deadline) {
            let id = schedule.plan(deadline, Deliver::new(self.tx.clone()));
            self.moment.store(id.as_u64(), Ordering::SeqCst);
        }
    }
}
