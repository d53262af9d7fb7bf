use crossbeam_channel::Sender;
use log::trace;
use timewarp_core::{MomentId, Timestamp};

use crate::schedule::Schedule;

/// Effect run when a moment comes due
///
/// Fired with the clock lock held: an implementation may only reschedule
/// through the [`Schedule`] it is handed, never through a [`VirtualClock`]
/// accessor, or the clock deadlocks.
///
/// [`VirtualClock`]: crate::VirtualClock
pub(crate) trait Fire: Send {
    /// `due` is the moment's deadline; `schedule.now()` is the time the clock
    /// was moved to.
    fn fire(self: Box<Self>, schedule: &mut Schedule, due: Timestamp);
}

/// A pending deadline and what to do when it is reached
pub(crate) struct Moment {
    pub id: MomentId,
    pub deadline: Timestamp,
    pub action: Box<dyn Fire>,
}

impl Moment {
    pub fn fire(self, schedule: &mut Schedule) {
        trace!("firing {} due at {}", self.id, self.deadline);
        self.action.fire(schedule, self.deadline);
    }
}

/// Sends the due time into a channel, once
///
/// Backs `after`, `sleep` and [`Timer`](crate::Timer). The send blocks while
/// the channel still holds an unread value.
pub(crate) struct Deliver {
    tx: Sender<Timestamp>,
}

impl Deliver {
    pub fn new(tx: Sender<Timestamp>) -> Box<Self> {
        Box::new(Self { tx })
    }
}

impl Fire for Deliver {
    fn fire(self: Box<Self>, _schedule: &mut Schedule, due: Timestamp) {
        if self.tx.send(due).is_err() {
            trace!("receiver for moment due at {} is gone", due);
        }
    }
}
