use crossbeam_channel::{Receiver, Sender};
use log::trace;
use timewarp_core::{MomentId, Timestamp};

use crate::moment::Fire;
use crate::moment_set::MomentSet;

/// Clock state, only ever touched with the clock lock held
///
/// This is the internal scheduling API handed to firing moments. Nothing in
/// here locks, so a [`Fire`] implementation may call any of it.
pub(crate) struct Schedule {
    now: Timestamp,
    next_id: MomentId,
    moments: MomentSet,
    observers: Vec<Sender<()>>,
}

impl Schedule {
    pub fn new(now: Timestamp) -> Self {
        Self {
            now,
            next_id: MomentId::FIRST,
            moments: MomentSet::new(),
            observers: Vec::new(),
        }
    }

    pub fn now(&self) -> Timestamp {
        self.now
    }

    pub fn pending(&self) -> usize {
        self.moments.len()
    }

    pub fn next_deadline(&self) -> Option<Timestamp> {
        self.moments.next_deadline()
    }

    pub fn deadline_of(&self, id: MomentId) -> Option<Timestamp> {
        self.moments.deadline(id)
    }

    /// Registers a new moment and wakes every observer
    pub fn plan(&mut self, deadline: Timestamp, action: Box<dyn Fire>) -> MomentId {
        let id = self.next_id;
        self.next_id = id.next();
        self.moments.insert(id, deadline, action);
        trace!("planned {} at {}", id, deadline);
        self.notify_observers();
        id
    }

    /// Moves a still-pending moment to `deadline`
    ///
    /// Returns false, and changes nothing, when `id` already fired or was
    /// cancelled.
    pub fn replan(&mut self, id: MomentId, deadline: Timestamp) -> bool {
        if !self.moments.reschedule(id, deadline) {
            return false;
        }
        trace!("replanned {} at {}", id, deadline);
        self.notify_observers();
        true
    }

    pub fn cancel(&mut self, id: MomentId) -> bool {
        let removed = self.moments.remove(id);
        if removed {
            trace!("cancelled {}", id);
        }
        removed
    }

    /// Sets the current time and fires everything due by then
    ///
    /// Moments planned by the fired actions are not looked at again in this
    /// pass, even when already due. Returns how many moments fired.
    pub fn advance_to(&mut self, now: Timestamp) -> usize {
        self.now = now;
        let due = self.moments.take_due(now);
        let fired = due.len();
        for moment in due {
            moment.fire(self);
        }
        fired
    }

    /// One-shot signal that disconnects on the next scheduling event
    pub fn observe(&mut self) -> Receiver<()> {
        let (tx, rx) = crossbeam_channel::bounded(0);
        self.observers.push(tx);
        rx
    }

    fn notify_observers(&mut self) {
        if !self.observers.is_empty() {
            trace!("waking {} observer(s)", self.observers.len());
            // Dropping the senders closes every signal
            self.observers.clear();
        }
    }
}
