use priority_queue::PriorityQueue;
use std::cmp::Reverse;
use std::collections::HashMap;
use timewarp_core::{MomentId, Timestamp};

use crate::moment::{Fire, Moment};

/// Pending moments, ordered by deadline then by registration order
///
/// The queue key embeds the id, so two moments due at the same instant pop
/// in the order they were registered.
pub(crate) struct MomentSet {
    order: PriorityQueue<MomentId, Reverse<(Timestamp, MomentId)>>,
    actions: HashMap<MomentId, Box<dyn Fire>>,
}

impl MomentSet {
    pub fn new() -> Self {
        Self {
            order: PriorityQueue::new(),
            actions: HashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn deadline(&self, id: MomentId) -> Option<Timestamp> {
        self.order
            .get_priority(&id)
            .map(|Reverse((deadline, _))| *deadline)
    }

    /// Earliest pending deadline
    pub fn next_deadline(&self) -> Option<Timestamp> {
        self.order
            .peek()
            .map(|(_, Reverse((deadline, _)))| *deadline)
    }

    pub fn insert(&mut self, id: MomentId, deadline: Timestamp, action: Box<dyn Fire>) {
        self.order.push(id, Reverse((deadline, id)));
        self.actions.insert(id, action);
    }

    /// Returns false when nothing was pending under `id`
    pub fn remove(&mut self, id: MomentId) -> bool {
        self.order.remove(&id);
        self.actions.remove(&id).is_some()
    }

    /// Moves a pending moment to a new deadline, keeping its id and action
    pub fn reschedule(&mut self, id: MomentId, deadline: Timestamp) -> bool {
        self.order
            .change_priority(&id, Reverse((deadline, id)))
            .is_some()
    }

    /// Removes and returns every moment with `deadline <= now`, in firing order
    pub fn take_due(&mut self, now: Timestamp) -> Vec<Moment> {
        let mut due = Vec::new();
        while self
            .order
            .peek()
            .is_some_and(|(_, Reverse((deadline, _)))| *deadline <= now)
        {
            let Some((id, Reverse((deadline, _)))) = self.order.pop() else {
                break;
            };
            if let Some(action) = self.actions.remove(&id) {
                due.push(Moment {
                    id,
                    deadline,
                    action,
                });
            }
        }
        due
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::Schedule;
    use chrono::{Duration, TimeZone, Utc};

    struct Noop;

    impl Fire for Noop {
        fn fire(self: Box<Self>, _schedule: &mut Schedule, _due: Timestamp) {}
    }

    fn t0() -> Timestamp {
        Utc.with_ymd_and_hms(2049, 5, 6, 23, 55, 11).unwrap()
    }

    fn ids(moments: &[Moment]) -> Vec<u64> {
        moments.iter().map(|m| m.id.as_u64()).collect()
    }

    #[test]
    fn test_take_due_orders_by_deadline_then_id() {
        let mut set = MomentSet::new();
        set.insert(MomentId::from_raw(0), t0() + Duration::seconds(3), Box::new(Noop));
        set.insert(MomentId::from_raw(1), t0() + Duration::seconds(1), Box::new(Noop));
        set.insert(MomentId::from_raw(2), t0() + Duration::seconds(3), Box::new(Noop));
        set.insert(MomentId::from_raw(3), t0() + Duration::seconds(1), Box::new(Noop));

        let due = set.take_due(t0() + Duration::seconds(5));
        assert_eq!(ids(&due), vec![1, 3, 0, 2]);
        assert_eq!(set.len(), 0);
    }

    #[test]
    fn test_take_due_is_inclusive_and_leaves_future_moments() {
        let mut set = MomentSet::new();
        set.insert(MomentId::from_raw(0), t0() + Duration::seconds(1), Box::new(Noop));
        set.insert(MomentId::from_raw(1), t0() + Duration::seconds(2), Box::new(Noop));

        let due = set.take_due(t0() + Duration::seconds(1));
        assert_eq!(ids(&due), vec![0]);
        assert_eq!(due[0].deadline, t0() + Duration::seconds(1));
        assert!(set.deadline(MomentId::from_raw(1)).is_some());
        assert_eq!(set.next_deadline(), Some(t0() + Duration::seconds(2)));
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut set = MomentSet::new();
        let id = MomentId::from_raw(7);
        set.insert(id, t0(), Box::new(Noop));

        assert!(set.remove(id));
        assert!(!set.remove(id));
        assert!(set.take_due(t0()).is_empty());
    }

    #[test]
    fn test_reschedule_keeps_id() {
        let mut set = MomentSet::new();
        let id = MomentId::from_raw(0);
        set.insert(id, t0() + Duration::seconds(10), Box::new(Noop));

        assert!(set.reschedule(id, t0() + Duration::seconds(1)));
        assert_eq!(set.deadline(id), Some(t0() + Duration::seconds(1)));
        assert!(!set.reschedule(MomentId::from_raw(1), t0()));

        let due = set.take_due(t0() + Duration::seconds(1));
        assert_eq!(ids(&due), vec![0]);
    }
}
