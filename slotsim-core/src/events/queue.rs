//! Future event queue with deterministic ordering.
//!
//! Pending transitions are kept in a `BTreeMap` keyed by [`EventKey`], so
//! popping is always the smallest key. Events are ordered by:
//! 1. Fire time (earlier first)
//! 2. Phase (`Back` before `Front` at the same instant)
//! 3. Sequence number (FIFO among same time and phase)

use std::cmp::Ordering;
use std::collections::BTreeMap;

use super::{PendingEvent, Phase, Transition};
use crate::time::SimTime;

/// Key for ordering events in the queue.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct EventKey {
    /// When this event should fire.
    pub time: SimTime,
    /// Tie class at the same instant.
    pub phase: Phase,
    /// Insertion counter for FIFO ordering.
    pub sequence: u64,
}

impl Ord for EventKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match self.time.cmp(&other.time) {
            Ordering::Equal => {}
            ord => return ord,
        }

        match self.phase.cmp(&other.phase) {
            Ordering::Equal => {}
            ord => return ord,
        }

        self.sequence.cmp(&other.sequence)
    }
}

impl PartialOrd for EventKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Ordered set of pending transitions. Exclusively owns every pending event.
#[derive(Debug, Default)]
pub struct FutureEventQueue {
    events: BTreeMap<EventKey, Transition>,
    sequence: u64,
}

impl FutureEventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `transition` to fire at `time`.
    pub fn schedule(&mut self, time: SimTime, transition: Transition) {
        self.sequence += 1;
        let key = EventKey {
            time,
            phase: transition.phase,
            sequence: self.sequence,
        };
        self.events.insert(key, transition);
    }

    /// Removes and returns the earliest pending event.
    ///
    /// Returns `None` once the queue is empty; the driver reports that as an
    /// exhausted run rather than an error.
    pub fn pop_next(&mut self) -> Option<PendingEvent> {
        self.events
            .pop_first()
            .map(|(key, transition)| PendingEvent {
                fire_time: key.time,
                transition,
            })
    }

    /// Fire time of the earliest pending event, if any.
    pub fn peek_time(&self) -> Option<SimTime> {
        self.events.first_key_value().map(|(key, _)| key.time)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::Role;
    use proptest::prelude::*;

    fn t(v: f64) -> SimTime {
        SimTime::new(v)
    }

    #[test]
    fn pops_in_time_order() {
        let mut queue = FutureEventQueue::new();
        queue.schedule(t(3.0), Transition::front(Role::Producer));
        queue.schedule(t(1.0), Transition::front(Role::Consumer));
        queue.schedule(t(2.0), Transition::back(Role::Producer));

        let times: Vec<f64> = std::iter::from_fn(|| queue.pop_next())
            .map(|e| e.fire_time.as_f64())
            .collect();
        assert_eq!(times, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn back_inserted_later_still_pops_first_at_same_time() {
        let mut queue = FutureEventQueue::new();
        queue.schedule(t(4.0), Transition::front(Role::Consumer));
        queue.schedule(t(4.0), Transition::front(Role::Producer));
        queue.schedule(t(4.0), Transition::back(Role::Producer));

        assert_eq!(
            queue.pop_next().map(|e| e.transition),
            Some(Transition::back(Role::Producer))
        );
        // Fronts keep their insertion order.
        assert_eq!(
            queue.pop_next().map(|e| e.transition),
            Some(Transition::front(Role::Consumer))
        );
        assert_eq!(
            queue.pop_next().map(|e| e.transition),
            Some(Transition::front(Role::Producer))
        );
    }

    #[test]
    fn empty_queue_signals_exhaustion() {
        let mut queue = FutureEventQueue::new();
        assert!(queue.is_empty());
        assert_eq!(queue.peek_time(), None);
        assert_eq!(queue.pop_next(), None);

        queue.schedule(t(0.0), Transition::front(Role::Producer));
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.peek_time(), Some(t(0.0)));
        assert!(queue.pop_next().is_some());
        assert_eq!(queue.pop_next(), None);
    }

    fn arb_transition() -> impl Strategy<Value = Transition> {
        (any::<bool>(), any::<bool>()).prop_map(|(producer, back)| {
            let role = if producer { Role::Producer } else { Role::Consumer };
            if back {
                Transition::back(role)
            } else {
                Transition::front(role)
            }
        })
    }

    proptest! {
        #[test]
        fn pop_order_is_non_decreasing_with_backs_first(
            events in prop::collection::vec((0u8..8, arb_transition()), 1..64)
        ) {
            let mut queue = FutureEventQueue::new();
            for (slot, transition) in &events {
                queue.schedule(t(f64::from(*slot) * 0.5), *transition);
            }

            let mut popped = Vec::new();
            while let Some(event) = queue.pop_next() {
                popped.push(event);
            }
            prop_assert_eq!(popped.len(), events.len());

            for pair in popped.windows(2) {
                prop_assert!(pair[0].fire_time <= pair[1].fire_time);
                if pair[0].fire_time == pair[1].fire_time {
                    prop_assert!(pair[0].transition.phase <= pair[1].transition.phase);
                }
            }
        }
    }
}
