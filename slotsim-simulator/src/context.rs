//! Explicit run state handed to every transition.
//!
//! The driver owns exactly one [`SimContext`] for the lifetime of a run and
//! lends it mutably to one transition at a time.

use slotsim_core::prelude::*;

pub struct SimContext {
    params: SimulationParameters,
    clock: VirtualClock,
    queue: FutureEventQueue,
    pub state: SharedQueueState,
    pub stats: RunStatistics,
    producer: Timeline,
    consumer: Timeline,
}

impl SimContext {
    pub fn new(params: SimulationParameters) -> Self {
        let state = SharedQueueState::new(params.capacity);
        Self {
            params,
            clock: VirtualClock::new(),
            queue: FutureEventQueue::new(),
            state,
            stats: RunStatistics::new(),
            producer: Timeline::new(),
            consumer: Timeline::new(),
        }
    }

    #[inline]
    pub fn params(&self) -> &SimulationParameters {
        &self.params
    }

    #[inline]
    pub fn now(&self) -> SimTime {
        self.clock.now()
    }

    #[inline]
    pub fn schedule(&mut self, at: SimTime, transition: Transition) {
        self.queue.schedule(at, transition);
    }

    pub fn timeline(&self, role: Role) -> &Timeline {
        match role {
            Role::Producer => &self.producer,
            Role::Consumer => &self.consumer,
        }
    }

    /// Appends to `role`'s timeline.
    pub fn record(&mut self, role: Role, start: SimTime, kind: RecordKind, duration: f64) {
        let timeline = match role {
            Role::Producer => &mut self.producer,
            Role::Consumer => &mut self.consumer,
        };
        timeline.push(start, kind, duration);
    }

    /// Per-item service time `W` of `role`.
    #[inline]
    pub fn service_time(&self, role: Role) -> f64 {
        match role {
            Role::Producer => self.params.wp,
            Role::Consumer => self.params.wc,
        }
    }

    /// Idle-wait `Y` of `role`.
    #[inline]
    pub fn idle_time(&self, role: Role) -> f64 {
        match role {
            Role::Producer => self.params.yp,
            Role::Consumer => self.params.yc,
        }
    }

    /// Cost `N` paid by `role` to wake its peer.
    #[inline]
    pub fn notify_cost(&self, role: Role) -> f64 {
        match role {
            Role::Producer => self.params.np,
            Role::Consumer => self.params.nc,
        }
    }

    /// Cost `S` paid by `role` to resume after being woken.
    #[inline]
    pub fn wake_cost(&self, role: Role) -> f64 {
        match role {
            Role::Producer => self.params.sp,
            Role::Consumer => self.params.sc,
        }
    }

    /// Whether enough work has piled up for a halted `role` to be worth waking.
    ///
    /// The consumer is woken once `Kc` items are queued, the producer once
    /// `Kp` slots are free.
    pub fn wake_threshold_reached(&self, role: Role) -> bool {
        match role {
            Role::Consumer => self.state.queue_length() >= self.params.kc,
            Role::Producer => self.state.free_slots() >= self.params.kp,
        }
    }

    /// Front-transition guard: starts a transfer if `role` can make progress.
    ///
    /// On success the transfer record is appended and the matching Back
    /// transition is scheduled after the service time. Returns `false` when
    /// the queue is full (producer) or empty (consumer).
    pub fn start_transfer(&mut self, role: Role) -> bool {
        let (ready, index) = match role {
            Role::Producer => (self.state.has_room(), self.state.producer_index()),
            Role::Consumer => (self.state.has_items(), self.state.consumer_index()),
        };
        if !ready {
            return false;
        }

        let now = self.now();
        let service = self.service_time(role);
        self.record(role, now, RecordKind::Transfer(index), service);
        self.schedule(now + service, Transition::back(role));
        true
    }

    /// Back-transition commit of the transfer started by [`start_transfer`].
    ///
    /// [`start_transfer`]: SimContext::start_transfer
    pub fn commit_transfer(&mut self, role: Role) -> u64 {
        match role {
            Role::Producer => self.state.commit_produce(),
            Role::Consumer => {
                self.stats.increment_items();
                self.state.commit_consume()
            }
        }
    }

    pub(crate) fn peek_time(&self) -> Option<SimTime> {
        self.queue.peek_time()
    }

    pub(crate) fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Pops the next due event and moves the clock to its fire time.
    pub(crate) fn advance(&mut self) -> Option<PendingEvent> {
        let event = self.queue.pop_next()?;
        self.clock.advance_to(event.fire_time);
        Some(event)
    }

    pub(crate) fn into_parts(self) -> (SimulationParameters, SharedQueueState, RunStatistics, Timeline, Timeline) {
        (self.params, self.state, self.stats, self.producer, self.consumer)
    }
}
