//! Shared queue occupancy, the only state both actors touch.

use serde::{Deserialize, Serialize};

/// Occupancy of the bounded queue plus the monotonic item counters.
///
/// Invariant: `queue_length == producer_index - consumer_index` and
/// `queue_length <= capacity`. Front transitions check [`has_room`] /
/// [`has_items`] before starting an operation and only Back transitions
/// commit, so the invariant holds without clamping.
///
/// [`has_room`]: SharedQueueState::has_room
/// [`has_items`]: SharedQueueState::has_items
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SharedQueueState {
    capacity: u32,
    queue_length: u32,
    producer_index: u64,
    consumer_index: u64,
}

impl SharedQueueState {
    pub fn new(capacity: u32) -> Self {
        Self {
            capacity,
            queue_length: 0,
            producer_index: 0,
            consumer_index: 0,
        }
    }

    #[inline]
    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    #[inline]
    pub fn queue_length(&self) -> u32 {
        self.queue_length
    }

    #[inline]
    pub fn free_slots(&self) -> u32 {
        self.capacity - self.queue_length
    }

    /// Items committed by the producer so far; also the index of the next item to produce.
    #[inline]
    pub fn producer_index(&self) -> u64 {
        self.producer_index
    }

    /// Items committed by the consumer so far; also the index of the next item to consume.
    #[inline]
    pub fn consumer_index(&self) -> u64 {
        self.consumer_index
    }

    #[inline]
    pub fn has_room(&self) -> bool {
        self.queue_length < self.capacity
    }

    #[inline]
    pub fn has_items(&self) -> bool {
        self.queue_length > 0
    }

    /// Commits one produced item and returns its index.
    pub fn commit_produce(&mut self) -> u64 {
        debug_assert!(self.has_room(), "producer committed into a full queue");
        let index = self.producer_index;
        self.queue_length += 1;
        self.producer_index += 1;
        index
    }

    /// Commits one consumed item and returns its index.
    pub fn commit_consume(&mut self) -> u64 {
        debug_assert!(self.has_items(), "consumer committed from an empty queue");
        let index = self.consumer_index;
        self.queue_length -= 1;
        self.consumer_index += 1;
        index
    }

    pub fn is_consistent(&self) -> bool {
        self.queue_length <= self.capacity
            && self.producer_index >= self.consumer_index
            && u64::from(self.queue_length) == self.producer_index - self.consumer_index
    }
}
