//! ## slotsim-core::stats
//! **Run counters accumulated by the state-machine transitions**
//!
//! Nothing outside a transition mutates these; the derived metrics are
//! computed from them after the run.

use serde::{Deserialize, Serialize};

use crate::events::Role;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunStatistics {
    items: u64,
    producer_idle_waits: u64,
    consumer_idle_waits: u64,
    producer_kicks: u64,
    consumer_kicks: u64,
    producer_active: bool,
    consumer_active: bool,
}

impl RunStatistics {
    /// Creates a zeroed set of counters with both actors active.
    pub fn new() -> Self {
        RunStatistics {
            items: 0,
            producer_idle_waits: 0,
            consumer_idle_waits: 0,
            producer_kicks: 0,
            consumer_kicks: 0,
            producer_active: true,
            consumer_active: true,
        }
    }

    /// Counts one item fully transferred (committed by the consumer).
    #[inline]
    pub fn increment_items(&mut self) {
        self.items += 1;
    }

    #[inline]
    pub fn increment_idle_waits(&mut self, role: Role) {
        match role {
            Role::Producer => self.producer_idle_waits += 1,
            Role::Consumer => self.consumer_idle_waits += 1,
        }
    }

    /// Counts a wake signal sent by `role`.
    #[inline]
    pub fn increment_kicks(&mut self, role: Role) {
        match role {
            Role::Producer => self.producer_kicks += 1,
            Role::Consumer => self.consumer_kicks += 1,
        }
    }

    #[inline]
    pub fn set_active(&mut self, role: Role, active: bool) {
        match role {
            Role::Producer => self.producer_active = active,
            Role::Consumer => self.consumer_active = active,
        }
    }

    #[inline]
    pub fn is_active(&self, role: Role) -> bool {
        match role {
            Role::Producer => self.producer_active,
            Role::Consumer => self.consumer_active,
        }
    }

    pub fn items(&self) -> u64 {
        self.items
    }

    pub fn idle_waits(&self, role: Role) -> u64 {
        match role {
            Role::Producer => self.producer_idle_waits,
            Role::Consumer => self.consumer_idle_waits,
        }
    }

    pub fn total_idle_waits(&self) -> u64 {
        self.producer_idle_waits + self.consumer_idle_waits
    }

    pub fn kicks(&self, role: Role) -> u64 {
        match role {
            Role::Producer => self.producer_kicks,
            Role::Consumer => self.consumer_kicks,
        }
    }
}

impl Default for RunStatistics {
    fn default() -> Self {
        Self::new()
    }
}
