//! ## slotsim-core::events
//! **Transition tags and the future event queue**
//!
//! Every pending event names one transition of one actor. The strategy in
//! use is fixed for a run, so the tag only carries the role and the phase;
//! the driver dispatches the pair to the active strategy.

pub mod queue;

pub use queue::{EventKey, FutureEventQueue};

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::time::SimTime;

/// The two actors sharing the bounded queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Producer,
    Consumer,
}

impl Role {
    /// The other side of the queue.
    #[inline]
    pub fn peer(self) -> Role {
        match self {
            Role::Producer => Role::Consumer,
            Role::Consumer => Role::Producer,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Producer => f.write_str("P"),
            Role::Consumer => f.write_str("C"),
        }
    }
}

/// Phase of an actor's two-state cycle.
///
/// The declaration order is the same-instant tie class: a `Back` (commit)
/// transition sorts before a `Front` (decision) transition so that decisions
/// observe every completion that happened at the same virtual time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Completes an in-flight operation and mutates the shared queue state.
    Back,
    /// Reads the queue occupancy to decide between working and waiting.
    Front,
}

/// Identifies which transition a pending event will run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Transition {
    pub role: Role,
    pub phase: Phase,
}

impl Transition {
    #[inline]
    pub const fn front(role: Role) -> Self {
        Self {
            role,
            phase: Phase::Front,
        }
    }

    #[inline]
    pub const fn back(role: Role) -> Self {
        Self {
            role,
            phase: Phase::Back,
        }
    }
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.phase {
            Phase::Front => write!(f, "{} message starts", self.role),
            Phase::Back => write!(f, "{} message ends", self.role),
        }
    }
}

/// A transition due at a given virtual time, as handed out by the queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingEvent {
    pub fire_time: SimTime,
    pub transition: Transition,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn back_sorts_before_front() {
        assert!(Phase::Back < Phase::Front);
    }

    #[test]
    fn peer_swaps_roles() {
        assert_eq!(Role::Producer.peer(), Role::Consumer);
        assert_eq!(Role::Consumer.peer(), Role::Producer);
    }

    #[test]
    fn transition_display_matches_trace_format() {
        assert_eq!(Transition::front(Role::Producer).to_string(), "P message starts");
        assert_eq!(Transition::back(Role::Consumer).to_string(), "C message ends");
    }
}
