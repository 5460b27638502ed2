//! ## slotsim-core::time
//! **Virtual time for the discrete-event driver**
//!
//! Virtual time is a non-negative real measured in the same abstract unit as
//! the service and idle costs of `SimulationParameters`. It only moves when
//! the driver pops the next pending event.

use std::cmp::Ordering;
use std::fmt;
use std::ops::Add;

use serde::{Deserialize, Serialize};

/// A point on the virtual time axis.
///
/// Totally ordered through `f64::total_cmp` so it can key ordered
/// collections. Transitions only ever produce finite, non-negative values.
/// Negative zero is stored as `+0.0`, since `total_cmp` sorts it first.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SimTime(f64);

impl SimTime {
    pub const ZERO: SimTime = SimTime(0.0);

    #[inline]
    pub fn new(t: f64) -> Self {
        Self(t + 0.0)
    }

    #[inline]
    pub fn as_f64(self) -> f64 {
        self.0
    }
}

impl PartialEq for SimTime {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SimTime {}

impl Ord for SimTime {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl PartialOrd for SimTime {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Add<f64> for SimTime {
    type Output = SimTime;

    #[inline]
    fn add(self, delta: f64) -> SimTime {
        SimTime::new(self.0 + delta)
    }
}

impl From<f64> for SimTime {
    fn from(t: f64) -> Self {
        Self::new(t)
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}", self.0)
    }
}

/// Monotonic virtual clock owned by the simulation driver.
#[derive(Debug, Clone, Default)]
pub struct VirtualClock {
    now: SimTime,
}

impl VirtualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current virtual time.
    #[inline]
    pub fn now(&self) -> SimTime {
        self.now
    }

    /// Moves the clock to the fire time of the event being executed.
    ///
    /// Time never goes backwards: the future event queue hands out events in
    /// non-decreasing order.
    #[inline]
    pub fn advance_to(&mut self, t: SimTime) {
        debug_assert!(t >= self.now, "virtual time went backwards");
        self.now = t;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_initial_value() {
        let clock = VirtualClock::new();
        assert_eq!(clock.now(), SimTime::ZERO);
    }

    #[test]
    fn test_clock_advance() {
        let mut clock = VirtualClock::new();
        clock.advance_to(SimTime::new(2.5));
        assert_eq!(clock.now().as_f64(), 2.5);
        clock.advance_to(SimTime::new(2.5));
        clock.advance_to(SimTime::new(7.0));
        assert_eq!(clock.now().as_f64(), 7.0);
    }

    #[test]
    fn negative_zero_equals_zero() {
        let t = SimTime::new(-0.0);
        assert_eq!(t, SimTime::ZERO);
        assert!(t.as_f64().is_sign_positive());
        assert_eq!(SimTime::from(-0.0), SimTime::ZERO);

        let mut clock = VirtualClock::new();
        clock.advance_to(SimTime::new(-0.0));
        assert_eq!(clock.now(), SimTime::ZERO);
    }

    #[test]
    fn sim_time_orders_like_reals() {
        let mut times: Vec<SimTime> = [3.0, 0.5, 2.0, 0.0].into_iter().map(SimTime::new).collect();
        times.sort();
        let sorted: Vec<f64> = times.iter().map(|t| t.as_f64()).collect();
        assert_eq!(sorted, vec![0.0, 0.5, 2.0, 3.0]);
        assert_eq!(SimTime::new(2.0) + 4.5, SimTime::new(6.5));
    }
}
