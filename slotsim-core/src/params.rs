//! ## slotsim-core::params
//! **Model parameters for one simulation run**
//!
//! Field names follow the notation of the model: `W` is a per-item service
//! time, `Y` an idle-wait (backoff) duration, `N` the cost of sending a wake
//! signal, `S` the cost of resuming after one and `K` an activation
//! watermark. The `p`/`c` suffix names the actor that pays the cost.

use serde::{Deserialize, Serialize};

use crate::error::SimulationError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationParameters {
    /// Queue capacity `L`, in slots.
    pub capacity: u32,
    /// Producer service time per item.
    pub wp: f64,
    /// Consumer service time per item.
    pub wc: f64,
    /// Producer idle-wait when the queue is full.
    pub yp: f64,
    /// Consumer idle-wait when the queue is empty.
    pub yc: f64,
    /// Energy spent per idle-wait.
    pub ye: f64,
    /// Producer cost to notify the consumer.
    pub np: f64,
    /// Consumer cost to notify the producer.
    pub nc: f64,
    /// Producer cost to resume after a notification.
    pub sp: f64,
    /// Consumer cost to resume after a notification.
    pub sc: f64,
    /// Free slots required before the consumer wakes the producer.
    pub kp: u32,
    /// Queued items required before the producer wakes the consumer.
    pub kc: u32,
    /// Virtual time at which the consumer starts.
    pub cons_offset: f64,
}

impl Default for SimulationParameters {
    fn default() -> Self {
        Self {
            capacity: 3,
            wp: 2.0,
            wc: 1.0,
            yp: 5.0,
            yc: 5.0,
            ye: 2.5,
            np: 4.5,
            nc: 3.0,
            sp: 7.1,
            sc: 2.1,
            kp: 1,
            kc: 1,
            cons_offset: 0.0,
        }
    }
}

impl SimulationParameters {
    /// Checks the preconditions the state machines rely on.
    ///
    /// Configuration loading applies stricter, strategy-aware rules; this is
    /// the floor every run must satisfy.
    pub fn validate(&self) -> Result<(), SimulationError> {
        if self.capacity == 0 {
            return Err(SimulationError::InvalidParameters(
                "queue capacity must be at least 1".into(),
            ));
        }
        if self.kp == 0 || self.kc == 0 {
            return Err(SimulationError::InvalidParameters(
                "watermarks kp and kc must be at least 1".into(),
            ));
        }

        let costs = [
            ("wp", self.wp),
            ("wc", self.wc),
            ("yp", self.yp),
            ("yc", self.yc),
            ("ye", self.ye),
            ("np", self.np),
            ("nc", self.nc),
            ("sp", self.sp),
            ("sc", self.sc),
            ("cons_offset", self.cons_offset),
        ];
        for (name, value) in costs {
            if !value.is_finite() || value < 0.0 {
                return Err(SimulationError::InvalidParameters(format!(
                    "{name} must be a finite non-negative number, got {value}"
                )));
            }
        }
        Ok(())
    }

    /// `L` as a real, for the closed-form bounds.
    #[inline]
    pub fn l(&self) -> f64 {
        f64::from(self.capacity)
    }
}
