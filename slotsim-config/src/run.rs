//! Run plan: strategy, run-length budget and parameter sweep.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use validator::{self, Validate};

use slotsim_core::prelude::{RunBudget, StrategyKind, SweepAxis};

use crate::validation;

#[derive(Debug, Serialize, Deserialize, Validate, Clone, PartialEq)]
pub struct RunConfig {
    #[serde(default)]
    pub strategy: StrategyKind,

    /// Virtual-time horizon.
    #[serde(default = "default_horizon")]
    #[validate(custom(function = validation::validate_positive))]
    pub horizon: f64,

    /// Legacy wall-clock budget. Overrides `horizon` and makes runs
    /// non-reproducible.
    #[serde(default)]
    #[validate(range(min = 1))]
    pub wall_clock_ms: Option<u64>,
}

fn default_horizon() -> f64 {
    1000.0
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            strategy: StrategyKind::default(),
            horizon: default_horizon(),
            wall_clock_ms: None,
        }
    }
}

impl RunConfig {
    pub fn budget(&self) -> RunBudget {
        match self.wall_clock_ms {
            Some(ms) => RunBudget::WallClock(Duration::from_millis(ms)),
            None => RunBudget::VirtualTime(self.horizon),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Validate, Clone, PartialEq)]
pub struct SweepConfig {
    #[serde(default)]
    pub axis: SweepAxis,

    /// Exclusive upper end of the swept idle-wait range.
    #[serde(default = "default_sweep_max")]
    #[validate(custom(function = validation::validate_positive))]
    pub max: f64,

    #[serde(default = "default_sweep_points")]
    #[validate(range(min = 1, max = 100_000))]
    pub points: u32,
}

fn default_sweep_max() -> f64 {
    100.0
}

fn default_sweep_points() -> u32 {
    150
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            axis: SweepAxis::default(),
            max: default_sweep_max(),
            points: default_sweep_points(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn virtual_budget_by_default() {
        let run = RunConfig::default();
        assert_eq!(run.budget(), RunBudget::VirtualTime(1000.0));
        assert!(run.validate().is_ok());
    }

    #[test]
    fn wall_clock_overrides_horizon() {
        let run = RunConfig {
            wall_clock_ms: Some(250),
            ..Default::default()
        };
        assert_eq!(run.budget(), RunBudget::WallClock(Duration::from_millis(250)));
    }

    #[test]
    fn sweep_needs_points() {
        let sweep = SweepConfig {
            points: 0,
            ..Default::default()
        };
        assert!(sweep.validate().is_err());
    }
}
