//! Per-item averages derived from the final run counters.

use serde::{Deserialize, Serialize};

use slotsim_core::prelude::*;

/// Averages normalized by the transferred item count.
///
/// Zero items make the idle terms and the energy collapse to zero; zero
/// idle-waits make the batch zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RunMetrics {
    pub producer_time_per_item: f64,
    pub consumer_time_per_item: f64,
    pub energy_per_item: f64,
    /// Items transferred per idle-wait.
    pub batch: f64,
}

impl RunMetrics {
    pub fn compute(params: &SimulationParameters, stats: &RunStatistics) -> Self {
        let items = stats.items() as f64;
        let producer_waits = stats.idle_waits(Role::Producer) as f64;
        let consumer_waits = stats.idle_waits(Role::Consumer) as f64;
        let total_waits = stats.total_idle_waits() as f64;

        let per_item = |amount: f64| if items == 0.0 { 0.0 } else { amount / items };

        Self {
            producer_time_per_item: params.wp + per_item(producer_waits * params.yp),
            consumer_time_per_item: params.wc + per_item(consumer_waits * params.yc),
            energy_per_item: per_item((params.wc + params.wp) * items + total_waits * params.ye),
            batch: if total_waits == 0.0 {
                0.0
            } else {
                items / total_waits
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn averages_from_counters() {
        let params = SimulationParameters::default();
        let mut stats = RunStatistics::new();
        for _ in 0..10 {
            stats.increment_items();
        }
        stats.increment_idle_waits(Role::Producer);
        stats.increment_idle_waits(Role::Consumer);
        stats.increment_idle_waits(Role::Consumer);
        stats.increment_idle_waits(Role::Consumer);

        let metrics = RunMetrics::compute(&params, &stats);
        assert_eq!(metrics.producer_time_per_item, 2.0 + 5.0 / 10.0);
        assert_eq!(metrics.consumer_time_per_item, 1.0 + 15.0 / 10.0);
        assert_eq!(metrics.energy_per_item, (3.0 * 10.0 + 4.0 * 2.5) / 10.0);
        assert_eq!(metrics.batch, 2.5);
    }

    #[test]
    fn zero_items_collapse_to_zero() {
        let params = SimulationParameters::default();
        let mut stats = RunStatistics::new();
        stats.increment_idle_waits(Role::Consumer);

        let metrics = RunMetrics::compute(&params, &stats);
        assert_eq!(metrics.producer_time_per_item, params.wp);
        assert_eq!(metrics.consumer_time_per_item, params.wc);
        assert_eq!(metrics.energy_per_item, 0.0);
        assert_eq!(metrics.batch, 0.0);
    }

    #[test]
    fn zero_idle_waits_give_zero_batch() {
        let mut stats = RunStatistics::new();
        stats.increment_items();
        let metrics = RunMetrics::compute(&SimulationParameters::default(), &stats);
        assert_eq!(metrics.batch, 0.0);
        assert_eq!(metrics.energy_per_item, 3.0);
    }
}
