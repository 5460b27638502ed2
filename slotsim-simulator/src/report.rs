//! Everything a completed run hands back to its caller.

use serde::{Deserialize, Serialize};

use slotsim_core::prelude::*;

use crate::bounds::{latency_bound, time_bounds, LatencyBound, TimeBounds};
use crate::context::SimContext;
use crate::digest::timeline_digest;
use crate::driver::TerminationReason;
use crate::latency::{check_bound, reconstruct, BoundCheck, WorstCaseLatency};
use crate::metrics::RunMetrics;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    pub strategy: StrategyKind,
    pub params: SimulationParameters,
    pub termination: TerminationReason,
    pub final_time: SimTime,
    pub steps: u64,
    pub statistics: RunStatistics,
    pub state: SharedQueueState,
    pub producer: Timeline,
    pub consumer: Timeline,
    pub metrics: RunMetrics,
    pub time_bounds: TimeBounds,
    pub worst_case: WorstCaseLatency,
    pub latency_bound: LatencyBound,
    pub bound_check: BoundCheck,
}

impl RunReport {
    pub(crate) fn build(
        strategy: StrategyKind,
        termination: TerminationReason,
        final_time: SimTime,
        steps: u64,
        ctx: SimContext,
    ) -> Self {
        let (params, state, statistics, producer, consumer) = ctx.into_parts();

        let metrics = RunMetrics::compute(&params, &statistics);
        let worst_case = reconstruct(&producer, &consumer, params.wc);
        let bound = latency_bound(&params, strategy);
        let bound_check = check_bound(&worst_case, &bound);

        Self {
            strategy,
            time_bounds: time_bounds(&params),
            params,
            termination,
            final_time,
            steps,
            statistics,
            state,
            producer,
            consumer,
            metrics,
            worst_case,
            latency_bound: bound,
            bound_check,
        }
    }

    pub fn timeline(&self, role: Role) -> &Timeline {
        match role {
            Role::Producer => &self.producer,
            Role::Consumer => &self.consumer,
        }
    }

    pub fn digest(&self) -> String {
        timeline_digest(&self.producer, &self.consumer)
    }

    /// Worst-case items to highlight when rendering the timelines.
    ///
    /// Unless `all` is set a single representative is picked: the third
    /// item, or the last one when fewer tie.
    pub fn highlighted_items(&self, all: bool) -> Vec<u64> {
        let items = &self.worst_case.items;
        if all || items.is_empty() {
            return items.clone();
        }
        vec![items[2.min(items.len() - 1)]]
    }
}
