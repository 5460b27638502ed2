// slotsim-simulator/src/lib.rs

/*!
# Slotsim Simulator

Deterministic discrete-event simulation of a producer and a consumer sharing
a bounded queue, under one of three synchronization strategies (sleep/wake,
notify, poll).

## Key Components:
- **Strategies:** one state machine per strategy, each a Front/Back
  transition pair per actor.
- **Driver:** pops due transitions in virtual-time order until the budget or
  the event queue runs out.
- **Bounds:** closed-form per-item time and worst-case latency bounds.
- **Reconstructor:** replays the timelines to find the observed worst-case
  latency and checks it against the bound.
- **Digest:** BLAKE3 hash of the timelines for reproducibility checks.
- **Sweep:** repeated runs over one idle-wait parameter.
*/

use slotsim_core::prelude::{RunBudget, SimulationError, SimulationParameters, StrategyKind};

pub mod bounds;
pub mod context;
pub mod digest;
pub mod driver;
pub mod latency;
pub mod metrics;
pub mod report;
pub mod strategy;
pub mod sweep;

pub use bounds::{latency_bound, time_bounds, LatencyBound, TimeBounds};
pub use context::SimContext;
pub use digest::timeline_digest;
pub use driver::{Simulator, TerminationReason};
pub use latency::{check_bound, reconstruct, BoundCheck, WorstCaseLatency};
pub use metrics::RunMetrics;
pub use report::RunReport;
pub use strategy::Strategy;
pub use sweep::{sweep, SweepPlan, SweepPoint};

/// Runs one simulation to completion.
pub fn simulate(
    params: SimulationParameters,
    kind: StrategyKind,
    budget: RunBudget,
) -> Result<RunReport, SimulationError> {
    Ok(Simulator::new(params, kind)?.run(budget))
}
