//! Parameter sweep over an idle-wait duration.

use serde::{Deserialize, Serialize};
use tracing::debug;

use slotsim_core::prelude::*;

use crate::bounds::time_bounds;
use crate::driver::Simulator;
use crate::metrics::RunMetrics;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepPlan {
    pub axis: SweepAxis,
    /// Exclusive upper end of the swept range.
    pub max: f64,
    pub points: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweepPoint {
    pub value: f64,
    pub time_per_item: f64,
    pub energy_per_item: f64,
    pub batch: f64,
    pub time_lower_bound: f64,
    pub time_upper_bound: f64,
}

/// Sweeps `plan.axis` from `ye` towards `plan.max` in `plan.points` equal steps.
///
/// `yp` and `yc` are first raised to at least `ye`, so the axis not being
/// swept never idles for less than one idle-wait costs. Every point is a
/// full, independent run under `budget`. Under sleep/wake, points with a
/// zero idle-wait are skipped.
pub fn sweep(
    base: &SimulationParameters,
    kind: StrategyKind,
    budget: RunBudget,
    plan: SweepPlan,
) -> Result<Vec<SweepPoint>, SimulationError> {
    if plan.points == 0 {
        return Err(SimulationError::InvalidSweep(
            "a sweep needs at least one point".into(),
        ));
    }

    let mut params = base.clone();
    params.yp = params.yp.max(params.ye);
    params.yc = params.yc.max(params.ye);

    let start = params.ye;
    let increment = (plan.max - start) / f64::from(plan.points);
    let mut points = Vec::with_capacity(plan.points as usize);

    for i in 0..plan.points {
        let value = start + f64::from(i) * increment;
        if value >= plan.max {
            break;
        }
        // A zero idle-wait never advances time under sleep/wake.
        if kind == StrategyKind::Sleep && value <= 0.0 {
            debug!(axis = %plan.axis, value, "sweep point skipped, sleep needs a positive idle-wait");
            continue;
        }
        match plan.axis {
            SweepAxis::Yp => params.yp = value,
            SweepAxis::Yc => params.yc = value,
            SweepAxis::Y => {
                params.yp = value;
                params.yc = value;
            }
        }

        let mut sim = Simulator::new(params.clone(), kind)?;
        let termination = sim.drive(budget);
        let metrics = RunMetrics::compute(sim.context().params(), &sim.context().stats);
        let bounds = time_bounds(&params);
        debug!(axis = %plan.axis, value, %termination, "sweep point");

        points.push(SweepPoint {
            value,
            time_per_item: metrics.producer_time_per_item,
            energy_per_item: metrics.energy_per_item,
            batch: metrics.batch,
            time_lower_bound: bounds.best,
            time_upper_bound: bounds.worst,
        });
    }
    Ok(points)
}
