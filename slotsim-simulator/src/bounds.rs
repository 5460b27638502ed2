//! Closed-form bounds, parameterized identically to the simulation.

use serde::{Deserialize, Serialize};

use slotsim_core::prelude::*;

/// Best and worst average per-item time under sleep/wake.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeBounds {
    pub best: f64,
    pub worst: f64,
}

/// Analytical worst-case latency for one strategy.
///
/// `applicable` is false outside the derivation's preconditions
/// (`L > 1` and `Kp = 1`); the value is still computed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatencyBound {
    pub value: f64,
    pub applicable: bool,
}

/// Average per-item time bounds when the actors alternate sleeping.
///
/// The best case has the faster side absorbing `m` extra items per idle
/// cycle while the slower side keeps working. Equal rates never force a
/// sleep, so the best case is the service time itself.
pub fn time_bounds(params: &SimulationParameters) -> TimeBounds {
    let l = params.l();
    let (wp, wc) = (params.wp, params.wc);

    let best = if wc < wp {
        let m = fast_side_extra(l, wc, wp);
        ((l + m) * wc + params.yc) / (l + m)
    } else if wp < wc {
        let m = fast_side_extra(l, wp, wc);
        ((l + m) * wp + params.yp) / (l + m)
    } else {
        wp
    };

    let worst = f64::max(wp + params.yp / l, wc + params.yc / l);
    TimeBounds { best, worst }
}

fn fast_side_extra(l: f64, fast: f64, slow: f64) -> f64 {
    let m = (((l - 1.0) * fast - slow) / (slow - fast)).floor() + 1.0;
    m.max(0.0)
}

pub fn latency_bound(params: &SimulationParameters, kind: StrategyKind) -> LatencyBound {
    let value = match kind {
        StrategyKind::Sleep => sleep_latency_bound(params),
        StrategyKind::Notify => notify_latency_bound(params),
        StrategyKind::Poll => poll_latency_bound(params),
    };
    LatencyBound {
        value,
        applicable: params.capacity > 1 && params.kp == 1,
    }
}

fn sleep_latency_bound(p: &SimulationParameters) -> f64 {
    let l = p.l();
    if p.wc < p.wp && p.yc < (l - 1.0) * p.wp - p.wc {
        // Fast consumer.
        2.0 * p.wp + p.yc + p.wc
    } else if p.wp < p.wc && p.yp < (l - 1.0) * p.wc - p.wp {
        // Fast producer.
        p.wc * (l + 1.0)
    } else {
        // Long sleeps: the consumer may oversleep `h` producer backoffs.
        if p.yp == 0.0 {
            return f64::INFINITY;
        }
        let h = ((p.yc + l * p.wc - (l - 1.0) * p.wp) / p.yp).floor() + 1.0;
        2.0 * p.wp + p.wc + p.yc + h * p.yp
    }
}

fn notify_latency_bound(p: &SimulationParameters) -> f64 {
    let l = p.l();
    let kc = f64::from(p.kc);

    let steady_state = f64::max(p.wp, p.sc - (l - 2.0) * p.wp)
        + kc * p.wc
        + p.nc
        + p.sp
        + p.wp
        + p.np
        + p.sc
        + p.wc;

    let fast_producer = if p.wc < p.wp {
        0.0
    } else {
        // With equal rates the producer never laps the consumer: m -> inf.
        let extra_kicks = if p.wc == p.wp {
            0.0
        } else {
            let m = ((p.sp + (kc - 1.0) * p.wp) / (p.wc - p.wp)).floor() + 1.0;
            ((l - 1.0) / m).floor()
        };
        p.wp + (l + kc) * p.wc + (1.0 + extra_kicks) * p.nc
    };

    f64::max(steady_state, fast_producer)
}

fn poll_latency_bound(p: &SimulationParameters) -> f64 {
    if p.wp < p.wc {
        (p.l() + 1.0) * p.wc
    } else {
        2.0 * p.wp + p.wc
    }
}
