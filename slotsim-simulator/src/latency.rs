//! Worst-case latency reconstruction from the two timelines.

use serde::{Deserialize, Serialize};
use tracing::error;

use slotsim_core::prelude::*;

use crate::bounds::LatencyBound;

/// Latencies closer than this to the running maximum count as ties.
pub const LATENCY_TIE_TOLERANCE: f64 = 1e-8;

/// Slack allowed above the analytical bound before reporting a violation.
pub const BOUND_TOLERANCE: f64 = 1e-6;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorstCaseLatency {
    pub latency: f64,
    /// Every item whose latency ties the maximum, in item order.
    pub items: Vec<u64>,
}

/// Replays the transfer records in item order.
///
/// Item `i` is charged from the start of the production of item `i - 1`
/// (time 0 for the first item) to the end of its own consumption. The walk
/// stops at the first item missing from either timeline.
pub fn reconstruct(producer: &Timeline, consumer: &Timeline, wc: f64) -> WorstCaseLatency {
    let mut produced = producer.transfers();
    let mut consumed = consumer.transfers();
    let mut previous_start = 0.0;
    let mut worst = WorstCaseLatency::default();

    for index in 0u64.. {
        let Some(production) = produced.find(|r| r.item() == Some(index)) else {
            break;
        };
        let Some(consumption) = consumed.find(|r| r.item() == Some(index)) else {
            break;
        };

        let latency = consumption.start.as_f64() + wc - previous_start;
        previous_start = production.start.as_f64();

        if (latency - worst.latency).abs() < LATENCY_TIE_TOLERANCE {
            worst.items.push(index);
        } else if latency > worst.latency {
            worst.latency = latency;
            worst.items.clear();
            worst.items.push(index);
        }
    }
    worst
}

/// Outcome of comparing the observed worst case with the analytical bound.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum BoundCheck {
    Within,
    Violated { excess: f64 },
    NotApplicable,
}

impl BoundCheck {
    pub fn is_violation(&self) -> bool {
        matches!(self, BoundCheck::Violated { .. })
    }
}

/// Compares `observed` with `bound`, logging violations.
///
/// A violation never aborts the run; it flags a gap between the closed
/// form and the simulated model.
pub fn check_bound(observed: &WorstCaseLatency, bound: &LatencyBound) -> BoundCheck {
    if !bound.applicable {
        return BoundCheck::NotApplicable;
    }
    let excess = observed.latency - bound.value;
    if excess > BOUND_TOLERANCE {
        error!(
            observed = observed.latency,
            bound = bound.value,
            excess,
            "worst case latency exceeds the bound"
        );
        BoundCheck::Violated { excess }
    } else {
        BoundCheck::Within
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_test::traced_test;

    fn timeline(records: &[(f64, RecordKind, f64)]) -> Timeline {
        let mut t = Timeline::new();
        for &(start, kind, duration) in records {
            t.push(SimTime::new(start), kind, duration);
        }
        t
    }

    #[test]
    fn charges_from_previous_production_start() {
        let producer = timeline(&[
            (0.0, RecordKind::Transfer(0), 2.0),
            (2.0, RecordKind::Transfer(1), 2.0),
            (4.0, RecordKind::Idle, 5.0),
            (9.0, RecordKind::Transfer(2), 2.0),
        ]);
        let consumer = timeline(&[
            (0.0, RecordKind::Idle, 5.0),
            (5.0, RecordKind::Transfer(0), 1.0),
            (6.0, RecordKind::Transfer(1), 1.0),
            (11.0, RecordKind::Transfer(2), 1.0),
        ]);
        let worst = reconstruct(&producer, &consumer, 1.0);
        // item 0: 5 + 1 - 0, item 1: 6 + 1 - 0, item 2: 11 + 1 - 2
        assert_eq!(worst.latency, 10.0);
        assert_eq!(worst.items, vec![2]);
    }

    #[test]
    fn collects_ties() {
        let producer = timeline(&[
            (0.0, RecordKind::Transfer(0), 1.0),
            (1.0, RecordKind::Transfer(1), 1.0),
            (2.0, RecordKind::Transfer(2), 1.0),
        ]);
        let consumer = timeline(&[
            (1.0, RecordKind::Transfer(0), 1.0),
            (2.0, RecordKind::Transfer(1), 1.0),
            (3.0, RecordKind::Transfer(2), 1.0),
        ]);
        let worst = reconstruct(&producer, &consumer, 1.0);
        assert_eq!(worst.latency, 3.0);
        assert_eq!(worst.items, vec![1, 2]);
    }

    #[test]
    fn unconsumed_items_are_ignored() {
        let producer = timeline(&[(0.0, RecordKind::Transfer(0), 2.0)]);
        let worst = reconstruct(&producer, &Timeline::new(), 1.0);
        assert_eq!(worst, WorstCaseLatency::default());
    }

    #[traced_test]
    #[test]
    fn violation_is_reported_not_fatal() {
        let observed = WorstCaseLatency {
            latency: 12.0,
            items: vec![4],
        };
        let bound = LatencyBound {
            value: 10.0,
            applicable: true,
        };
        let check = check_bound(&observed, &bound);
        assert!(check.is_violation());
        assert!(logs_contain("worst case latency exceeds the bound"));
    }

    #[test]
    fn tolerance_and_applicability() {
        let observed = WorstCaseLatency {
            latency: 10.0 + 1e-9,
            items: vec![0],
        };
        let tight = LatencyBound {
            value: 10.0,
            applicable: true,
        };
        let loose = LatencyBound {
            value: 1.0,
            applicable: false,
        };
        assert_eq!(check_bound(&observed, &tight), BoundCheck::Within);
        assert_eq!(check_bound(&observed, &loose), BoundCheck::NotApplicable);
    }
}
