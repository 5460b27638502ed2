//! ## slotsim-core::timeline
//! **Append-only per-actor event logs**
//!
//! Each actor owns one [`Timeline`]. Records are pushed by the transitions
//! of that actor (or, for wake-ups, by the waking peer on the wakee's
//! behalf) and are never modified afterwards. The worst-case latency
//! reconstruction and any external renderer read them back in order.

use serde::{Deserialize, Serialize};

use crate::time::SimTime;

/// What an actor was doing during a timeline span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    /// Service of one item; the payload is the item index.
    Transfer(u64),
    /// Idle-wait (backoff) span, or the consumer's startup skew.
    Idle,
    /// Cost paid by the waker to send a wake signal.
    Notify,
    /// Cost paid by the wakee to resume after a wake signal.
    ScheduleWake,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimelineRecord {
    pub start: SimTime,
    pub kind: RecordKind,
    pub duration: f64,
}

impl TimelineRecord {
    #[inline]
    pub fn end(&self) -> SimTime {
        self.start + self.duration
    }

    /// Item index when this is a transfer record.
    #[inline]
    pub fn item(&self) -> Option<u64> {
        match self.kind {
            RecordKind::Transfer(index) => Some(index),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timeline {
    records: Vec<TimelineRecord>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, start: SimTime, kind: RecordKind, duration: f64) {
        debug_assert!(duration >= 0.0, "negative span on the timeline");
        self.records.push(TimelineRecord {
            start,
            kind,
            duration,
        });
    }

    pub fn records(&self) -> &[TimelineRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TimelineRecord> {
        self.records.iter()
    }

    /// Transfer records only, in item order.
    pub fn transfers(&self) -> impl Iterator<Item = &TimelineRecord> + '_ {
        self.records.iter().filter(|r| r.item().is_some())
    }

    /// Number of records of the given kind. Transfers match regardless of index.
    pub fn count(&self, kind: RecordKind) -> usize {
        self.records
            .iter()
            .filter(|r| std::mem::discriminant(&r.kind) == std::mem::discriminant(&kind))
            .count()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<'a> IntoIterator for &'a Timeline {
    type Item = &'a TimelineRecord;
    type IntoIter = std::slice::Iter<'a, TimelineRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_keep_append_order() {
        let mut timeline = Timeline::new();
        timeline.push(SimTime::new(0.0), RecordKind::Transfer(0), 2.0);
        timeline.push(SimTime::new(2.0), RecordKind::Notify, 4.5);
        timeline.push(SimTime::new(6.5), RecordKind::Transfer(1), 2.0);

        assert_eq!(timeline.len(), 3);
        assert_eq!(timeline.records()[1].kind, RecordKind::Notify);
        assert_eq!(timeline.records()[1].end(), SimTime::new(6.5));
        let items: Vec<u64> = timeline.transfers().filter_map(|r| r.item()).collect();
        assert_eq!(items, vec![0, 1]);
    }

    #[test]
    fn count_ignores_transfer_index() {
        let mut timeline = Timeline::new();
        timeline.push(SimTime::new(0.0), RecordKind::Transfer(0), 1.0);
        timeline.push(SimTime::new(1.0), RecordKind::Idle, 5.0);
        timeline.push(SimTime::new(6.0), RecordKind::Transfer(1), 1.0);

        assert_eq!(timeline.count(RecordKind::Transfer(0)), 2);
        assert_eq!(timeline.count(RecordKind::Idle), 1);
        assert_eq!(timeline.count(RecordKind::ScheduleWake), 0);
    }
}
