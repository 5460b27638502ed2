// slotsim-simulator/src/digest.rs

//! BLAKE3 digest of a run's timelines, used to check determinism across runs.

use blake3::Hasher;

use slotsim_core::prelude::*;

/// Hashes both timelines and returns the digest as lowercase hex.
///
/// Floats are hashed by bit pattern, so two digests match only when every
/// record is identical.
pub fn timeline_digest(producer: &Timeline, consumer: &Timeline) -> String {
    let mut hasher = Hasher::new();
    hash_timeline(&mut hasher, b'P', producer);
    hash_timeline(&mut hasher, b'C', consumer);
    hex::encode(hasher.finalize().as_bytes())
}

fn hash_timeline(hasher: &mut Hasher, tag: u8, timeline: &Timeline) {
    hasher.update(&[tag]);
    hasher.update(&(timeline.len() as u64).to_le_bytes());
    for record in timeline {
        hasher.update(&record.start.as_f64().to_bits().to_le_bytes());
        match record.kind {
            RecordKind::Transfer(index) => {
                hasher.update(b"T");
                hasher.update(&index.to_le_bytes());
            }
            RecordKind::Idle => {
                hasher.update(b"Z");
            }
            RecordKind::Notify => {
                hasher.update(b"N");
            }
            RecordKind::ScheduleWake => {
                hasher.update(b"S");
            }
        }
        hasher.update(&record.duration.to_bits().to_le_bytes());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digest_is_hex_and_order_sensitive() {
        let mut a = Timeline::new();
        a.push(SimTime::ZERO, RecordKind::Transfer(0), 2.0);
        let empty = Timeline::new();

        let forward = timeline_digest(&a, &empty);
        let swapped = timeline_digest(&empty, &a);
        assert_eq!(forward.len(), 64);
        assert!(forward.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(forward, swapped);
        assert_eq!(forward, timeline_digest(&a.clone(), &empty));
    }

    #[test]
    fn digest_sees_duration_changes() {
        let mut a = Timeline::new();
        a.push(SimTime::ZERO, RecordKind::Idle, 5.0);
        let mut b = Timeline::new();
        b.push(SimTime::ZERO, RecordKind::Idle, 5.000_000_001);
        let empty = Timeline::new();
        assert_ne!(timeline_digest(&a, &empty), timeline_digest(&b, &empty));
    }
}
