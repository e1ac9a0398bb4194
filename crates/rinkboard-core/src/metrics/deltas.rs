// Cumulative-to-daily transform for history snapshots.
//
// Snapshots hold running season totals. Charts of "points gained per day"
// need the difference between consecutive snapshots instead.

use crate::model::HistorySnapshot;

/// Convert cumulative snapshots into per-day deltas.
///
/// The output is one element shorter than the input: the first snapshot has
/// no predecessor and is dropped. Each output entry carries the later
/// snapshot's day and, for every targeted key, `current - previous` with a
/// missing value read as zero.
///
/// When `keys` is `None`, every series present on the later snapshot is
/// differenced. Negative results are passed through unchanged; see
/// [`find_decreases`] for surfacing them.
pub fn daily_deltas(snapshots: &[HistorySnapshot], keys: Option<&[&str]>) -> Vec<HistorySnapshot> {
    snapshots
        .windows(2)
        .map(|pair| {
            let (previous, current) = (&pair[0], &pair[1]);
            let mut out = HistorySnapshot::new(current.day.clone());
            match keys {
                Some(keys) => {
                    for key in keys {
                        out.values.insert((*key).to_string(), diff(previous, current, key));
                    }
                }
                None => {
                    for key in current.values.keys() {
                        out.values.insert(key.clone(), diff(previous, current, key));
                    }
                }
            }
            out
        })
        .collect()
}

fn diff(previous: &HistorySnapshot, current: &HistorySnapshot, key: &str) -> f64 {
    current.get(key).unwrap_or(0.0) - previous.get(key).unwrap_or(0.0)
}

/// A cumulative series that went down between two consecutive snapshots.
#[derive(Debug, Clone, PartialEq)]
pub struct DeltaAnomaly {
    pub day: String,
    pub key: String,
    pub delta: f64,
}

/// List every series decrease across consecutive snapshots.
///
/// Cumulative totals should never shrink; a decrease means the upstream
/// data was corrected or corrupted. Callers decide how loudly to report it.
pub fn find_decreases(snapshots: &[HistorySnapshot]) -> Vec<DeltaAnomaly> {
    daily_deltas(snapshots, None)
        .into_iter()
        .flat_map(|entry| {
            let day = entry.day;
            entry
                .values
                .into_iter()
                .filter(|(_, delta)| *delta < 0.0)
                .map(move |(key, delta)| DeltaAnomaly {
                    day: day.clone(),
                    key,
                    delta,
                })
        })
        .collect()
}
