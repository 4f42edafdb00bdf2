//! Measurement counts returned by execution backends.

use itertools::Itertools;
use rustc_hash::FxHashMap;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Observation counts per measured bitstring.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct Histogram {
    counts: FxHashMap<String, usize>,
    shots: usize,
}

impl Histogram {
    /// An empty histogram for a run of `shots` shots.
    #[must_use]
    pub fn new(shots: usize) -> Self {
        Self {
            counts: FxHashMap::default(),
            shots,
        }
    }

    /// Records `count` more observations of `bits`. Zero counts are not stored.
    pub fn record(&mut self, bits: impl Into<String>, count: usize) {
        if count > 0 {
            *self.counts.entry(bits.into()).or_insert(0) += count;
        }
    }

    /// The number of shots requested from the backend.
    #[must_use]
    pub const fn shots(&self) -> usize {
        self.shots
    }

    /// Sum of all recorded counts. Equals `shots` for sampled runs.
    #[must_use]
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Count of `bits`, 0 if never observed.
    #[must_use]
    pub fn get(&self, bits: &str) -> usize {
        self.counts.get(bits).copied().unwrap_or(0)
    }

    /// Distinct bitstrings observed.
    #[must_use]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// True when nothing was observed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Bitstrings with their counts, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts.iter().map(|(k, &v)| (k.as_str(), v))
    }

    /// The most frequent bitstring; ties go to the lexicographically smallest.
    #[must_use]
    pub fn most_frequent(&self) -> Option<&str> {
        self.counts
            .iter()
            .max_by(|(ka, va), (kb, vb)| va.cmp(vb).then_with(|| kb.cmp(ka)))
            .map(|(k, _)| k.as_str())
    }

    /// Observed frequency of `bits`, in `[0, 1]`.
    #[must_use]
    pub fn frequency(&self, bits: &str) -> f64 {
        let total = self.total();
        if total == 0 {
            0.0
        } else {
            self.get(bits) as f64 / total as f64
        }
    }

    /// Counts keyed in bitstring order.
    #[must_use]
    pub fn sorted(&self) -> BTreeMap<String, usize> {
        self.counts
            .iter()
            .map(|(k, &v)| (k.clone(), v))
            .collect()
    }

    /// Bitstring width, if every key has the same one.
    #[must_use]
    pub fn width(&self) -> Option<usize> {
        self.counts.keys().map(String::len).all_equal_value().ok()
    }
}

impl fmt::Display for Histogram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total = self.total().max(1);
        for (bits, count) in self.sorted() {
            let bar = "#".repeat(count * 40 / total);
            writeln!(f, "{bits}  {count:>6}  {bar}")?;
        }
        Ok(())
    }
}
