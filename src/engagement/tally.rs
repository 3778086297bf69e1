//! Frequency reducer: rank-ordered occurrence counts.

use std::collections::HashMap;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Ordered mapping from a value to its occurrence count.
///
/// Entries are sorted descending by count; ties keep first-seen order.
/// Serializes as an ordered JSON map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyTally {
    entries: Vec<(String, u64)>,
}

impl FrequencyTally {
    /// Count occurrences of each distinct value in `values`.
    ///
    /// Pure function of its input: deterministic for a given input order,
    /// no side effects. When `limit > 0` only the first `limit` ranked
    /// entries are kept; `limit == 0` keeps all.
    pub fn tally<I>(values: I, limit: usize) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut counts: HashMap<String, u64> = HashMap::new();
        let mut first_seen: Vec<String> = Vec::new();

        for value in values {
            match counts.get_mut(&value) {
                Some(count) => *count += 1,
                None => {
                    counts.insert(value.clone(), 1);
                    first_seen.push(value);
                }
            }
        }

        let mut entries: Vec<(String, u64)> = first_seen
            .into_iter()
            .map(|value| {
                let count = counts[&value];
                (value, count)
            })
            .collect();

        // Stable sort keeps first-seen order among equal counts
        entries.sort_by(|a, b| b.1.cmp(&a.1));

        if limit > 0 {
            entries.truncate(limit);
        }

        Self { entries }
    }

    /// Number of distinct values in the tally.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Occurrence count for one value, if present.
    pub fn get(&self, value: &str) -> Option<u64> {
        self.entries
            .iter()
            .find(|(v, _)| v == value)
            .map(|(_, count)| *count)
    }

    /// Ranked entries, highest count first.
    pub fn entries(&self) -> &[(String, u64)] {
        &self.entries
    }

    /// Sum of all occurrence counts.
    pub fn total_count(&self) -> u64 {
        self.entries.iter().map(|(_, count)| count).sum()
    }
}

impl Serialize for FrequencyTally {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (value, count) in &self.entries {
            map.serialize_entry(value, count)?;
        }
        map.end()
    }
}
