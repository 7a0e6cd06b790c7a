//! CallCounts - Record counts per call type from a single snapshot

use std::collections::BTreeMap;

/// Count of stored records per call type label.
///
/// Built from one grouped query, so `total()` always equals the sum of
/// the per-type counts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallCounts {
    by_type: BTreeMap<String, i64>,
}

impl CallCounts {
    /// Count for an exact call type label (0 if none)
    pub fn get(&self, call_type: &str) -> i64 {
        self.by_type.get(call_type).copied().unwrap_or(0)
    }

    /// Total number of records, including unknown call types
    pub fn total(&self) -> i64 {
        self.by_type.values().sum()
    }
}

impl FromIterator<(String, i64)> for CallCounts {
    fn from_iter<I: IntoIterator<Item = (String, i64)>>(iter: I) -> Self {
        let mut by_type = BTreeMap::new();
        for (call_type, count) in iter {
            *by_type.entry(call_type).or_insert(0) += count;
        }
        Self { by_type }
    }
}
