//! Named numeric statistics reported at the end of a stylesheet.

use std::collections::BTreeMap;

/// Number of distinct properties in the compatibility index.
pub const PROPERTIES_TRACKED_STAT: &str = "baseline-properties-tracked";

/// Statistics keyed by name, in name order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Stats {
    values: BTreeMap<&'static str, usize>,
}

impl Stats {
    /// Records a statistic, replacing any previous value.
    pub fn record(&mut self, name: &'static str, value: usize) {
        self.values.insert(name, value);
    }

    /// Returns a statistic's value.
    pub fn get(&self, name: &str) -> Option<usize> {
        self.values.get(name).copied()
    }

    /// Returns true if nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates over `(name, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, usize)> + '_ {
        self.values.iter().map(|(name, value)| (*name, *value))
    }

    /// Merges another set of statistics into this one.
    pub fn merge(&mut self, other: Stats) {
        self.values.extend(other.values);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_and_merge() {
        let mut stats = Stats::default();
        assert!(stats.is_empty());
        stats.record(PROPERTIES_TRACKED_STAT, 3);

        let mut other = Stats::default();
        other.record(PROPERTIES_TRACKED_STAT, 5);
        stats.merge(other);

        assert_eq!(stats.get(PROPERTIES_TRACKED_STAT), Some(5));
        assert_eq!(stats.iter().collect::<Vec<_>>(), vec![(PROPERTIES_TRACKED_STAT, 5)]);
        assert_eq!(stats.get("missing"), None);
    }
}
