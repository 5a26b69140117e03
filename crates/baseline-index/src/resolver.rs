//! Baseline verdict resolution.

use crate::{BaselineTier, CompatibilityIndex, FeatureRecord};

/// Tiers in the order they win when a property has mixed features.
const PRECEDENCE: [BaselineTier; 3] = [
    BaselineTier::High,
    BaselineTier::Low,
    BaselineTier::NoBaseline,
];

/// The aggregate baseline outcome for a property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BaselineStatus {
    /// At least one feature is widely available.
    High,
    /// Only newly available features.
    Low,
    /// Only features without baseline support.
    NoBaseline,
    /// The property is not indexed.
    Unknown,
}

impl From<BaselineTier> for BaselineStatus {
    fn from(tier: BaselineTier) -> Self {
        match tier {
            BaselineTier::High => Self::High,
            BaselineTier::Low => Self::Low,
            BaselineTier::NoBaseline => Self::NoBaseline,
        }
    }
}

/// A resolved verdict and the features that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict<'a> {
    /// The aggregate status.
    pub status: BaselineStatus,
    /// Records of the winning tier, in index order. Empty for unknown.
    pub contributing: Vec<&'a FeatureRecord>,
}

impl<'a> Verdict<'a> {
    /// A verdict for a property with no index entries.
    pub fn unknown() -> Self {
        Self {
            status: BaselineStatus::Unknown,
            contributing: Vec::new(),
        }
    }

    /// Returns true if the verdict should produce a diagnostic.
    pub fn is_reportable(&self) -> bool {
        matches!(self.status, BaselineStatus::Low | BaselineStatus::NoBaseline)
    }

    /// Display names of the contributing features, joined with `", "`.
    pub fn feature_names(&self) -> String {
        self.contributing
            .iter()
            .map(|record| record.display_name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Stateless queries against a [`CompatibilityIndex`].
#[derive(Debug, Clone, Copy)]
pub struct BaselineResolver<'a> {
    index: &'a CompatibilityIndex,
}

impl<'a> BaselineResolver<'a> {
    /// Creates a resolver over an index.
    pub fn new(index: &'a CompatibilityIndex) -> Self {
        Self { index }
    }

    /// Resolves a property name, which the caller has already lowercased.
    ///
    /// The first non-empty tier group in high, low, no-baseline order wins,
    /// so a single widely available feature outweighs any number of others.
    pub fn resolve(&self, property: &str) -> Verdict<'a> {
        let Some(records) = self.index.get(property) else {
            return Verdict::unknown();
        };

        PRECEDENCE
            .into_iter()
            .find_map(|tier| {
                let group: Vec<&FeatureRecord> =
                    records.iter().filter(|record| record.tier == tier).collect();
                (!group.is_empty()).then(|| Verdict {
                    status: tier.into(),
                    contributing: group,
                })
            })
            .unwrap_or_else(Verdict::unknown)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FeatureDatabase;
    use pretty_assertions::assert_eq;

    fn index(json: &str) -> CompatibilityIndex {
        CompatibilityIndex::build(&FeatureDatabase::from_json(json).unwrap())
    }

    fn contributing_ids(verdict: &Verdict<'_>) -> Vec<String> {
        verdict
            .contributing
            .iter()
            .map(|record| record.feature_id.to_string())
            .collect()
    }

    #[test]
    fn test_unknown_property() {
        let index = index(r#"{"features": {}}"#);
        let verdict = index.resolver().resolve("margin");
        assert_eq!(verdict, Verdict::unknown());
        assert!(!verdict.is_reportable());
    }

    #[test]
    fn test_high_wins_over_lower_tiers() {
        let index = index(
            r#"{"features": {
                "legacy": {"name": "Legacy", "status": {"baseline": false}, "compat_features": ["css.properties.display.legacy"]},
                "new": {"name": "New", "status": {"baseline": "low"}, "compat_features": ["css.properties.display.new"]},
                "flex": {"name": "Flexbox", "status": {"baseline": "high"}, "compat_features": ["css.properties.display.flex"]}
            }}"#,
        );
        let verdict = index.resolver().resolve("display");
        assert_eq!(verdict.status, BaselineStatus::High);
        assert_eq!(contributing_ids(&verdict), vec!["flex"]);
        assert!(!verdict.is_reportable());
    }

    #[test]
    fn test_low_wins_over_no_baseline() {
        let index = index(
            r#"{"features": {
                "a": {"name": "A", "status": {"baseline": false}, "compat_features": ["css.properties.anchor-name"]},
                "b": {"name": "B", "status": {"baseline": "low"}, "compat_features": ["css.properties.anchor-name"]},
                "c": {"name": "C", "status": {"baseline": "low"}, "compat_features": ["css.properties.anchor-name.x"]}
            }}"#,
        );
        let verdict = index.resolver().resolve("anchor-name");
        assert_eq!(verdict.status, BaselineStatus::Low);
        assert_eq!(contributing_ids(&verdict), vec!["b", "c"]);
        assert_eq!(verdict.feature_names(), "B, C");
        assert!(verdict.is_reportable());
    }

    #[test]
    fn test_no_baseline_only() {
        let index = index(
            r#"{"features": {"vt": {
                "name": "View Transitions",
                "status": {"baseline": false},
                "compat_features": ["css.properties.view-transition-name"]
            }}}"#,
        );
        let verdict = index.resolver().resolve("view-transition-name");
        assert_eq!(verdict.status, BaselineStatus::NoBaseline);
        assert_eq!(verdict.feature_names(), "View Transitions");
    }

    #[test]
    fn test_missing_status_is_no_baseline() {
        let index = index(r#"{"features": {"x": {"compat_features": ["css.properties.zoom"]}}}"#);
        let verdict = index.resolver().resolve("zoom");
        assert_eq!(verdict.status, BaselineStatus::NoBaseline);
        assert_eq!(verdict.feature_names(), "x");
    }

    #[test]
    fn test_lookup_is_exact() {
        let index = index(
            r#"{"features": {"vt": {"status": {"baseline": false}, "compat_features": ["css.properties.view-transition-name"]}}}"#,
        );
        assert_eq!(
            index.resolver().resolve("View-Transition-Name").status,
            BaselineStatus::Unknown
        );
    }

    #[test]
    fn test_status_from_tier() {
        assert_eq!(BaselineStatus::from(BaselineTier::High), BaselineStatus::High);
        assert_eq!(BaselineStatus::from(BaselineTier::Low), BaselineStatus::Low);
        assert_eq!(
            BaselineStatus::from(BaselineTier::NoBaseline),
            BaselineStatus::NoBaseline
        );
    }
}
