//! Property name → feature index.

use crate::{
    BaselineDate, BaselineResolver, DatabaseError, DatabaseLocator, FeatureDatabase,
    FeatureDescriptor,
};
use camino::Utf8PathBuf;
use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;
use smol_str::SmolStr;

/// Compat path prefix for CSS properties.
pub const CSS_PROPERTY_PREFIX: &str = "css.properties.";

/// Baseline maturity of a single feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum BaselineTier {
    /// Not yet supported across the core browser set.
    #[default]
    NoBaseline,
    /// Newly available across the core browser set.
    Low,
    /// Widely available.
    High,
}

impl BaselineTier {
    /// Maps a raw `status.baseline` value to a tier.
    ///
    /// Only the strings `"high"` and `"low"` are recognized.
    pub fn from_status_value(value: &serde_json::Value) -> Self {
        match value.as_str() {
            Some("high") => Self::High,
            Some("low") => Self::Low,
            _ => Self::NoBaseline,
        }
    }
}

/// One feature found behind a property name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureRecord {
    /// Feature key in the database.
    pub feature_id: SmolStr,
    /// Display name, or the feature key when the feature has no name.
    pub display_name: SmolStr,
    /// Baseline tier of the feature.
    pub tier: BaselineTier,
    /// When the feature reached low baseline.
    pub baseline_since: Option<BaselineDate>,
}

impl FeatureRecord {
    fn new(feature_id: &str, descriptor: &FeatureDescriptor) -> Self {
        Self {
            feature_id: SmolStr::new(feature_id),
            display_name: SmolStr::new(descriptor.name.as_deref().unwrap_or(feature_id)),
            tier: descriptor.tier(),
            baseline_since: descriptor
                .status
                .as_ref()
                .and_then(|status| status.baseline_low_date),
        }
    }
}

type PropertyMap = IndexMap<SmolStr, Vec<FeatureRecord>, FxBuildHasher>;

/// Immutable lookup table from CSS property name to candidate features.
///
/// Keys keep the order in which properties were first seen in the database.
/// Equality ignores that order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompatibilityIndex {
    properties: PropertyMap,
}

impl CompatibilityIndex {
    /// Returns an index with no properties.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds the index from a feature database.
    ///
    /// A feature is indexed under every property named by one of its
    /// `css.properties.<name>[.<sub-feature>]` compat paths, at most once per
    /// property.
    pub fn build(database: &FeatureDatabase) -> Self {
        let mut properties = PropertyMap::default();

        for (feature_id, descriptor) in database.features() {
            for compat in descriptor.compat_features() {
                let Some(property) = property_name(compat) else {
                    continue;
                };

                let records = properties.entry(SmolStr::new(property)).or_default();
                if records.iter().any(|record| record.feature_id == feature_id) {
                    continue;
                }
                records.push(FeatureRecord::new(feature_id, descriptor));
            }
        }

        tracing::info!(
            features = database.len(),
            properties = properties.len(),
            "Built compatibility index"
        );

        Self { properties }
    }

    /// Returns the records for a property, if it is indexed.
    pub fn get(&self, property: &str) -> Option<&[FeatureRecord]> {
        self.properties.get(property).map(Vec::as_slice)
    }

    /// Returns the number of distinct indexed properties.
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    /// Returns true if no properties are indexed.
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    /// Iterates over indexed properties in first-seen order.
    pub fn properties(&self) -> impl Iterator<Item = (&str, &[FeatureRecord])> {
        self.properties
            .iter()
            .map(|(name, records)| (name.as_str(), records.as_slice()))
    }

    /// Returns a resolver over this index.
    pub fn resolver(&self) -> BaselineResolver<'_> {
        BaselineResolver::new(self)
    }
}

/// Extracts the property name from a `css.properties.*` compat path.
fn property_name(compat: &str) -> Option<&str> {
    compat
        .strip_prefix(CSS_PROPERTY_PREFIX)?
        .split('.')
        .next()
        .filter(|name| !name.is_empty())
}

/// Whether the dataset behind an index could be used.
#[derive(Debug)]
pub enum DatasetState {
    /// The dataset was found and parsed.
    Loaded {
        /// Where it was loaded from.
        path: Utf8PathBuf,
        /// Number of readable features.
        features: usize,
    },
    /// No dataset was found.
    Missing,
    /// A dataset was found but could not be used.
    Invalid {
        /// Where it was looked for.
        path: Utf8PathBuf,
        /// Why it could not be used.
        error: DatabaseError,
    },
}

impl DatasetState {
    /// Returns true if the dataset was loaded.
    pub fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded { .. })
    }
}

/// An index together with the state of the dataset it came from.
///
/// When the dataset is missing or invalid the index is empty and every
/// property resolves to unknown.
#[derive(Debug)]
pub struct LoadedIndex {
    /// The index (empty unless the dataset loaded).
    pub index: CompatibilityIndex,
    /// What happened while loading.
    pub state: DatasetState,
}

impl LoadedIndex {
    /// Locates, reads, and indexes the dataset.
    pub fn load(locator: &DatabaseLocator) -> Self {
        let Some(path) = locator.locate() else {
            tracing::info!("No feature database found; baseline checks are disabled");
            return Self::unavailable(DatasetState::Missing);
        };

        match FeatureDatabase::load(&path) {
            Ok(database) => {
                tracing::debug!(%path, "Loaded feature database");
                Self {
                    index: CompatibilityIndex::build(&database),
                    state: DatasetState::Loaded {
                        path,
                        features: database.len(),
                    },
                }
            }
            Err(error) => {
                tracing::warn!(%path, %error, "Feature database is unusable; baseline checks are disabled");
                Self::unavailable(DatasetState::Invalid { path, error })
            }
        }
    }

    fn unavailable(state: DatasetState) -> Self {
        Self {
            index: CompatibilityIndex::empty(),
            state,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn db(json: &str) -> FeatureDatabase {
        FeatureDatabase::from_json(json).unwrap()
    }

    fn ids(index: &CompatibilityIndex, property: &str) -> Vec<String> {
        index
            .get(property)
            .unwrap_or_default()
            .iter()
            .map(|record| record.feature_id.to_string())
            .collect()
    }

    #[test]
    fn test_property_name() {
        assert_eq!(property_name("css.properties.display"), Some("display"));
        assert_eq!(property_name("css.properties.display.flex"), Some("display"));
        assert_eq!(
            property_name("css.properties.animation.composition"),
            Some("animation")
        );
        assert_eq!(property_name("css.selectors.hover"), None);
        assert_eq!(property_name("api.Element.animate"), None);
        assert_eq!(property_name("css.properties."), None);
        assert_eq!(property_name("css.properties"), None);
    }

    #[test]
    fn test_indexes_sub_feature_paths() {
        let index = CompatibilityIndex::build(&db(
            r#"{"features": {"flex-prop": {
                "status": {"baseline": "high"},
                "compat_features": ["css.properties.display.flex"]
            }}}"#,
        ));
        assert_eq!(ids(&index, "display"), vec!["flex-prop"]);
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn test_mixed_compat_list_keeps_string_paths() {
        let index = CompatibilityIndex::build(&db(
            r#"{"features": {"gap": {
                "status": {"baseline": "low"},
                "compat_features": ["css.properties.gap", 5]
            }}}"#,
        ));
        assert_eq!(ids(&index, "gap"), vec!["gap"]);
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn test_dedups_by_feature_key() {
        let index = CompatibilityIndex::build(&db(
            r#"{"features": {"grid": {
                "name": "Grid",
                "status": {"baseline": "high"},
                "compat_features": [
                    "css.properties.display.grid",
                    "css.properties.display.inline-grid",
                    "css.properties.grid-template-columns",
                    "css.properties.display.grid"
                ]
            }}}"#,
        ));
        assert_eq!(ids(&index, "display"), vec!["grid"]);
        assert_eq!(ids(&index, "grid-template-columns"), vec!["grid"]);
    }

    #[test]
    fn test_keeps_distinct_features_with_same_content() {
        let index = CompatibilityIndex::build(&db(
            r#"{"features": {
                "one": {"name": "Same", "compat_features": ["css.properties.gap"]},
                "two": {"name": "Same", "compat_features": ["css.properties.gap"]}
            }}"#,
        ));
        assert_eq!(ids(&index, "gap"), vec!["one", "two"]);
    }

    #[test]
    fn test_record_fields() {
        let index = CompatibilityIndex::build(&db(
            r#"{"features": {
                "ac": {
                    "name": "Animation Composition",
                    "status": {"baseline": "low", "baseline_low_date": "2023-07-04"},
                    "compat_features": ["css.properties.animation-composition"]
                },
                "nameless": {"compat_features": ["css.properties.zoom"]}
            }}"#,
        ));

        let ac = &index.get("animation-composition").unwrap()[0];
        assert_eq!(ac.display_name, "Animation Composition");
        assert_eq!(ac.tier, BaselineTier::Low);
        assert_eq!(
            ac.baseline_since.map(|date| date.to_string()),
            Some("2023-07-04".to_string())
        );

        let nameless = &index.get("zoom").unwrap()[0];
        assert_eq!(nameless.display_name, "nameless");
        assert_eq!(nameless.tier, BaselineTier::NoBaseline);
        assert_eq!(nameless.baseline_since, None);
    }

    #[test]
    fn test_ignores_non_property_paths() {
        let index = CompatibilityIndex::build(&db(
            r#"{"features": {
                "has": {"compat_features": ["css.selectors.has"]},
                "none": {"name": "No paths"}
            }}"#,
        ));
        assert!(index.is_empty());
    }

    #[test]
    fn test_property_names_are_not_normalized() {
        let index = CompatibilityIndex::build(&db(
            r#"{"features": {"odd": {"compat_features": ["css.properties.Display"]}}}"#,
        ));
        assert!(index.get("Display").is_some());
        assert!(index.get("display").is_none());
    }

    #[test]
    fn test_properties_in_first_seen_order() {
        let index = CompatibilityIndex::build(&db(
            r#"{"features": {
                "b": {"compat_features": ["css.properties.zoom", "css.properties.gap"]},
                "a": {"compat_features": ["css.properties.accent-color", "css.properties.zoom"]}
            }}"#,
        ));
        let names: Vec<&str> = index.properties().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["zoom", "gap", "accent-color"]);
        assert_eq!(ids(&index, "zoom"), vec!["b", "a"]);
    }

    #[test]
    fn test_build_is_idempotent() {
        let database = db(
            r#"{"features": {
                "x": {"status": {"baseline": "low"}, "compat_features": ["css.properties.gap", "css.properties.gap.flex"]},
                "y": {"status": {"baseline": "high"}, "compat_features": ["css.properties.gap"]}
            }}"#,
        );
        assert_eq!(
            CompatibilityIndex::build(&database),
            CompatibilityIndex::build(&database)
        );
    }

    #[test]
    fn test_load_missing_dataset() {
        let dir = tempfile::tempdir().unwrap();
        let root = Utf8PathBuf::try_from(dir.path().to_path_buf()).unwrap();
        let loaded = LoadedIndex::load(
            &DatabaseLocator::default().with_explicit(Some(root.join("absent.json"))),
        );
        assert!(loaded.index.is_empty());
        assert!(matches!(
            loaded.state,
            DatasetState::Invalid {
                error: DatabaseError::Read { .. },
                ..
            }
        ));
    }

    #[test]
    fn test_load_without_any_dataset() {
        let loaded = LoadedIndex::load(&DatabaseLocator::default());
        assert!(loaded.index.is_empty());
        assert!(matches!(loaded.state, DatasetState::Missing));
    }
}
