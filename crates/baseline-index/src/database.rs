//! Raw `web-features` dataset model.
//!
//! The dataset is large and irregular: features may lack a name, a status, or
//! any compat paths, and newer releases add entries of other kinds. Only the
//! top level is strict; every descriptor field is read permissively.

use crate::{BaselineTier, DatabaseError};
use camino::{Utf8Path, Utf8PathBuf};
use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use std::fmt;
use std::fs;
use std::str::FromStr;

/// Environment variable that points at a feature database file.
pub const FEATURES_DB_ENV: &str = "BASELINE_CHECK_FEATURES_DB";

/// Location of the dataset inside an installed `web-features` package.
pub const PACKAGE_DATA_PATH: &str = "node_modules/web-features/data.json";

/// The parsed feature database, in file order.
#[derive(Debug, Clone, Default)]
pub struct FeatureDatabase {
    features: IndexMap<String, FeatureDescriptor>,
}

#[derive(Deserialize)]
struct RawDatabase {
    features: IndexMap<String, serde_json::Value>,
}

impl FeatureDatabase {
    /// Reads and parses a database file.
    pub fn load(path: &Utf8Path) -> Result<Self, DatabaseError> {
        let content = fs::read_to_string(path).map_err(|source| DatabaseError::Read {
            path: path.to_owned(),
            source,
        })?;
        Self::from_json(&content)
    }

    /// Parses a database from JSON text.
    ///
    /// Fails only when the top level is not an object with a `features` map.
    /// Individual descriptors that cannot be read are skipped.
    pub fn from_json(json: &str) -> Result<Self, DatabaseError> {
        let raw: RawDatabase = serde_json::from_str(json)?;
        let mut features = IndexMap::with_capacity(raw.features.len());

        for (key, value) in raw.features {
            match serde_json::from_value::<FeatureDescriptor>(value) {
                Ok(descriptor) => {
                    features.insert(key, descriptor);
                }
                Err(error) => {
                    tracing::debug!(feature = %key, %error, "Skipping unreadable feature descriptor");
                }
            }
        }

        Ok(Self { features })
    }

    /// Returns the number of readable features.
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// Returns true if the database has no readable features.
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Looks up a feature by key.
    pub fn get(&self, key: &str) -> Option<&FeatureDescriptor> {
        self.features.get(key)
    }

    /// Iterates over `(feature key, descriptor)` pairs in file order.
    pub fn features(&self) -> impl Iterator<Item = (&str, &FeatureDescriptor)> {
        self.features.iter().map(|(key, desc)| (key.as_str(), desc))
    }
}

/// A single feature entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FeatureDescriptor {
    /// Human-readable feature name.
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
    /// Baseline status block.
    #[serde(default, deserialize_with = "lenient")]
    pub status: Option<FeatureStatus>,
    /// Dotted capability paths, e.g. `css.properties.display.flex`.
    /// Entries that are not strings are dropped.
    #[serde(default, deserialize_with = "deserialize_compat_features")]
    pub compat_features: Option<Vec<String>>,
}

impl FeatureDescriptor {
    /// Returns the compat paths, or an empty slice when there are none.
    pub fn compat_features(&self) -> &[String] {
        self.compat_features.as_deref().unwrap_or_default()
    }

    /// Returns the baseline tier, defaulting to no baseline.
    pub fn tier(&self) -> BaselineTier {
        self.status
            .as_ref()
            .map_or(BaselineTier::NoBaseline, |status| status.baseline)
    }
}

/// The `status` block of a feature.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FeatureStatus {
    /// `"high"`, `"low"`, or anything else for no baseline.
    #[serde(default, deserialize_with = "deserialize_tier")]
    pub baseline: BaselineTier,
    /// When the feature became newly available.
    #[serde(default, deserialize_with = "deserialize_date")]
    pub baseline_low_date: Option<BaselineDate>,
}

/// A baseline date, possibly given as an upper bound (`≤2020-01-15`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BaselineDate {
    /// The calendar date.
    pub date: NaiveDate,
    /// Whether the date is "on or before" rather than exact.
    pub approximate: bool,
}

impl FromStr for BaselineDate {
    type Err = chrono::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (approximate, date) = match s.strip_prefix('≤') {
            Some(rest) => (true, rest),
            None => (false, s),
        };
        Ok(Self {
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d")?,
            approximate,
        })
    }
}

impl fmt::Display for BaselineDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.approximate {
            write!(f, "≤")?;
        }
        write!(f, "{}", self.date.format("%Y-%m-%d"))
    }
}

/// Deserializes a value, mapping any shape mismatch to `None`.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

fn deserialize_tier<'de, D>(deserializer: D) -> Result<BaselineTier, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(BaselineTier::from_status_value(&value))
}

fn deserialize_compat_features<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let entries = Option::<Vec<serde_json::Value>>::deserialize(deserializer)?;
    Ok(entries.map(|entries| {
        entries
            .into_iter()
            .filter_map(|entry| match entry {
                serde_json::Value::String(path) => Some(path),
                _ => None,
            })
            .collect()
    }))
}

fn deserialize_date<'de, D>(deserializer: D) -> Result<Option<BaselineDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value.as_str().and_then(|s| s.parse().ok()))
}

/// Finds the feature database file.
///
/// Resolution order: an explicit path, the [`FEATURES_DB_ENV`] override, then
/// [`PACKAGE_DATA_PATH`] under the search root or any of its ancestors.
#[derive(Debug, Clone, Default)]
pub struct DatabaseLocator {
    explicit: Option<Utf8PathBuf>,
    env_override: Option<Utf8PathBuf>,
    search_root: Option<Utf8PathBuf>,
}

impl DatabaseLocator {
    /// Creates a locator that searches upward from `search_root`.
    pub fn new(search_root: impl Into<Utf8PathBuf>) -> Self {
        Self {
            search_root: Some(search_root.into()),
            ..Default::default()
        }
    }

    /// Uses this path instead of searching.
    pub fn with_explicit(mut self, path: Option<Utf8PathBuf>) -> Self {
        self.explicit = path;
        self
    }

    /// Sets the environment override (normally the value of [`FEATURES_DB_ENV`]).
    pub fn with_env_override(mut self, value: Option<String>) -> Self {
        self.env_override = value
            .filter(|v| !v.trim().is_empty())
            .map(Utf8PathBuf::from);
        self
    }

    /// Reads the override from the process environment.
    pub fn with_process_env(self) -> Self {
        self.with_env_override(std::env::var(FEATURES_DB_ENV).ok())
    }

    /// Returns the path to load, if any.
    ///
    /// Explicit and environment paths are returned even when they do not exist,
    /// so that loading reports why they could not be used.
    pub fn locate(&self) -> Option<Utf8PathBuf> {
        if let Some(path) = self.explicit.as_ref().or(self.env_override.as_ref()) {
            return Some(path.clone());
        }

        let root = self.search_root.as_deref()?;
        root.ancestors()
            .map(|dir| dir.join(PACKAGE_DATA_PATH))
            .find(|candidate| candidate.is_file())
    }
}
