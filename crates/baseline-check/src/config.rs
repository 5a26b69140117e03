//! Configuration loading.

use baseline_diagnostics::{Severity, BASELINE_CHECK};
use camino::{Utf8Path, Utf8PathBuf};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use thiserror::Error;

/// Config file looked up in the workspace root.
pub const CONFIG_FILE: &str = ".baselinerc.json";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config {path}: {source}")]
    Read {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid.
    #[error("invalid config {path}: {source}")]
    Parse {
        path: Utf8PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Project configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct BaselineConfig {
    /// Per-rule settings keyed by rule id.
    #[serde(default)]
    pub rules: BTreeMap<String, RuleSetting>,

    /// Path to the feature database, relative to the workspace.
    #[serde(default)]
    pub features_db: Option<Utf8PathBuf>,

    /// Extra glob patterns to ignore.
    #[serde(default)]
    pub ignore: Vec<String>,
}

/// A rule's level: `0`/`"off"`, `1`/`"warn"`, or `2`/`"error"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "serde_json::Value")]
pub enum RuleSetting {
    Off,
    Warn,
    Error,
}

impl RuleSetting {
    /// Returns the severity to report at, or `None` when the rule is off.
    pub fn severity(self) -> Option<Severity> {
        match self {
            RuleSetting::Off => None,
            RuleSetting::Warn => Some(Severity::Warning),
            RuleSetting::Error => Some(Severity::Error),
        }
    }
}

impl TryFrom<serde_json::Value> for RuleSetting {
    type Error = String;

    fn try_from(value: serde_json::Value) -> Result<Self, String> {
        use serde_json::Value;

        match &value {
            Value::Bool(false) => Ok(RuleSetting::Off),
            Value::Bool(true) => Ok(RuleSetting::Warn),
            Value::Number(n) => match n.as_u64() {
                Some(0) => Ok(RuleSetting::Off),
                Some(1) => Ok(RuleSetting::Warn),
                Some(2) => Ok(RuleSetting::Error),
                _ => Err(format!("invalid rule level {value}, expected 0, 1 or 2")),
            },
            Value::String(s) => match s.as_str() {
                "off" => Ok(RuleSetting::Off),
                "warn" | "warning" => Ok(RuleSetting::Warn),
                "error" => Ok(RuleSetting::Error),
                _ => Err(format!(
                    "invalid rule level {value}, expected \"off\", \"warn\" or \"error\""
                )),
            },
            _ => Err(format!("invalid rule level {value}")),
        }
    }
}

impl BaselineConfig {
    /// Loads configuration from an explicit path, or from [`CONFIG_FILE`] in
    /// the workspace if it exists.
    pub fn load(workspace: &Utf8Path, explicit: Option<&Utf8Path>) -> Result<Self, ConfigError> {
        let path = match explicit {
            Some(path) => path.to_owned(),
            None => {
                let path = workspace.join(CONFIG_FILE);
                if !path.is_file() {
                    tracing::debug!(%workspace, "No config file found");
                    return Ok(Self::default());
                }
                path
            }
        };

        let content = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        let config = Self::from_json(&content)
            .map_err(|source| ConfigError::Parse { path: path.clone(), source })?;

        tracing::info!(%path, rules = config.rules.len(), "Loaded config");
        Ok(config)
    }

    /// Parses configuration from JSON text.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let config: Self = serde_json::from_str(json)?;
        for rule in config.rules.keys() {
            if rule != BASELINE_CHECK.id {
                tracing::warn!(rule = %rule, "Ignoring setting for unknown rule");
            }
        }
        Ok(config)
    }

    /// Returns the severity of the baseline rule, or `None` when it is off.
    pub fn baseline_severity(&self) -> Option<Severity> {
        self.rules
            .get(BASELINE_CHECK.id)
            .map_or(Some(Severity::Warning), |setting| setting.severity())
    }

    /// Returns the configured database path, resolved against the workspace.
    pub fn features_db(&self, workspace: &Utf8Path) -> Option<Utf8PathBuf> {
        self.features_db.as_ref().map(|path| workspace.join(path))
    }
}
