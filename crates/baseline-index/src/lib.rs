//! Baseline compatibility index for CSS properties.
//!
//! This crate turns the `web-features` dataset into a flat lookup table keyed by
//! CSS property name, and resolves a single baseline verdict for a property:
//! - [`FeatureDatabase`] reads the raw `data.json` permissively
//! - [`CompatibilityIndex`] maps property names to the features behind them
//! - [`BaselineResolver`] picks one verdict using a fixed precedence
//!
//! # Example
//!
//! ```
//! use baseline_index::{BaselineStatus, CompatibilityIndex, FeatureDatabase};
//!
//! let db = FeatureDatabase::from_json(r#"{
//!     "features": {
//!         "vt": {
//!             "name": "View Transitions",
//!             "status": { "baseline": false },
//!             "compat_features": ["css.properties.view-transition-name"]
//!         }
//!     }
//! }"#).unwrap();
//!
//! let index = CompatibilityIndex::build(&db);
//! let verdict = index.resolver().resolve("view-transition-name");
//! assert_eq!(verdict.status, BaselineStatus::NoBaseline);
//! assert_eq!(verdict.feature_names(), "View Transitions");
//! ```

mod database;
mod error;
mod index;
mod resolver;

pub use database::{
    BaselineDate, DatabaseLocator, FeatureDatabase, FeatureDescriptor, FeatureStatus,
    FEATURES_DB_ENV, PACKAGE_DATA_PATH,
};
pub use error::DatabaseError;
pub use index::{
    BaselineTier, CompatibilityIndex, DatasetState, FeatureRecord, LoadedIndex,
    CSS_PROPERTY_PREFIX,
};
pub use resolver::{BaselineResolver, BaselineStatus, Verdict};
