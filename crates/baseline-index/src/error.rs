//! Feature database error types.

use camino::Utf8PathBuf;
use thiserror::Error;

/// An error that occurred while loading the feature database.
///
/// These never escape a lint run: [`LoadedIndex`](crate::LoadedIndex) turns them
/// into an empty index and records them in its dataset state.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// The database file could not be read.
    #[error("failed to read feature database {path}: {source}")]
    Read {
        /// The path that was read.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The database is not valid JSON or has no `features` map.
    #[error("malformed feature database: {0}")]
    Malformed(#[from] serde_json::Error),
}
