//! Catalog loader error types

use std::io;

use thiserror::Error;

use crate::catalog::Oid;

/// Result type for loader operations
pub type LoaderResult<T> = Result<T, LoaderError>;

/// Loader errors
#[derive(Debug, Error)]
pub enum LoaderError {
    #[error("database error: {0}")]
    Database(#[from] postgres::Error),

    #[error("index {index:?} ({oid}): no expression for key #{position} (value:0)")]
    MissingExpression {
        index: String,
        oid: Oid,
        position: usize,
    },

    #[error("index {index:?} ({oid}): no column ref found for key #{position} ({key})")]
    MissingColumn {
        index: String,
        oid: Oid,
        position: usize,
        key: i16,
    },

    #[error("snapshot {path}: {source}")]
    SnapshotIo {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("snapshot {path}: invalid JSON: {source}")]
    SnapshotFormat {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

impl LoaderError {
    /// Returns the stable error code
    pub fn code(&self) -> &'static str {
        match self {
            LoaderError::Database(_) => "PGVET_LOADER_DATABASE",
            LoaderError::MissingExpression { .. } | LoaderError::MissingColumn { .. } => {
                "PGVET_LOADER_UNRESOLVED_KEY"
            }
            LoaderError::SnapshotIo { .. } => "PGVET_LOADER_SNAPSHOT_IO",
            LoaderError::SnapshotFormat { .. } => "PGVET_LOADER_SNAPSHOT_FORMAT",
        }
    }
}
