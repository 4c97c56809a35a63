//! Anomaly detection error types
//!
//! Error codes:
//! - PGVET_MALFORMED_INDEX_DESCRIPTOR (FATAL)
//!
//! A malformed snapshot is a loader defect, so nothing here is retried and no
//! partial results are returned.

use thiserror::Error;

/// Result type for anomaly detection
pub type AnomalyResult<T> = Result<T, AnomalyError>;

/// Anomaly detection errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnomalyError {
    #[error(
        "malformed index descriptor {index:?} on table {table:?}: \
         {attrs} attributes for {num_columns} indexed columns"
    )]
    MalformedIndexDescriptor {
        index: String,
        table: String,
        attrs: usize,
        num_columns: usize,
    },
}

impl AnomalyError {
    /// Returns the stable error code
    pub fn code(&self) -> &'static str {
        match self {
            AnomalyError::MalformedIndexDescriptor { .. } => "PGVET_MALFORMED_INDEX_DESCRIPTOR",
        }
    }
}
