//! JSON snapshot files
//!
//! A snapshot is the loaded index list serialized as a JSON array, so a
//! catalog can be captured once on production and analyzed elsewhere.

use std::fs;
use std::io::Write;
use std::path::Path;

use crate::catalog::Index;
use crate::observability::{log_event_with_fields, Event};

use super::errors::{LoaderError, LoaderResult};

/// Reads index descriptors from a JSON snapshot file.
pub fn load_snapshot(path: &Path) -> LoaderResult<Vec<Index>> {
    let display = path.display().to_string();
    let content = fs::read_to_string(path).map_err(|source| LoaderError::SnapshotIo {
        path: display.clone(),
        source,
    })?;
    let indexes: Vec<Index> =
        serde_json::from_str(&content).map_err(|source| LoaderError::SnapshotFormat {
            path: display.clone(),
            source,
        })?;

    let count = indexes.len().to_string();
    log_event_with_fields(
        Event::SnapshotLoaded,
        &[("indexes", count.as_str()), ("path", display.as_str())],
    );
    Ok(indexes)
}

/// Writes index descriptors as pretty-printed JSON.
pub fn write_snapshot<W: Write>(writer: &mut W, indexes: &[Index]) -> LoaderResult<()> {
    serde_json::to_writer_pretty(&mut *writer, indexes).map_err(|source| {
        LoaderError::SnapshotFormat {
            path: "<output>".to_string(),
            source,
        }
    })?;
    writeln!(writer).map_err(|source| LoaderError::SnapshotIo {
        path: "<output>".to_string(),
        source,
    })
}

/// Writes index descriptors to a snapshot file, replacing it if present.
pub fn save_snapshot(path: &Path, indexes: &[Index]) -> LoaderResult<()> {
    let display = path.display().to_string();
    let mut file = fs::File::create(path).map_err(|source| LoaderError::SnapshotIo {
        path: display.clone(),
        source,
    })?;
    write_snapshot(&mut file, indexes)?;

    let count = indexes.len().to_string();
    log_event_with_fields(
        Event::SnapshotWritten,
        &[("indexes", count.as_str()), ("path", display.as_str())],
    );
    Ok(())
}
