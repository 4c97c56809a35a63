//! Catalog loading for pgvet
//!
//! Produces the immutable index list that the detectors analyze, either from
//! a live PostgreSQL catalog or from a JSON snapshot file.
//!
//! # Invariants
//!
//! - Only live, valid indexes are loaded
//! - Every loaded index has one attribute per key position; an unresolvable
//!   key fails the whole load

mod attrs;
mod catalog;
mod errors;
mod snapshot;

pub use attrs::{resolve_attrs, split_exprs, ColumnsByTable, TableColumns};
pub use catalog::CatalogLoader;
pub use errors::{LoaderError, LoaderResult};
pub use snapshot::{load_snapshot, save_snapshot, write_snapshot};
