//! Catalog subsystem for pgvet
//!
//! Index descriptors as read from one catalog snapshot.
//!
//! # Invariants
//!
//! - `attrs.len() == num_columns` (checked by the detectors, not here)
//! - `is_primary` implies `is_unique`
//! - `oid` is unique within a snapshot

mod bytes;
mod types;

pub use bytes::{Bytes, GIB, KIB, MIB, TIB};
pub use types::{Index, IndexKind, Oid};
