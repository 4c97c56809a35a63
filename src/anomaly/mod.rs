//! Index anomaly detection for pgvet
//!
//! Classifies the indexes of one catalog snapshot into three categories:
//!
//! - Duplicate sets: structurally equivalent indexes on the same table
//! - Redundant pairs: an index whose attributes prefix a longer one's
//! - Unused indexes: scanned at most a cutoff number of times
//!
//! # Design Principles
//!
//! - Pure: no I/O, input is borrowed and never mutated
//! - Independent: each detector reads the snapshot on its own
//! - Deterministic: ranked output depends only on the snapshot contents
//!
//! # Invariants
//!
//! - Every detector rejects a descriptor whose `attrs` length differs from
//!   `num_columns` before doing any work
//! - Duplicate sets are pairwise disjoint and have at least two members
//! - Primary keys and unique indexes never appear in a redundant pair

mod duplicates;
mod errors;
mod ranking;
mod redundant;
mod unused;
mod validate;

pub use duplicates::find_duplicate_index_sets;
pub use errors::{AnomalyError, AnomalyResult};
pub use ranking::{
    is_relevant_unused, rank_duplicate_sets, rank_redundant_pairs, rank_unused_for_report,
};
pub use redundant::{find_redundant_index_pairs, is_redundant_index, RedundantPair};
pub use unused::{find_unused_indexes, is_unused};
pub use validate::validate_snapshot;

use crate::catalog::{Bytes, Index};

/// Operator-chosen thresholds for the unused index report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Thresholds {
    /// Indexes scanned at most this many times count as unused
    pub unused_scans_cutoff: i64,
    /// Unused indexes smaller than this are not reported
    pub min_index_size: Bytes,
    /// Unused indexes with fewer rows than this are not reported
    pub min_index_rows: i64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            unused_scans_cutoff: 10,
            min_index_size: Bytes::from_mib(1),
            min_index_rows: 10,
        }
    }
}

/// Ranked detector output for one snapshot
#[derive(Debug, Clone)]
pub struct Findings<'a> {
    /// Duplicate sets, ordered by table then index name
    pub duplicate_sets: Vec<Vec<&'a Index>>,
    /// Redundant pairs, largest redundant index first
    pub redundant_pairs: Vec<RedundantPair<'a>>,
    /// Raw unused list, before relevance filtering
    pub unused: Vec<&'a Index>,
    /// Unused indexes worth reporting, non-primary keys first
    pub relevant_unused: Vec<&'a Index>,
}

impl<'a> Findings<'a> {
    /// Runs every detector over `indexes` and ranks the results.
    ///
    /// A malformed snapshot fails as a whole; nothing is partially reported.
    pub fn analyze(indexes: &'a [Index], thresholds: &Thresholds) -> AnomalyResult<Self> {
        let duplicate_sets = rank_duplicate_sets(find_duplicate_index_sets(indexes)?);
        let redundant_pairs = rank_redundant_pairs(find_redundant_index_pairs(indexes)?);
        let unused = find_unused_indexes(indexes, thresholds.unused_scans_cutoff)?;
        let relevant_unused = rank_unused_for_report(
            unused.clone(),
            thresholds.min_index_size,
            thresholds.min_index_rows,
        );

        Ok(Self {
            duplicate_sets,
            redundant_pairs,
            unused,
            relevant_unused,
        })
    }
}
