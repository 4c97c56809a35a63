//! Report ordering for detector output
//!
//! Ranking never changes which indexes were classified; it only filters the
//! unused list for relevance and fixes a total order so that reports are
//! reproducible. All sorts are stable.

use std::cmp::Ordering;

use crate::catalog::{Bytes, Index, IndexKind};

use super::redundant::RedundantPair;

/// Orders members of each set by name descending, then the sets by table
/// name, breaking ties by the name of each set's first member.
pub fn rank_duplicate_sets(mut sets: Vec<Vec<&Index>>) -> Vec<Vec<&Index>> {
    for set in &mut sets {
        set.sort_by(|a, b| b.name.cmp(&a.name));
    }
    sets.sort_by(|a, b| match (a.first(), b.first()) {
        (Some(x), Some(y)) => x
            .table_name
            .cmp(&y.table_name)
            .then_with(|| x.name.cmp(&y.name))
            .then_with(|| x.oid.cmp(&y.oid)),
        _ => a.len().cmp(&b.len()),
    });
    sets
}

/// Orders pairs by the size of the redundant index, largest first.
pub fn rank_redundant_pairs(mut pairs: Vec<RedundantPair<'_>>) -> Vec<RedundantPair<'_>> {
    pairs.sort_by(|a, b| b.subsumed.size.cmp(&a.subsumed.size));
    pairs
}

/// Reports whether an unused index is worth listing.
///
/// Unique non-primary indexes enforce a constraint and are never listed;
/// small or nearly empty indexes are not worth the noise.
pub fn is_relevant_unused(ind: &Index, min_size: Bytes, min_rows: i64) -> bool {
    ind.kind() != IndexKind::Unique && ind.size >= min_size && ind.num_rows >= min_rows
}

/// Filters the raw unused list for relevance, then puts non-primary-key
/// indexes first, each group by decreasing size.
pub fn rank_unused_for_report<'a>(
    unused: Vec<&'a Index>,
    min_size: Bytes,
    min_rows: i64,
) -> Vec<&'a Index> {
    let mut relevant: Vec<&Index> = unused
        .into_iter()
        .filter(|ind| is_relevant_unused(ind, min_size, min_rows))
        .collect();
    relevant.sort_by(|a, b| match (a.is_primary, b.is_primary) {
        (false, true) => Ordering::Less,
        (true, false) => Ordering::Greater,
        _ => b.size.cmp(&a.size),
    });
    relevant
}
