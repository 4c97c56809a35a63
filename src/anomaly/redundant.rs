//! Redundant index detection
//!
//! An index is redundant with respect to another on the same table when its
//! attributes are a strict prefix of the other's, their predicates match and
//! they agree on uniqueness. The longer index can satisfy every plan the
//! shorter one can.
//!
//! Primary keys and unique indexes are left out entirely: dropping one
//! changes which constraints are enforced, not just plan coverage.
//!
//! # Determinism
//!
//! Tables are visited in ascending oid order. Within a table, indexes are
//! ordered by (attribute count, name, oid), and each index is paired with
//! the first subsuming index in that order, i.e. the shortest superset, with
//! ties going to the alphabetically first name.

use std::collections::BTreeMap;

use crate::catalog::{Index, Oid};

use super::errors::AnomalyResult;
use super::validate::validate_snapshot;

/// An index made redundant by a longer one
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RedundantPair<'a> {
    /// The prefix index that can be dropped
    pub subsumed: &'a Index,
    /// The index that covers it
    pub subsuming: &'a Index,
}

/// Reports whether `ind1` is redundant with respect to `ind2`.
pub fn is_redundant_index(ind1: &Index, ind2: &Index) -> bool {
    ind1.is_unique == ind2.is_unique && ind1.pred == ind2.pred && ind1.is_prefix_of(ind2)
}

/// Finds pairs where the first index is made redundant by the second.
///
/// Each index appears at most once as the subsumed side.
pub fn find_redundant_index_pairs(indexes: &[Index]) -> AnomalyResult<Vec<RedundantPair<'_>>> {
    validate_snapshot(indexes)?;

    // Group by table so only small sets are compared.
    let mut by_table: BTreeMap<Oid, Vec<&Index>> = BTreeMap::new();
    for ind in indexes {
        if !ind.is_primary && !ind.is_unique {
            by_table.entry(ind.table_oid).or_default().push(ind);
        }
    }

    let mut pairs = Vec::new();
    for group in by_table.values_mut() {
        group.sort_by(|a, b| {
            a.attrs
                .len()
                .cmp(&b.attrs.len())
                .then_with(|| a.name.cmp(&b.name))
                .then_with(|| a.oid.cmp(&b.oid))
        });

        for &ind1 in group.iter() {
            let subsuming = group
                .iter()
                .find(|&&ind2| ind1.oid != ind2.oid && is_redundant_index(ind1, ind2));
            if let Some(&ind2) = subsuming {
                pairs.push(RedundantPair {
                    subsumed: ind1,
                    subsuming: ind2,
                });
            }
        }
    }

    Ok(pairs)
}
