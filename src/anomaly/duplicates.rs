//! Duplicate index detection
//!
//! Partitions a snapshot into classes of structurally equivalent indexes and
//! keeps the classes with at least two members. All but one index in each
//! set is superfluous.

use crate::catalog::Index;

use super::errors::AnomalyResult;
use super::validate::validate_snapshot;

/// Finds sets of indexes that are exact duplicates of one another.
///
/// Each pass takes the first remaining index as a pivot and splits the
/// remainder into those equivalent to it and the rest. Sets are returned in
/// order of their pivot's position in `indexes`, and members keep their
/// input order. Quadratic in the worst case.
pub fn find_duplicate_index_sets(indexes: &[Index]) -> AnomalyResult<Vec<Vec<&Index>>> {
    validate_snapshot(indexes)?;

    let mut sets = Vec::new();
    let mut rest: Vec<&Index> = indexes.iter().collect();

    while let Some(&pivot) = rest.first() {
        let (duplicates, others): (Vec<&Index>, Vec<&Index>) =
            rest.into_iter().partition(|ind| pivot.equivalent_to(ind));
        if duplicates.len() >= 2 {
            sets.push(duplicates);
        }
        rest = others;
    }

    Ok(sets)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index(oid: u32, name: &str, table_oid: u32, keys: &[i16]) -> Index {
        let mut ind = Index::new(oid, name, table_oid, format!("t{}", table_oid));
        ind.num_columns = keys.len();
        ind.keys = keys.to_vec();
        ind.attrs = keys.iter().map(|k| format!("c{}", k)).collect();
        ind
    }

    fn names(set: &[&Index]) -> Vec<String> {
        set.iter().map(|ind| ind.name.clone()).collect()
    }

    #[test]
    fn test_empty_input() {
        assert!(find_duplicate_index_sets(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_singletons_dropped() {
        let indexes = vec![index(1, "a", 1, &[1]), index(2, "b", 1, &[2])];
        assert!(find_duplicate_index_sets(&indexes).unwrap().is_empty());
    }

    #[test]
    fn test_pivot_and_members_keep_input_order() {
        let indexes = vec![
            index(1, "a", 1, &[1]),
            index(2, "b", 1, &[2]),
            index(3, "c", 1, &[1]),
            index(4, "d", 1, &[2]),
            index(5, "e", 1, &[1]),
        ];
        let sets = find_duplicate_index_sets(&indexes).unwrap();
        assert_eq!(sets.len(), 2);
        assert_eq!(names(&sets[0]), vec!["a", "c", "e"]);
        assert_eq!(names(&sets[1]), vec!["b", "d"]);
    }

    #[test]
    fn test_malformed_input_fails() {
        let mut bad = index(1, "bad", 1, &[1, 2]);
        bad.attrs.truncate(1);
        let indexes = vec![index(2, "good", 1, &[1]), bad];
        assert!(find_duplicate_index_sets(&indexes).is_err());
    }
}
