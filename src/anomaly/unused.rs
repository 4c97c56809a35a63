//! Unused index detection

use crate::catalog::Index;

use super::errors::AnomalyResult;
use super::validate::validate_snapshot;

/// Reports whether `ind` was scanned at most `cutoff` times.
pub fn is_unused(ind: &Index, cutoff: i64) -> bool {
    ind.num_scans <= cutoff
}

/// Returns the indexes whose statistics show at most `cutoff` scans, in
/// input order. Such indexes are possibly superfluous.
pub fn find_unused_indexes(indexes: &[Index], cutoff: i64) -> AnomalyResult<Vec<&Index>> {
    validate_snapshot(indexes)?;
    Ok(indexes.iter().filter(|ind| is_unused(ind, cutoff)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index(oid: u32, scans: i64) -> Index {
        let mut ind = Index::new(oid, format!("idx{}", oid), 1, "events");
        ind.num_scans = scans;
        ind
    }

    #[test]
    fn test_cutoff_is_inclusive() {
        assert!(is_unused(&index(1, 10), 10));
        assert!(!is_unused(&index(2, 11), 10));
        assert!(is_unused(&index(3, 0), 0));
    }

    #[test]
    fn test_filter_keeps_input_order() {
        let indexes = vec![index(1, 3), index(2, 500), index(3, 0), index(4, 10)];
        let unused = find_unused_indexes(&indexes, 10).unwrap();
        let oids: Vec<u32> = unused.iter().map(|ind| ind.oid.0).collect();
        assert_eq!(oids, vec![1, 3, 4]);
    }
}
