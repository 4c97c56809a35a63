//! Anomaly Detection Tests
//!
//! Tests for detector invariants:
//! - Duplicate sets partition equivalent indexes and never cross tables
//! - Primary keys and unique indexes never appear in a redundant pair
//! - The unused cutoff is inclusive
//! - Ranked output is independent of input order
//! - Malformed descriptors fail the whole run

use pgvet::anomaly::{
    find_duplicate_index_sets, find_redundant_index_pairs, find_unused_indexes,
    rank_unused_for_report, AnomalyError, Findings, Thresholds,
};
use pgvet::catalog::{Bytes, Index};

// =============================================================================
// Helper Functions
// =============================================================================

fn make_index(oid: u32, name: &str, table_oid: u32, table: &str, keys: &[i16]) -> Index {
    let mut ind = Index::new(oid, name, table_oid, table);
    ind.num_columns = keys.len();
    ind.keys = keys.to_vec();
    ind.attrs = keys.iter().map(|k| format!("col{}", k)).collect();
    ind.classes = vec![Default::default(); keys.len()];
    ind.collations = vec![Default::default(); keys.len()];
    ind.options = vec![0; keys.len()];
    ind
}

fn unused_index(oid: u32, name: &str, mib: i64, primary: bool) -> Index {
    let mut ind = make_index(oid, name, 100, "events", &[1]);
    ind.is_primary = primary;
    ind.is_unique = primary;
    ind.size = Bytes::from_mib(mib);
    ind.num_rows = 50_000;
    ind
}

fn names(inds: &[&Index]) -> Vec<String> {
    inds.iter().map(|ind| ind.name.clone()).collect()
}

fn sorted_names(inds: &[&Index]) -> Vec<String> {
    let mut out = names(inds);
    out.sort();
    out
}

// =============================================================================
// Duplicate Detection Tests
// =============================================================================

/// Two identical indexes form one set; a shorter one is left out.
#[test]
fn test_duplicate_pair_excludes_prefix() {
    let indexes = vec![
        make_index(1, "idx1", 10, "t", &[1, 2]),
        make_index(2, "idx2", 10, "t", &[1, 2]),
        make_index(3, "idx3", 10, "t", &[1]),
    ];

    let sets = find_duplicate_index_sets(&indexes).unwrap();
    assert_eq!(sets.len(), 1);
    assert_eq!(sorted_names(&sets[0]), vec!["idx1", "idx2"]);
}

/// Identical definitions on different tables are not duplicates.
#[test]
fn test_duplicates_never_cross_tables() {
    let indexes = vec![
        make_index(1, "a_email", 10, "a", &[1]),
        make_index(2, "b_email", 20, "b", &[1]),
    ];

    assert!(find_duplicate_index_sets(&indexes).unwrap().is_empty());
}

/// Three equivalent indexes form a single set, not overlapping pairs.
#[test]
fn test_duplicate_sets_are_disjoint() {
    let indexes = vec![
        make_index(1, "x1", 10, "t", &[3]),
        make_index(2, "y1", 10, "t", &[4]),
        make_index(3, "x2", 10, "t", &[3]),
        make_index(4, "y2", 10, "t", &[4]),
        make_index(5, "x3", 10, "t", &[3]),
    ];

    let sets = find_duplicate_index_sets(&indexes).unwrap();
    assert_eq!(sets.len(), 2);

    let total: usize = sets.iter().map(Vec::len).sum();
    assert_eq!(total, 5);
    assert!(sets.iter().all(|set| set.len() >= 2));
}

/// Differing predicates or uniqueness break equivalence.
#[test]
fn test_duplicate_requires_same_predicate_and_uniqueness() {
    let base = make_index(1, "base", 10, "t", &[1]);

    let mut partial = make_index(2, "partial", 10, "t", &[1]);
    partial.pred = "(deleted_at IS NULL)".into();

    let mut unique = make_index(3, "unique", 10, "t", &[1]);
    unique.is_unique = true;

    let indexes = vec![base, partial, unique];
    assert!(find_duplicate_index_sets(&indexes).unwrap().is_empty());
}

// =============================================================================
// Redundant Detection Tests
// =============================================================================

/// A single-column index prefixing a two-column one is redundant.
#[test]
fn test_redundant_prefix_pair() {
    let mut a = make_index(1, "idx_a", 10, "t", &[1]);
    a.attrs = vec!["x".into()];
    let mut b = make_index(2, "idx_b", 10, "t", &[1, 2]);
    b.attrs = vec!["x".into(), "y".into()];
    let indexes = vec![a, b];

    let pairs = find_redundant_index_pairs(&indexes).unwrap();
    assert_eq!(pairs.len(), 1);
    assert_eq!(pairs[0].subsumed.name, "idx_a");
    assert_eq!(pairs[0].subsuming.name, "idx_b");
}

/// A primary key on either side suppresses the pair.
#[test]
fn test_redundant_excludes_primary_key() {
    let a = make_index(1, "idx_a", 10, "t", &[1]);
    let mut b = make_index(2, "idx_b", 10, "t", &[1, 2]);
    b.is_primary = true;
    b.is_unique = true;
    let indexes = vec![a, b];

    assert!(find_redundant_index_pairs(&indexes).unwrap().is_empty());
}

/// Two unique indexes are never paired, even when one prefixes the other.
#[test]
fn test_redundant_excludes_unique_indexes() {
    let mut u_x = make_index(1, "u_x", 10, "t", &[1]);
    u_x.is_unique = true;
    u_x.attrs = vec!["x".into()];
    let mut u_xy = make_index(2, "u_xy", 10, "t", &[1, 2]);
    u_xy.is_unique = true;
    u_xy.attrs = vec!["x".into(), "y".into()];
    let indexes = vec![u_x, u_xy];

    assert!(find_redundant_index_pairs(&indexes).unwrap().is_empty());
}

/// A unique prefix of a primary key is kept, though both enforce uniqueness.
#[test]
fn test_redundant_excludes_unique_prefix_of_primary_key() {
    let mut u_x = make_index(1, "u_x", 10, "t", &[1]);
    u_x.is_unique = true;
    u_x.attrs = vec!["x".into()];
    let mut pkey = make_index(2, "t_pkey", 10, "t", &[1, 2]);
    pkey.is_unique = true;
    pkey.is_primary = true;
    pkey.attrs = vec!["x".into(), "y".into()];
    let indexes = vec![u_x, pkey];

    assert!(find_redundant_index_pairs(&indexes).unwrap().is_empty());
}

/// Equal-length indexes are duplicates, not redundant.
#[test]
fn test_redundant_requires_strict_prefix() {
    let indexes = vec![
        make_index(1, "a", 10, "t", &[1, 2]),
        make_index(2, "b", 10, "t", &[1, 2]),
    ];

    assert!(find_redundant_index_pairs(&indexes).unwrap().is_empty());
}

/// The shortest superset is chosen as the subsuming index.
#[test]
fn test_redundant_picks_shortest_superset() {
    let indexes = vec![
        make_index(1, "wide", 10, "t", &[1, 2, 3]),
        make_index(2, "narrow", 10, "t", &[1]),
        make_index(3, "mid", 10, "t", &[1, 2]),
    ];

    let pairs = find_redundant_index_pairs(&indexes).unwrap();
    let narrow = pairs
        .iter()
        .find(|p| p.subsumed.name == "narrow")
        .unwrap();
    assert_eq!(narrow.subsuming.name, "mid");
    assert_eq!(pairs.len(), 2);
}

// =============================================================================
// Unused Detection Tests
// =============================================================================

/// The scan cutoff is inclusive.
#[test]
fn test_unused_cutoff_boundary() {
    let mut at_cutoff = make_index(1, "at_cutoff", 10, "t", &[1]);
    at_cutoff.num_scans = 10;
    let mut above = make_index(2, "above", 10, "t", &[2]);
    above.num_scans = 11;
    let indexes = vec![at_cutoff, above];

    let unused = find_unused_indexes(&indexes, 10).unwrap();
    assert_eq!(names(&unused), vec!["at_cutoff"]);
}

/// Non-primary keys come first, each group by decreasing size.
#[test]
fn test_relevant_unused_order() {
    let indexes = vec![
        unused_index(1, "A", 5, false),
        unused_index(2, "B", 50, false),
        unused_index(3, "C", 100, true),
    ];

    let unused = find_unused_indexes(&indexes, 10).unwrap();
    let ranked = rank_unused_for_report(unused, Bytes::from_mib(1), 0);
    assert_eq!(names(&ranked), vec!["B", "A", "C"]);
}

/// Unique constraints, small indexes and sparse indexes are filtered out.
#[test]
fn test_relevant_unused_filters() {
    let mut unique = unused_index(1, "unique", 50, false);
    unique.is_unique = true;
    let small = unused_index(2, "small", 0, false);
    let mut sparse = unused_index(3, "sparse", 50, false);
    sparse.num_rows = 3;
    let keep = unused_index(4, "keep", 50, false);
    let indexes = vec![unique, small, sparse, keep];

    let findings = Findings::analyze(&indexes, &Thresholds::default()).unwrap();
    assert_eq!(findings.unused.len(), 4);
    assert_eq!(names(&findings.relevant_unused), vec!["keep"]);
}

// =============================================================================
// Determinism Tests
// =============================================================================

fn mixed_snapshot() -> Vec<Index> {
    let mut indexes = vec![
        make_index(11, "orders_a", 10, "orders", &[1]),
        make_index(12, "orders_b", 10, "orders", &[1]),
        make_index(13, "orders_ab", 10, "orders", &[1, 2]),
        make_index(21, "users_x", 20, "users", &[1]),
        make_index(22, "users_y", 20, "users", &[1]),
        make_index(23, "users_xy", 20, "users", &[1, 2]),
        make_index(24, "users_xyz", 20, "users", &[1, 2, 3]),
    ];
    for (i, ind) in indexes.iter_mut().enumerate() {
        ind.size = Bytes::from_mib(i as i64 + 1);
        ind.num_rows = 1000;
    }
    indexes
}

fn summarize(findings: &Findings<'_>) -> (Vec<Vec<String>>, Vec<(String, String)>, Vec<String>) {
    (
        findings.duplicate_sets.iter().map(|s| names(s)).collect(),
        findings
            .redundant_pairs
            .iter()
            .map(|p| (p.subsumed.name.clone(), p.subsuming.name.clone()))
            .collect(),
        names(&findings.relevant_unused),
    )
}

/// Repeated runs over the same snapshot give identical findings.
#[test]
fn test_repeated_runs_identical() {
    let indexes = mixed_snapshot();
    let first = summarize(&Findings::analyze(&indexes, &Thresholds::default()).unwrap());

    for _ in 0..5 {
        let again = summarize(&Findings::analyze(&indexes, &Thresholds::default()).unwrap());
        assert_eq!(first, again);
    }
}

/// Input order does not change ranked findings.
#[test]
fn test_input_order_irrelevant() {
    let forward = mixed_snapshot();
    let mut reversed = mixed_snapshot();
    reversed.reverse();
    let mut rotated = mixed_snapshot();
    rotated.rotate_left(3);

    let expected = summarize(&Findings::analyze(&forward, &Thresholds::default()).unwrap());
    for indexes in [&reversed, &rotated] {
        let got = summarize(&Findings::analyze(indexes, &Thresholds::default()).unwrap());
        assert_eq!(expected, got);
    }
}

/// Duplicate sets are ordered by table, members by name descending.
#[test]
fn test_duplicate_set_order() {
    let indexes = mixed_snapshot();
    let findings = Findings::analyze(&indexes, &Thresholds::default()).unwrap();

    let sets: Vec<Vec<String>> = findings.duplicate_sets.iter().map(|s| names(s)).collect();
    assert_eq!(
        sets,
        vec![
            vec!["orders_b".to_string(), "orders_a".to_string()],
            vec!["users_y".to_string(), "users_x".to_string()],
        ]
    );
}

// =============================================================================
// Validation Tests
// =============================================================================

/// Every detector rejects an attrs/num_columns mismatch.
#[test]
fn test_malformed_descriptor_rejected() {
    let mut bad = make_index(1, "bad", 10, "t", &[1, 2]);
    bad.attrs.pop();
    let indexes = vec![make_index(2, "ok", 10, "t", &[1]), bad];

    let is_malformed = |e: AnomalyError| {
        matches!(
            e,
            AnomalyError::MalformedIndexDescriptor { ref index, attrs: 1, num_columns: 2, .. }
                if index == "bad"
        )
    };

    assert!(is_malformed(find_duplicate_index_sets(&indexes).unwrap_err()));
    assert!(is_malformed(find_redundant_index_pairs(&indexes).unwrap_err()));
    assert!(is_malformed(find_unused_indexes(&indexes, 10).unwrap_err()));
    assert!(Findings::analyze(&indexes, &Thresholds::default()).is_err());
}
