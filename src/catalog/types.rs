//! Index descriptor types
//!
//! An `Index` mirrors one row of `pg_index` joined with its relation,
//! namespace and usage statistics. Descriptors are built once per catalog
//! snapshot and never mutated afterwards; the detectors only borrow them.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::bytes::Bytes;

/// Catalog object identifier, scoped to one snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Oid(pub u32);

impl fmt::Display for Oid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Categorizes an index by the constraint it enforces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IndexKind {
    /// Backs the table's primary key
    Primary,
    /// Unique, but not the primary key
    Unique,
    /// No uniqueness constraint
    NonUnique,
}

impl IndexKind {
    /// Single-letter code used in report tables
    pub fn as_str(&self) -> &'static str {
        match self {
            IndexKind::Primary => "P",
            IndexKind::Unique => "U",
            IndexKind::NonUnique => "N",
        }
    }
}

impl fmt::Display for IndexKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A PostgreSQL index descriptor.
///
/// `keys`, `attrs`, `collations`, `classes` and `options` are positional and
/// aligned: entry `i` of each describes the `i`-th indexed position. A key of
/// `0` marks an expression, whose source text is the matching entry of
/// `attrs`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Index {
    /// Index relation oid
    pub oid: Oid,
    /// Index name
    pub name: String,
    /// Oid of the index's namespace
    #[serde(default)]
    pub namespace_oid: Oid,
    /// Namespace (schema) name
    pub namespace: String,
    /// Oid of the indexed table
    pub table_oid: Oid,
    /// Name of the indexed table
    pub table_name: String,
    /// Count of indexed positions
    pub num_columns: usize,
    /// Enforces uniqueness
    pub is_unique: bool,
    /// Backs the primary key; implies `is_unique`
    pub is_primary: bool,
    /// Usable by the planner
    #[serde(default = "default_true")]
    pub is_valid: bool,
    /// Not in the middle of being dropped
    #[serde(default = "default_true")]
    pub is_live: bool,
    /// 1-based column positions; 0 for expressions
    pub keys: Vec<i16>,
    /// Collation per position
    #[serde(default)]
    pub collations: Vec<Oid>,
    /// Operator class per position
    #[serde(default)]
    pub classes: Vec<Oid>,
    /// Per-position option flag bits
    #[serde(default)]
    pub options: Vec<i16>,
    /// Expression source text for the 0 entries of `keys`
    #[serde(default)]
    pub exprs: String,
    /// Partial index predicate; empty when the index is not partial
    #[serde(default)]
    pub pred: String,
    /// Reconstructed CREATE INDEX statement
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub definition: Option<String>,
    /// Resolved column names or expression text, one per position
    pub attrs: Vec<String>,

    // Statistics, as of snapshot time
    /// Disk pages in the index
    #[serde(default)]
    pub num_pages: i64,
    /// Approximate tuples in the index
    #[serde(default)]
    pub num_rows: i64,
    /// Disk pages in the indexed table
    #[serde(default)]
    pub num_table_pages: i64,
    /// Approximate tuples in the indexed table
    #[serde(default)]
    pub num_table_rows: i64,
    /// Times the index was scanned
    #[serde(default)]
    pub num_scans: i64,
    /// Index entries returned by scans
    #[serde(default)]
    pub num_tuples_read: i64,
    /// Live table rows fetched by simple index scans
    #[serde(default)]
    pub num_tuples_fetched: i64,
    /// Size on disk
    #[serde(default)]
    pub size: Bytes,
}

fn default_true() -> bool {
    true
}

impl Index {
    /// Creates a descriptor with the given identity and no indexed positions
    pub fn new(
        oid: u32,
        name: impl Into<String>,
        table_oid: u32,
        table_name: impl Into<String>,
    ) -> Self {
        Self {
            oid: Oid(oid),
            name: name.into(),
            namespace: "public".to_string(),
            table_oid: Oid(table_oid),
            table_name: table_name.into(),
            is_valid: true,
            is_live: true,
            ..Self::default()
        }
    }

    /// Returns the kind of constraint this index enforces
    pub fn kind(&self) -> IndexKind {
        if self.is_primary {
            IndexKind::Primary
        } else if self.is_unique {
            IndexKind::Unique
        } else {
            IndexKind::NonUnique
        }
    }

    /// Table name prefixed by its namespace, unless the namespace is `public`.
    pub fn qualified_table_name(&self) -> String {
        qualify(&self.namespace, &self.table_name)
    }

    /// Index name prefixed by its namespace, unless the namespace is `public`.
    pub fn qualified_name(&self) -> String {
        qualify(&self.namespace, &self.name)
    }

    /// Reports whether the attribute list covers every indexed position.
    pub fn is_well_formed(&self) -> bool {
        self.attrs.len() == self.num_columns
    }

    /// Reports whether `self` and `other` have the same definition.
    ///
    /// Two indexes are equivalent when they are on the same table, agree on
    /// uniqueness, and have identical keys, collations, operator classes,
    /// options, expressions and predicate. All sequences are compared
    /// positionally. The relation is a conjunction of equalities, so it
    /// partitions any collection into disjoint classes.
    pub fn equivalent_to(&self, other: &Index) -> bool {
        if self.oid == other.oid {
            return true;
        }
        self.table_oid == other.table_oid
            && self.is_unique == other.is_unique
            && self.keys == other.keys
            && self.collations == other.collations
            && self.classes == other.classes
            && self.options == other.options
            && self.exprs == other.exprs
            && self.pred == other.pred
    }

    /// Reports whether this index's attributes are a strict prefix of
    /// `other`'s: shorter, and equal at every position it has.
    ///
    /// An index on `x, y` is a prefix of one on `x, y, z`, but not of another
    /// index on `x, y`.
    pub fn is_prefix_of(&self, other: &Index) -> bool {
        self.attrs.len() < other.attrs.len()
            && self.attrs.iter().zip(&other.attrs).all(|(a, b)| a == b)
    }
}

fn qualify(namespace: &str, name: &str) -> String {
    if namespace == "public" {
        name.to_string()
    } else {
        format!("{}.{}", namespace, name)
    }
}
