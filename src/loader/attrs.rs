//! Resolution of index key positions into attribute names
//!
//! Each position of `indkey` is either a 1-based column number, resolved
//! against the table's columns, or `0` for an expression, resolved by taking
//! the next entry of the split `pg_get_expr` text.

use std::collections::HashMap;

use crate::catalog::{Index, Oid};

use super::errors::{LoaderError, LoaderResult};

/// Column names and positions of one table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableColumns {
    columns: Vec<(i16, String)>,
}

impl TableColumns {
    /// Adds a column at its 1-based position
    pub fn add(&mut self, key: i16, name: impl Into<String>) {
        self.columns.push((key, name.into()));
    }

    /// Looks up the column name at `key`
    pub fn lookup(&self, key: i16) -> Option<&str> {
        self.columns
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, name)| name.as_str())
    }
}

/// Column information for every table, keyed by table oid
pub type ColumnsByTable = HashMap<Oid, TableColumns>;

/// Naively splits the output of `pg_get_expr` into top-level expressions.
///
/// `"f(x, y), z, a + b"` becomes `["f(x, y)", "z", "a + b"]`. Commas inside
/// parentheses do not split, and spaces at the start of an expression are
/// dropped.
pub fn split_exprs(input: &str) -> Vec<String> {
    let mut exprs = Vec::new();
    let mut curr = String::new();
    let mut nest = 0i32;

    for c in input.chars() {
        match c {
            '(' => nest += 1,
            ')' => nest -= 1,
            ' ' if curr.is_empty() => continue,
            ',' if nest == 0 => {
                exprs.push(std::mem::take(&mut curr));
                continue;
            }
            _ => {}
        }
        curr.push(c);
    }
    if !curr.is_empty() {
        exprs.push(curr);
    }
    exprs
}

/// Resolves the attribute names of `index` from its keys and expressions.
pub fn resolve_attrs(index: &Index, columns: &ColumnsByTable) -> LoaderResult<Vec<String>> {
    let mut exprs = split_exprs(&index.exprs).into_iter();
    let table = columns.get(&index.table_oid);

    index
        .keys
        .iter()
        .enumerate()
        .map(|(position, &key)| {
            if key == 0 {
                exprs.next().ok_or_else(|| LoaderError::MissingExpression {
                    index: index.name.clone(),
                    oid: index.oid,
                    position,
                })
            } else {
                table
                    .and_then(|t| t.lookup(key))
                    .map(str::to_string)
                    .ok_or_else(|| LoaderError::MissingColumn {
                        index: index.name.clone(),
                        oid: index.oid,
                        position,
                        key,
                    })
            }
        })
        .collect()
}
