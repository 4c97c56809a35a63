//! Snapshot validation shared by every detector

use crate::catalog::Index;

use super::errors::{AnomalyError, AnomalyResult};

/// Fails on the first descriptor whose attribute list does not cover
/// exactly `num_columns` positions.
pub fn validate_snapshot(indexes: &[Index]) -> AnomalyResult<()> {
    match indexes.iter().find(|ind| !ind.is_well_formed()) {
        Some(ind) => Err(AnomalyError::MalformedIndexDescriptor {
            index: ind.name.clone(),
            table: ind.qualified_table_name(),
            attrs: ind.attrs.len(),
            num_columns: ind.num_columns,
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index(name: &str, attrs: &[&str], num_columns: usize) -> Index {
        let mut ind = Index::new(1, name, 10, "accounts");
        ind.attrs = attrs.iter().map(|s| s.to_string()).collect();
        ind.num_columns = num_columns;
        ind
    }

    #[test]
    fn test_empty_snapshot_is_valid() {
        assert!(validate_snapshot(&[]).is_ok());
    }

    #[test]
    fn test_reports_first_offender() {
        let indexes = vec![
            index("ok", &["id"], 1),
            index("short", &["id"], 2),
            index("long", &["id", "email", "name"], 2),
        ];
        let err = validate_snapshot(&indexes).unwrap_err();
        assert_eq!(
            err,
            AnomalyError::MalformedIndexDescriptor {
                index: "short".into(),
                table: "accounts".into(),
                attrs: 1,
                num_columns: 2,
            }
        );
    }
}
