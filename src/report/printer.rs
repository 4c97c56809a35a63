//! Markdown report for one analysis run
//!
//! Consumes already-ranked findings and lays them out; it makes no
//! classification or ordering decision of its own.

use std::io::{self, Write};

use chrono::{DateTime, Utc};

use crate::anomaly::{Findings, RedundantPair, Thresholds};
use crate::catalog::Index;

use super::locale::NumberFormat;
use super::table::{Cell, MarkdownTable};

/// Where the analyzed indexes came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// A live database connection
    Database {
        host: String,
        port: u16,
        user: String,
        database: String,
    },
    /// A JSON snapshot file
    Snapshot { path: String },
}

impl Source {
    fn title(&self) -> String {
        match self {
            Source::Database { database, .. } => format!("database \"{}\"", database),
            Source::Snapshot { path } => format!("snapshot \"{}\"", path),
        }
    }
}

/// Renders the full Markdown report
pub struct ReportPrinter<'a> {
    source: Source,
    namespace: String,
    thresholds: Thresholds,
    findings: &'a Findings<'a>,
    numbers: NumberFormat,
    generated_at: DateTime<Utc>,
}

impl<'a> ReportPrinter<'a> {
    /// Creates a printer stamped with the current time
    pub fn new(
        source: Source,
        namespace: impl Into<String>,
        thresholds: Thresholds,
        findings: &'a Findings<'a>,
    ) -> Self {
        Self {
            source,
            namespace: namespace.into(),
            thresholds,
            findings,
            numbers: NumberFormat::default(),
            generated_at: Utc::now(),
        }
    }

    /// Sets the number grouping used in tables
    pub fn with_number_format(mut self, numbers: NumberFormat) -> Self {
        self.numbers = numbers;
        self
    }

    /// Overrides the generation timestamp
    pub fn with_generated_at(mut self, at: DateTime<Utc>) -> Self {
        self.generated_at = at;
        self
    }

    /// Writes the report to `w`
    pub fn generate<W: Write>(&self, w: &mut W) -> io::Result<()> {
        w.write_all(self.render().as_bytes())?;
        w.flush()
    }

    /// Renders the report as a string
    pub fn render(&self) -> String {
        let f = self.findings;
        let mut out = String::new();

        out.push_str(&format!("# pgvet report for {}\n\n", self.source.title()));
        match &self.source {
            Source::Database {
                host,
                port,
                user,
                database,
            } => {
                out.push_str("Connection info:\n\n");
                out.push_str(&format!("* Host: {}\n", host));
                out.push_str(&format!("* Port: {}\n", port));
                out.push_str(&format!("* User: {}\n", user));
                out.push_str(&format!("* Database: {}\n", database));
            }
            Source::Snapshot { path } => {
                out.push_str(&format!("Snapshot file: {}\n", path));
            }
        }
        out.push_str(&format!("\nNamespace: {}\n", self.namespace));

        out.push_str("\n## Duplicate Indexes\n\n");
        out.push_str(&format!(
            "Sets of duplicate indexes found: {}\n\n",
            f.duplicate_sets.len()
        ));
        out.push_str(
            "Indexes in this section share an exact definition with at least one other index.\n\
             It is therefore always safe to drop one of the two.\n\n",
        );
        out.push_str(&self.format_duplicate_sets());

        out.push_str("\n## Redundant Indexes\n\n");
        out.push_str(&format!(
            "Pairs of redundant indexes found: {}\n\n",
            f.redundant_pairs.len()
        ));
        out.push_str(
            "In the following table, \"Index1\" refers to the redundant index, and \"Attrs1\" its\n\
             columns/expressions. It is usually safe to drop an index that is a prefix of\n\
             another index, as the latter can satisfy the same query plans.\n\n",
        );
        out.push_str(&self.format_redundant_pairs());

        out.push_str("\n## Unused Indexes\n\n");
        out.push_str(&format!("Unused indexes found: {}\n\n", f.relevant_unused.len()));
        out.push_str("Criteria for inclusion in this report:\n\n");
        out.push_str(&format!(
            "* Scanned at most {} times.\n",
            self.thresholds.unused_scans_cutoff
        ));
        out.push_str(&format!(
            "* Size greater than or equal to {}.\n",
            self.thresholds.min_index_size.human()
        ));
        out.push_str(&format!(
            "* Contains at least {} rows.\n",
            self.thresholds.min_index_rows
        ));
        out.push_str("* Is either non-unique or is a primary key.\n\n");
        out.push_str(
            "**Important:** this section of the report relies on usage statistics, and will\n\
             only contain meaningful results if pgvet was run against a production database.\n\n\
             Note: unique indexes are not included because they enforce a constraint and\n\
             cannot be dropped simply because they aren't used in query plans (when a unique\n\
             index prevents its constraint from being violated, it is not recorded as a\n\
             \"scan\"). Primary key indexes, however, _are_ included: a primary key that is\n\
             never scanned is often a sign of a design flaw.\n\n",
        );
        if !f.relevant_unused.is_empty() {
            out.push_str(&self.indexes_table(&f.relevant_unused));
        }

        out.push_str(&format!(
            "\n*Generated at {}*\n",
            self.generated_at.to_rfc2822()
        ));
        out
    }

    fn format_duplicate_sets(&self) -> String {
        self.findings
            .duplicate_sets
            .iter()
            .map(|set| self.indexes_table(set))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn format_redundant_pairs(&self) -> String {
        if self.findings.redundant_pairs.is_empty() {
            return String::new();
        }
        let mut table = MarkdownTable::new(&[
            "Table",
            "Index1",
            "Index2",
            "T",
            "Size (MiB)",
            "Rows",
            "Scans",
            "Attrs1",
            "Attrs2",
        ]);
        for RedundantPair {
            subsumed,
            subsuming,
        } in &self.findings.redundant_pairs
        {
            table.push_row(vec![
                subsumed.qualified_table_name().into(),
                subsumed.name.as_str().into(),
                subsuming.name.as_str().into(),
                subsumed.kind().as_str().into(),
                Cell::Int(subsumed.size.mib() as i64),
                Cell::Int(subsumed.num_rows),
                Cell::Int(subsumed.num_scans),
                subsumed.attrs.join(", ").into(),
                subsuming.attrs.join(", ").into(),
            ]);
        }
        table.render(&self.numbers)
    }

    fn indexes_table(&self, indexes: &[&Index]) -> String {
        let mut table =
            MarkdownTable::new(&["Table", "Index", "T", "Size (MiB)", "Rows", "Scans", "Attrs"]);
        for ind in indexes {
            table.push_row(vec![
                ind.qualified_table_name().into(),
                ind.name.as_str().into(),
                ind.kind().as_str().into(),
                Cell::Int(ind.size.mib() as i64),
                Cell::Int(ind.num_rows),
                Cell::Int(ind.num_scans),
                ind.attrs.join(", ").into(),
            ]);
        }
        table.render(&self.numbers)
    }
}
