//! GitHub-flavored Markdown tables
//!
//! Columns holding only numbers are right-aligned; everything else is
//! left-aligned. Short rows are padded with empty cells and cells beyond the
//! header count are ignored.

use std::fmt::Write;

use super::locale::NumberFormat;

const MIN_WIDTH: usize = 3;

/// One table cell
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    /// Left-aligned text
    Text(String),
    /// Right-aligned integer, grouped per locale
    Int(i64),
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Cell::Text(s.to_string())
    }
}

impl From<String> for Cell {
    fn from(s: String) -> Self {
        Cell::Text(s)
    }
}

impl From<i64> for Cell {
    fn from(n: i64) -> Self {
        Cell::Int(n)
    }
}

/// A Markdown table under construction
#[derive(Debug, Clone)]
pub struct MarkdownTable {
    headers: Vec<String>,
    rows: Vec<Vec<Cell>>,
    prefix: String,
}

impl MarkdownTable {
    /// Creates an empty table with the given headers
    pub fn new(headers: &[&str]) -> Self {
        Self {
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
            prefix: String::new(),
        }
    }

    /// Sets a string written at the start of every line
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Appends a row
    pub fn push_row(&mut self, row: Vec<Cell>) {
        self.rows.push(row);
    }

    /// Renders the table, one line per row plus header and separator
    pub fn render(&self, numbers: &NumberFormat) -> String {
        let ncols = self.headers.len();

        let text_rows: Vec<Vec<String>> = self
            .rows
            .iter()
            .map(|row| {
                row.iter()
                    .take(ncols)
                    .map(|cell| match cell {
                        Cell::Text(s) => s.clone(),
                        Cell::Int(n) => numbers.format_int(*n),
                    })
                    .collect()
            })
            .collect();

        // A column is numeric only if every row has a number there.
        let align_left: Vec<bool> = (0..ncols)
            .map(|i| {
                !self
                    .rows
                    .iter()
                    .all(|row| matches!(row.get(i), Some(Cell::Int(_))))
            })
            .collect();

        // Delimiter cells need at least one `-` besides the colon.
        let mut widths: Vec<usize> = self
            .headers
            .iter()
            .map(|h| h.chars().count().max(MIN_WIDTH))
            .collect();
        for row in &text_rows {
            for (i, s) in row.iter().enumerate() {
                widths[i] = widths[i].max(s.chars().count());
            }
        }

        let mut out = String::new();
        self.write_row(&mut out, &self.headers, &widths, &align_left);

        out.push_str(&self.prefix);
        for (i, &w) in widths.iter().enumerate() {
            out.push_str("| ");
            if align_left[i] {
                out.push(':');
            }
            out.push_str(&"-".repeat(w.saturating_sub(1)));
            if !align_left[i] {
                out.push(':');
            }
            out.push(' ');
        }
        out.push_str("|\n");

        for row in &text_rows {
            self.write_row(&mut out, row, &widths, &align_left);
        }
        out
    }

    fn write_row(&self, out: &mut String, row: &[String], widths: &[usize], align_left: &[bool]) {
        out.push_str(&self.prefix);
        for (i, &w) in widths.iter().enumerate() {
            let cell = row.get(i).map(String::as_str).unwrap_or("");
            let _ = if align_left[i] {
                write!(out, "| {:<w$} ", cell, w = w)
            } else {
                write!(out, "| {:>w$} ", cell, w = w)
            };
        }
        out.push_str("|\n");
    }
}
