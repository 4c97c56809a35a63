//! pgvet - finds duplicate, redundant and unused PostgreSQL indexes
//!
//! The crate loads a snapshot of index metadata, either from a live
//! database or from a JSON file, classifies indexes into anomaly
//! categories and renders the findings as a Markdown report.
//!
//! Classification is pure and deterministic: the same snapshot always
//! yields the same findings in the same order.

pub mod anomaly;
pub mod catalog;
pub mod cli;
pub mod loader;
pub mod observability;
pub mod report;
