//! Observable lifecycle events for pgvet

use std::fmt;

/// Observable events in one pgvet run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Configuration
    /// Configuration resolved from file and flags
    ConfigLoaded,

    // Catalog
    /// Connected to the database
    Connected,
    /// Index descriptors loaded from the catalog
    CatalogLoaded,
    /// Index descriptors loaded from a snapshot file
    SnapshotLoaded,
    /// Snapshot file written
    SnapshotWritten,

    // Analysis
    /// Duplicate sets found
    DuplicatesFound,
    /// Redundant pairs found
    RedundantFound,
    /// Unused indexes found
    UnusedFound,
    /// Snapshot rejected as malformed (FATAL)
    SnapshotMalformed,

    // Output
    /// Report written to stdout
    ReportWritten,
}

impl Event {
    /// Returns the string representation of the event
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::Connected => "DB_CONNECTED",
            Event::CatalogLoaded => "CATALOG_LOADED",
            Event::SnapshotLoaded => "SNAPSHOT_LOADED",
            Event::SnapshotWritten => "SNAPSHOT_WRITTEN",
            Event::DuplicatesFound => "DUPLICATE_SETS_FOUND",
            Event::RedundantFound => "REDUNDANT_PAIRS_FOUND",
            Event::UnusedFound => "UNUSED_INDEXES_FOUND",
            Event::SnapshotMalformed => "SNAPSHOT_MALFORMED",
            Event::ReportWritten => "REPORT_WRITTEN",
        }
    }

    /// Returns true if this event indicates a fatal condition
    pub fn is_fatal(&self) -> bool {
        matches!(self, Event::SnapshotMalformed)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names_are_upper_snake() {
        let events = [
            Event::ConfigLoaded,
            Event::Connected,
            Event::CatalogLoaded,
            Event::SnapshotLoaded,
            Event::SnapshotWritten,
            Event::DuplicatesFound,
            Event::RedundantFound,
            Event::UnusedFound,
            Event::SnapshotMalformed,
            Event::ReportWritten,
        ];

        for event in events {
            let s = event.as_str();
            assert!(!s.is_empty());
            assert!(s.chars().all(|c| c.is_uppercase() || c == '_'));
        }
    }

    #[test]
    fn test_fatal_events() {
        assert!(Event::SnapshotMalformed.is_fatal());
        assert!(!Event::CatalogLoaded.is_fatal());
    }

    #[test]
    fn test_event_display() {
        assert_eq!(format!("{}", Event::Connected), "DB_CONNECTED");
    }
}
