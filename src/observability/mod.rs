//! Observability subsystem for pgvet
//!
//! Structured JSON logging of run lifecycle events. Logging is read-only:
//! it never influences classification and never fails a run.
//!
//! # Usage
//!
//! ```ignore
//! use pgvet::observability::{log_event_with_fields, Event, Logger};
//!
//! Logger::info("ANALYSIS_BEGIN", &[("indexes", "42")]);
//! log_event_with_fields(Event::DuplicatesFound, &[("sets", "2")]);
//! ```

mod events;
mod logger;
mod scope;

pub use events::Event;
pub use logger::{Logger, Severity};
pub use scope::ObservationScope;

/// Log a lifecycle event
pub fn log_event(event: Event) {
    log_event_with_fields(event, &[]);
}

/// Log a lifecycle event with fields
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    let severity = if event.is_fatal() {
        Severity::Fatal
    } else {
        Severity::Info
    };
    Logger::log(severity, event.as_str(), fields);
}
