//! Structured JSON logger for pgvet
//!
//! - One log line = one JSON object
//! - Event name first, then severity, then fields sorted by key
//! - Written to stderr; stdout carries the report
//! - Lines below the process-wide minimum severity are dropped

use std::fmt::{self, Write as _};
use std::io::{self, Write};
use std::sync::atomic::{AtomicU8, Ordering};

/// Log severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Per-step detail, shown with --verbose
    Trace = 0,
    /// Normal progress
    Info = 1,
    /// Recoverable issues
    Warn = 2,
    /// Operation failures
    Error = 3,
    /// Unrecoverable, process exits
    Fatal = 4,
}

impl Severity {
    /// Returns the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Trace => "TRACE",
            Severity::Info => "INFO",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
            Severity::Fatal => "FATAL",
        }
    }

    fn from_u8(v: u8) -> Self {
        match v {
            0 => Severity::Trace,
            1 => Severity::Info,
            2 => Severity::Warn,
            3 => Severity::Error,
            _ => Severity::Fatal,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

static MIN_SEVERITY: AtomicU8 = AtomicU8::new(Severity::Info as u8);

/// A structured logger that outputs JSON lines
pub struct Logger;

impl Logger {
    /// Sets the lowest severity that is written
    pub fn set_min_severity(severity: Severity) {
        MIN_SEVERITY.store(severity as u8, Ordering::Relaxed);
    }

    /// Returns the lowest severity that is written
    pub fn min_severity() -> Severity {
        Severity::from_u8(MIN_SEVERITY.load(Ordering::Relaxed))
    }

    /// Reports whether a line at `severity` would be written
    pub fn enabled(severity: Severity) -> bool {
        severity >= Self::min_severity()
    }

    /// Writes one line to stderr if `severity` passes the filter.
    ///
    /// Write errors are swallowed: a closed stderr must not abort a run.
    pub fn log(severity: Severity, event: &str, fields: &[(&str, &str)]) {
        let line = render_line(severity, event, fields);

        if captured(&line) {
            return;
        }

        if Self::enabled(severity) {
            let mut stderr = io::stderr().lock();
            let _ = stderr.write_all(line.as_bytes());
            let _ = stderr.flush();
        }
    }

    /// Log at TRACE level
    pub fn trace(event: &str, fields: &[(&str, &str)]) {
        Self::log(Severity::Trace, event, fields);
    }

    /// Log at INFO level
    pub fn info(event: &str, fields: &[(&str, &str)]) {
        Self::log(Severity::Info, event, fields);
    }

    /// Log at WARN level
    pub fn warn(event: &str, fields: &[(&str, &str)]) {
        Self::log(Severity::Warn, event, fields);
    }

    /// Log at ERROR level
    pub fn error(event: &str, fields: &[(&str, &str)]) {
        Self::log(Severity::Error, event, fields);
    }

    /// Log at FATAL level
    pub fn fatal(event: &str, fields: &[(&str, &str)]) {
        Self::log(Severity::Fatal, event, fields);
    }
}

/// Builds `{"event":..,"severity":..,<fields by key>}` plus a newline.
fn render_line(severity: Severity, event: &str, fields: &[(&str, &str)]) -> String {
    let mut by_key: Vec<&(&str, &str)> = fields.iter().collect();
    by_key.sort_by(|a, b| a.0.cmp(b.0));

    let mut line = format!(
        "{{\"event\":\"{}\",\"severity\":\"{}\"",
        JsonStr(event),
        severity
    );
    for (key, value) in by_key {
        let _ = write!(line, ",\"{}\":\"{}\"", JsonStr(key), JsonStr(value));
    }
    line.push_str("}\n");
    line
}

/// Displays a string with JSON string escaping applied
struct JsonStr<'a>(&'a str);

impl fmt::Display for JsonStr<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in self.0.chars() {
            match c {
                '"' | '\\' => write!(f, "\\{}", c)?,
                '\n' => f.write_str("\\n")?,
                '\r' => f.write_str("\\r")?,
                '\t' => f.write_str("\\t")?,
                c if c.is_control() => write!(f, "\\u{:04x}", c as u32)?,
                c => f.write_char(c)?,
            }
        }
        Ok(())
    }
}

#[cfg(not(test))]
fn captured(_line: &str) -> bool {
    false
}

#[cfg(test)]
fn captured(line: &str) -> bool {
    capture::record(line)
}

/// Formats one line without writing it anywhere.
#[cfg(test)]
pub fn capture_log(severity: Severity, event: &str, fields: &[(&str, &str)]) -> String {
    render_line(severity, event, fields)
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Trace < Severity::Info);
        assert!(Severity::Info < Severity::Warn);
        assert!(Severity::Warn < Severity::Error);
        assert!(Severity::Error < Severity::Fatal);
    }

    #[test]
    fn test_severity_round_trips_through_u8() {
        for s in [
            Severity::Trace,
            Severity::Info,
            Severity::Warn,
            Severity::Error,
            Severity::Fatal,
        ] {
            assert_eq!(Severity::from_u8(s as u8), s);
        }
    }

    #[test]
    fn test_log_json_format() {
        let output = capture_log(Severity::Info, "ANALYSIS_BEGIN", &[]);

        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["event"], "ANALYSIS_BEGIN");
        assert_eq!(parsed["severity"], "INFO");
    }

    #[test]
    fn test_log_fields_sorted() {
        let output1 = capture_log(
            Severity::Info,
            "SNAPSHOT_LOADED",
            &[("tables", "3"), ("indexes", "12"), ("namespace", "public")],
        );
        let output2 = capture_log(
            Severity::Info,
            "SNAPSHOT_LOADED",
            &[("namespace", "public"), ("tables", "3"), ("indexes", "12")],
        );
        assert_eq!(output1, output2);

        let indexes = output1.find("indexes").unwrap();
        let namespace = output1.find("namespace").unwrap();
        let tables = output1.find("tables").unwrap();
        assert!(indexes < namespace);
        assert!(namespace < tables);
    }

    #[test]
    fn test_log_escapes_special_chars() {
        let output = capture_log(
            Severity::Warn,
            "TEST",
            &[("pred", "(status = 'a\"b')\nnext")],
        );

        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["pred"], "(status = 'a\"b')\nnext");
        assert_eq!(output.chars().filter(|c| *c == '\n').count(), 1);
    }
}
