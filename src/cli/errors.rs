//! CLI-specific error types
//!
//! Every CLI error ends the run with a non-zero exit status.

use std::fmt;
use std::io;

use crate::anomaly::AnomalyError;
use crate::loader::LoaderError;

/// CLI error codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Configuration file or flag error
    ConfigError,
    /// I/O error writing output
    IoError,
    /// Catalog or snapshot could not be loaded
    LoadFailed,
    /// Snapshot rejected by the detectors
    AnalysisFailed,
}

impl CliErrorCode {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigError => "PGVET_CLI_CONFIG_ERROR",
            Self::IoError => "PGVET_CLI_IO_ERROR",
            Self::LoadFailed => "PGVET_CLI_LOAD_FAILED",
            Self::AnalysisFailed => "PGVET_CLI_ANALYSIS_FAILED",
        }
    }
}

/// CLI error
#[derive(Debug)]
pub struct CliError {
    code: CliErrorCode,
    message: String,
}

impl CliError {
    /// Create a new CLI error
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Config error
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ConfigError, msg)
    }

    /// I/O error
    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::IoError, msg)
    }

    /// Load failed
    pub fn load_failed(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::LoadFailed, msg)
    }

    /// Analysis failed
    pub fn analysis_failed(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::AnalysisFailed, msg)
    }

    /// Get the error code
    pub fn code(&self) -> &CliErrorCode {
        &self.code
    }

    /// Get the error code string
    pub fn code_str(&self) -> &'static str {
        self.code.code()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for CliError {}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::io_error(e.to_string())
    }
}

impl From<LoaderError> for CliError {
    fn from(e: LoaderError) -> Self {
        Self::load_failed(format!("{}: {}", e.code(), e))
    }
}

impl From<AnomalyError> for CliError {
    fn from(e: AnomalyError) -> Self {
        Self::analysis_failed(format!("{}: {}", e.code(), e))
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;
