//! Run configuration
//!
//! Values come from built-in defaults, then an optional JSON file, then
//! command-line flags, each layer overriding the previous one.

use std::env;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use postgres::config::Host;
use serde::{Deserialize, Serialize};

use crate::anomaly::Thresholds;
use crate::catalog::Bytes;
use crate::report::Source;

use super::args::{ConnectionArgs, ThresholdArgs};
use super::errors::{CliError, CliResult};

/// Configuration file structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Postgres conninfo string or URI
    #[serde(default = "default_conninfo")]
    pub conninfo: String,

    /// Schema to analyze
    #[serde(default = "default_namespace")]
    pub namespace: String,

    /// Indexes scanned at most this many times are unused
    #[serde(default = "default_unused_cutoff")]
    pub unused_cutoff: i64,

    /// Min. size in MiB for an unused index to be reported
    #[serde(default = "default_min_index_size")]
    pub min_index_size_mib: i64,

    /// Min. rows for an unused index to be reported
    #[serde(default = "default_min_index_rows")]
    pub min_index_rows: i64,

    /// Enable verbose logging
    #[serde(default)]
    pub verbose: bool,
}

fn default_conninfo() -> String {
    "host=localhost port=5432".to_string()
}
fn default_namespace() -> String {
    "public".to_string()
}
fn default_unused_cutoff() -> i64 {
    10
}
fn default_min_index_size() -> i64 {
    1
}
fn default_min_index_rows() -> i64 {
    10
}

impl Default for Config {
    fn default() -> Self {
        Self {
            conninfo: default_conninfo(),
            namespace: default_namespace(),
            unused_cutoff: default_unused_cutoff(),
            min_index_size_mib: default_min_index_size(),
            min_index_rows: default_min_index_rows(),
            verbose: false,
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

        let config: Config = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    /// Resolves the configuration for one command invocation.
    pub fn resolve(
        path: Option<&Path>,
        connection: &ConnectionArgs,
        thresholds: Option<&ThresholdArgs>,
        verbose: bool,
    ) -> CliResult<Self> {
        let mut config = match path {
            Some(p) => Self::load(p)?,
            None => Self::default(),
        };

        if let Some(conninfo) = &connection.conninfo {
            config.conninfo = conninfo.clone();
        }
        if let Some(namespace) = &connection.namespace {
            config.namespace = namespace.clone();
        }
        if let Some(t) = thresholds {
            if let Some(v) = t.unused_cutoff {
                config.unused_cutoff = v;
            }
            if let Some(v) = t.min_index_size {
                config.min_index_size_mib = v;
            }
            if let Some(v) = t.min_index_rows {
                config.min_index_rows = v;
            }
        }
        config.verbose |= verbose;

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> CliResult<()> {
        if self.namespace.is_empty() {
            return Err(CliError::config_error("namespace must not be empty"));
        }
        if self.unused_cutoff < 0 {
            return Err(CliError::config_error("unused_cutoff must be >= 0"));
        }
        if self.min_index_size_mib < 0 {
            return Err(CliError::config_error("min_index_size_mib must be >= 0"));
        }
        if self.min_index_rows < 0 {
            return Err(CliError::config_error("min_index_rows must be >= 0"));
        }
        Ok(())
    }

    /// Thresholds for the unused index report
    pub fn thresholds(&self) -> Thresholds {
        Thresholds {
            unused_scans_cutoff: self.unused_cutoff,
            min_index_size: Bytes::from_mib(self.min_index_size_mib),
            min_index_rows: self.min_index_rows,
        }
    }

    /// Parses the conninfo string or URI.
    ///
    /// For clearer errors, a missing user defaults to `$USER` and a missing
    /// database to the user name.
    pub fn connection_config(&self) -> CliResult<postgres::Config> {
        let mut pg = postgres::Config::from_str(&self.conninfo).map_err(|e| {
            CliError::config_error(format!(
                "invalid Postgres conninfo string {:?}: {}",
                self.conninfo, e
            ))
        })?;

        if pg.get_user().is_none() {
            if let Ok(user) = env::var("USER") {
                pg.user(&user);
            }
        }
        if pg.get_dbname().is_none() {
            if let Some(user) = pg.get_user().map(str::to_string) {
                pg.dbname(&user);
            }
        }
        Ok(pg)
    }
}

/// Describes a live connection for the report header
pub fn database_source(pg: &postgres::Config) -> Source {
    let host = match pg.get_hosts().first() {
        Some(Host::Tcp(h)) => h.clone(),
        #[cfg(unix)]
        Some(Host::Unix(p)) => p.display().to_string(),
        None => "localhost".to_string(),
    };
    Source::Database {
        host,
        port: pg.get_ports().first().copied().unwrap_or(5432),
        user: pg.get_user().unwrap_or_default().to_string(),
        database: pg.get_dbname().unwrap_or_default().to_string(),
    }
}
