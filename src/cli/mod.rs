//! CLI module for pgvet
//!
//! Provides command-line interface for:
//! - report: Analyze a database or snapshot and print a Markdown report
//! - snapshot: Dump the index catalog of a database as JSON

mod args;
mod commands;
mod config;
mod errors;
mod io;

pub use args::{Cli, Command, ConnectionArgs, ThresholdArgs};
pub use commands::{analyze, report, run, run_command, snapshot};
pub use config::{database_source, Config};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{finish_output, ignore_broken_pipe, open_output};
