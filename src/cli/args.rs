//! CLI argument definitions using clap
//!
//! Commands:
//! - pgvet report [--conninfo <conninfo> | --snapshot <path>]
//! - pgvet snapshot --conninfo <conninfo> [--output <path>]

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// pgvet - finds duplicate, redundant and unused PostgreSQL indexes
#[derive(Parser, Debug)]
#[command(name = "pgvet")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Where to connect and what to analyze
#[derive(Args, Debug, Clone, Default)]
pub struct ConnectionArgs {
    /// Postgres conninfo string or URI
    #[arg(long)]
    pub conninfo: Option<String>,

    /// Schema to analyze
    #[arg(long)]
    pub namespace: Option<String>,
}

/// Thresholds for the unused index section
#[derive(Args, Debug, Clone, Default)]
pub struct ThresholdArgs {
    /// Treat indexes with this many scans or fewer as unused
    #[arg(long)]
    pub unused_cutoff: Option<i64>,

    /// Min. size (MiB) for an unused index to be included in the report
    #[arg(long)]
    pub min_index_size: Option<i64>,

    /// Min. rows for an unused index to be included in the report
    #[arg(long)]
    pub min_index_rows: Option<i64>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Analyze indexes and print a Markdown report
    Report {
        /// Path to an optional JSON configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        #[command(flatten)]
        connection: ConnectionArgs,

        /// Analyze a JSON snapshot instead of a live database
        #[arg(long, conflicts_with = "conninfo")]
        snapshot: Option<PathBuf>,

        #[command(flatten)]
        thresholds: ThresholdArgs,

        /// Enable verbose logging
        #[arg(long)]
        verbose: bool,
    },

    /// Load the index catalog and write it as a JSON snapshot
    Snapshot {
        /// Path to an optional JSON configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        #[command(flatten)]
        connection: ConnectionArgs,

        /// Output file; stdout when omitted
        #[arg(long)]
        output: Option<PathBuf>,

        /// Enable verbose logging
        #[arg(long)]
        verbose: bool,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
