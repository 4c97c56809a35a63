//! CLI command implementations
//!
//! Each command resolves its configuration, loads an index snapshot, and
//! writes its output. The detectors themselves never perform I/O.

use std::path::Path;

use crate::anomaly::{AnomalyResult, Findings, Thresholds};
use crate::catalog::Index;
use crate::loader::{load_snapshot, write_snapshot, CatalogLoader};
use crate::observability::{
    log_event, log_event_with_fields, Event, Logger, ObservationScope, Severity,
};
use crate::report::{NumberFormat, ReportPrinter, Source};

use super::args::{Cli, Command};
use super::config::{database_source, Config};
use super::errors::CliResult;
use super::io::{finish_output, ignore_broken_pipe, open_output};

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Report {
            config,
            connection,
            snapshot,
            thresholds,
            verbose,
        } => {
            let config =
                Config::resolve(config.as_deref(), &connection, Some(&thresholds), verbose)?;
            init_logging(&config);
            report(&config, snapshot.as_deref())
        }
        Command::Snapshot {
            config,
            connection,
            output,
            verbose,
        } => {
            let config = Config::resolve(config.as_deref(), &connection, None, verbose)?;
            init_logging(&config);
            snapshot(&config, output.as_deref())
        }
    }
}

fn init_logging(config: &Config) {
    Logger::set_min_severity(if config.verbose {
        Severity::Trace
    } else {
        Severity::Warn
    });
    log_event_with_fields(
        Event::ConfigLoaded,
        &[
            ("namespace", config.namespace.as_str()),
            ("verbose", if config.verbose { "true" } else { "false" }),
        ],
    );
}

/// Analyze a database or snapshot and print the Markdown report
pub fn report(config: &Config, snapshot_path: Option<&Path>) -> CliResult<()> {
    let (indexes, source, namespace) = match snapshot_path {
        Some(path) => {
            let indexes = load_snapshot(path)?;
            let namespace =
                snapshot_namespace(&indexes).unwrap_or_else(|| config.namespace.clone());
            let source = Source::Snapshot {
                path: path.display().to_string(),
            };
            (indexes, source, namespace)
        }
        None => {
            let pg = config.connection_config()?;
            let indexes = load_catalog(config, &pg)?;
            (indexes, database_source(&pg), config.namespace.clone())
        }
    };

    let thresholds = config.thresholds();
    let findings = analyze(&indexes, &thresholds)?;

    let printer = ReportPrinter::new(source, namespace, thresholds, &findings)
        .with_number_format(NumberFormat::from_env());
    let mut out = open_output(None)?;
    ignore_broken_pipe(printer.generate(&mut out))?;
    finish_output(&mut out)?;

    log_event(Event::ReportWritten);
    Ok(())
}

/// Returns the namespace shared by every index of a snapshot.
///
/// `None` for an empty snapshot or one mixing namespaces.
pub fn snapshot_namespace(indexes: &[Index]) -> Option<String> {
    let first = indexes.first()?;
    indexes
        .iter()
        .all(|ind| ind.namespace == first.namespace)
        .then(|| first.namespace.clone())
}

/// Load the catalog and write it as a JSON snapshot
pub fn snapshot(config: &Config, output: Option<&Path>) -> CliResult<()> {
    let pg = config.connection_config()?;
    let indexes = load_catalog(config, &pg)?;

    let mut out = open_output(output)?;
    write_snapshot(&mut out, &indexes)?;
    finish_output(&mut out)?;

    let count = indexes.len().to_string();
    let target = output
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "<stdout>".to_string());
    log_event_with_fields(
        Event::SnapshotWritten,
        &[("indexes", count.as_str()), ("path", target.as_str())],
    );
    Ok(())
}

fn load_catalog(config: &Config, pg: &postgres::Config) -> CliResult<Vec<Index>> {
    let scope = ObservationScope::with_fields(
        "CATALOG_LOAD",
        &[("namespace", config.namespace.as_str())],
    );

    let result = CatalogLoader::connect(pg, config.namespace.as_str()).and_then(|mut loader| {
        let indexes = loader.load_indexes()?;
        loader.close()?;
        Ok(indexes)
    });

    match result {
        Ok(indexes) => {
            scope.complete_with_fields(&[("indexes", indexes.len().to_string().as_str())]);
            Ok(indexes)
        }
        Err(e) => {
            scope.fail(&e.to_string());
            Err(e.into())
        }
    }
}

/// Runs every detector over the snapshot, logging what each one found.
pub fn analyze<'a>(
    indexes: &'a [Index],
    thresholds: &Thresholds,
) -> AnomalyResult<Findings<'a>> {
    let count = indexes.len().to_string();
    let scope = ObservationScope::with_fields("ANALYSIS", &[("indexes", count.as_str())]);

    let findings = match Findings::analyze(indexes, thresholds) {
        Ok(f) => f,
        Err(e) => {
            let reason = e.to_string();
            log_event_with_fields(Event::SnapshotMalformed, &[("reason", reason.as_str())]);
            scope.fail(e.code());
            return Err(e);
        }
    };

    let sets = findings.duplicate_sets.len().to_string();
    let pairs = findings.redundant_pairs.len().to_string();
    let unused = findings.unused.len().to_string();
    let relevant = findings.relevant_unused.len().to_string();
    log_event_with_fields(Event::DuplicatesFound, &[("sets", sets.as_str())]);
    log_event_with_fields(Event::RedundantFound, &[("pairs", pairs.as_str())]);
    log_event_with_fields(
        Event::UnusedFound,
        &[("raw", unused.as_str()), ("relevant", relevant.as_str())],
    );
    scope.complete();

    Ok(findings)
}
