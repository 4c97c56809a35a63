//! Output handling for CLI commands
//!
//! Reports and snapshots go to stdout unless a file is named; logs always go
//! to stderr so the two never mix.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use super::errors::{CliError, CliResult};

/// Opens the output destination: the named file, or stdout.
pub fn open_output(path: Option<&Path>) -> CliResult<Box<dyn Write>> {
    match path {
        Some(p) => {
            let file = File::create(p).map_err(|e| {
                CliError::io_error(format!("Failed to create {}: {}", p.display(), e))
            })?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(io::stdout().lock())),
    }
}

/// Flushes `w`, treating a closed pipe (e.g. `pgvet report | head`) as
/// success.
pub fn finish_output<W: Write + ?Sized>(w: &mut W) -> CliResult<()> {
    match w.flush() {
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        other => other.map_err(CliError::from),
    }
}

/// Maps a write error, ignoring a closed pipe.
pub fn ignore_broken_pipe(result: io::Result<()>) -> CliResult<()> {
    match result {
        Err(e) if e.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        other => other.map_err(|e| CliError::io_error(format!("writing report: {}", e))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_open_output_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("out.md");
        {
            let mut w = open_output(Some(&path)).unwrap();
            w.write_all(b"# report\n").unwrap();
            finish_output(&mut w).unwrap();
        }
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# report\n");
    }

    #[test]
    fn test_broken_pipe_ignored() {
        let broken = Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"));
        assert!(ignore_broken_pipe(broken).is_ok());

        let other = Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied"));
        assert!(ignore_broken_pipe(other).is_err());
    }
}
