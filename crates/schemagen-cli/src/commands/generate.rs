//! Generate command - print the JSON Schema for a values file

use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::{CliError, Result};

/// Pick the single values file out of the positional arguments
pub fn values_file(args: &[PathBuf]) -> Result<&Path> {
    match args {
        [] => Err(CliError::usage("pass one values yaml file")),
        [path] => Ok(path.as_path()),
        _ => Err(CliError::usage(
            "schema can be generated only for one values yaml at once",
        )),
    }
}

pub fn run(values_path: &Path) -> Result<()> {
    tracing::debug!(file = %values_path.display(), "generating schema");

    let schema = schemagen_core::generate_file(values_path)?;
    let json = schema.to_json_pretty()?;

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{}", json)?;
    stdout.flush()?;
    Ok(())
}
