//! External simulation engine invocation.

use std::path::Path;
use std::process::Command;

use crate::error::StageError;

/// Run the engine against a materialized configuration, requesting the
/// trajectory log at `fcd_out`. Blocks until the engine exits; there is no
/// timeout, so a hung engine hangs the batch.
pub fn run(program: &str, cfg: &Path, fcd_out: &Path) -> Result<(), StageError> {
    let status = Command::new(program)
        .arg("-c")
        .arg(cfg)
        .arg("--fcd-output")
        .arg(fcd_out)
        .status()
        .map_err(|source| StageError::Spawn {
            tool: program.to_string(),
            source,
        })?;
    if !status.success() {
        return Err(StageError::ToolFailed {
            tool: program.to_string(),
            status,
        });
    }
    Ok(())
}
