// src/exec/command.rs

use std::path::Path;
use std::process::Stdio;

use tokio::process::Command;
use tracing::debug;

use crate::errors::ExecError;

/// Captured output streams of a finished child process.
#[derive(Debug, Clone, Default)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
}

/// Run `program` with `args` in `dir`, capturing stdout and stderr fully
/// into memory (the pipeline tools are short-lived CLI commands; their
/// output fits comfortably in a buffer, no streaming).
///
/// Returns an error when the executable cannot be spawned or when the
/// process exits non-zero; the non-zero case carries the captured output.
/// A process that exits 0 is a success regardless of what it printed.
///
/// There is no timeout: a hung tool blocks its pipeline run indefinitely.
pub async fn run_command(
    dir: &Path,
    program: &str,
    args: &[String],
) -> Result<CommandOutput, ExecError> {
    debug!(%program, ?args, dir = %dir.display(), "running step command");

    let output = Command::new(program)
        .args(args)
        .current_dir(dir)
        .stdin(Stdio::null())
        .output()
        .await
        .map_err(|source| ExecError::Spawn {
            program: program.to_string(),
            source,
        })?;

    let captured = CommandOutput {
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    };

    if output.status.success() {
        Ok(captured)
    } else {
        Err(ExecError::NonZero {
            program: program.to_string(),
            code: output.status.code().unwrap_or(-1),
            output: captured,
        })
    }
}
