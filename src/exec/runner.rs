// src/exec/runner.rs

//! Pluggable command-runner abstraction.
//!
//! The pipeline controller talks to a `CommandRunner` instead of spawning
//! processes directly. Production code uses [`ProcessRunner`]; tests can
//! provide an implementation that scripts outcomes per program.

use std::future::Future;
use std::path::Path;
use std::pin::Pin;

use crate::errors::ExecError;
use crate::exec::command::{run_command, CommandOutput};

/// Trait abstracting how a single pipeline step command is executed.
pub trait CommandRunner: Send + Sync {
    /// Run `program` with `args` in `dir` and return its captured output,
    /// blocking the caller until the command finishes.
    fn run<'a>(
        &'a self,
        dir: &'a Path,
        program: &'a str,
        args: &'a [String],
    ) -> Pin<Box<dyn Future<Output = Result<CommandOutput, ExecError>> + Send + 'a>>;
}

/// Real command runner used in production; spawns an OS process per call.
pub struct ProcessRunner;

impl CommandRunner for ProcessRunner {
    fn run<'a>(
        &'a self,
        dir: &'a Path,
        program: &'a str,
        args: &'a [String],
    ) -> Pin<Box<dyn Future<Output = Result<CommandOutput, ExecError>> + Send + 'a>> {
        Box::pin(run_command(dir, program, args))
    }
}
