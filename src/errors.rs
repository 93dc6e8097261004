// src/errors.rs

//! Crate-wide error types.
//!
//! Application plumbing uses `anyhow`; the one structured error is
//! [`ExecError`], which the pipeline controller matches on to decide
//! between "could not start the tool" and "the tool ran and failed".

use std::io;

use thiserror::Error;

use crate::exec::CommandOutput;

/// Error from running one external pipeline step.
#[derive(Debug, Error)]
pub enum ExecError {
    /// The executable could not be found or started.
    #[error("failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    /// The process ran but exited with a non-zero status.
    ///
    /// Captured stdout/stderr ride along so callers can show the tool's
    /// own diagnostics.
    #[error("{program} exited with status {code}")]
    NonZero {
        program: String,
        code: i32,
        output: CommandOutput,
    },
}

pub use anyhow::{Error, Result};
