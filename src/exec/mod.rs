// src/exec/mod.rs

//! Process execution layer.
//!
//! This module is responsible for running the external pipeline tools
//! (compiler, linter, test runner) with `tokio::process::Command`,
//! capturing their output streams fully into memory.
//!
//! - [`command`] owns the real child-process invocation.
//! - [`runner`] defines the [`CommandRunner`] seam so the pipeline
//!   controller can be exercised in tests without spawning processes.

pub mod command;
pub mod runner;

pub use command::{run_command, CommandOutput};
pub use runner::{CommandRunner, ProcessRunner};
