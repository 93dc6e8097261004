// src/pipeline/mod.rs

//! The change-driven pipeline: build, then lint, then test.
//!
//! - [`step`] defines the static step commands and per-run reports.
//! - [`controller`] owns the per-trigger state machine, the session-wide
//!   lint flag, and the status/console reporting for each step.

pub mod controller;
pub mod step;

pub use controller::{PipelineController, SessionState};
pub use step::{PipelineSpec, RunReport, StepCommand, StepKind, StepOutcome, StepReport};
