// src/pipeline/step.rs

use std::fmt;

/// One external tool invocation: a program and its fixed arguments.
#[derive(Debug, Clone)]
pub struct StepCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl StepCommand {
    /// Split a command line on whitespace into program + args.
    ///
    /// Returns `None` for a blank command line. No shell quoting; the
    /// pipeline tools are invoked directly, not through a shell.
    pub fn parse(cmdline: &str) -> Option<Self> {
        let mut parts = cmdline.split_whitespace();
        let program = parts.next()?.to_string();
        Some(Self {
            program,
            args: parts.map(str::to_string).collect(),
        })
    }
}

/// The statically ordered pipeline for one module.
///
/// `lint = None` means the linter was absent at startup and the Linting
/// phase never runs.
#[derive(Debug, Clone)]
pub struct PipelineSpec {
    pub build: StepCommand,
    pub lint: Option<StepCommand>,
    pub test: StepCommand,
}

/// Which of the three pipeline phases a report entry refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
    Build,
    Lint,
    Test,
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StepKind::Build => "build",
            StepKind::Lint => "lint",
            StepKind::Test => "test",
        };
        f.write_str(s)
    }
}

/// Outcome of one executed step.
///
/// `Warning` applies only to lint: the tool exited 0 but printed findings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Success,
    Failure,
    Warning,
}

/// One executed step and its outcome.
#[derive(Debug, Clone, Copy)]
pub struct StepReport {
    pub step: StepKind,
    pub outcome: StepOutcome,
}

/// What one pipeline run did, in execution order.
///
/// Steps that were skipped (lint disabled, or everything after a build
/// failure) simply do not appear.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub module: String,
    pub steps: Vec<StepReport>,
}

impl RunReport {
    pub fn ran(&self, step: StepKind) -> bool {
        self.steps.iter().any(|s| s.step == step)
    }

    pub fn outcome_of(&self, step: StepKind) -> Option<StepOutcome> {
        self.steps
            .iter()
            .find(|s| s.step == step)
            .map(|s| s.outcome)
    }
}
