// src/pipeline/controller.rs

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::errors::ExecError;
use crate::exec::CommandRunner;
use crate::module::{containing_dir, ModuleResolver};
use crate::pipeline::step::{
    PipelineSpec, RunReport, StepCommand, StepKind, StepOutcome, StepReport,
};
use crate::status::{RowState, StatusReporter};

/// Session-wide pipeline state.
///
/// `lint_enabled` starts true when a linter was found at startup and is
/// cleared, never reset, by the controller on the first lint execution
/// error. Pipelines run strictly one at a time on the runtime loop, so a
/// plain bool is enough; parallel pipelines would need to move this
/// behind shared synchronized state.
#[derive(Debug, Clone)]
pub struct SessionState {
    pub lint_enabled: bool,
}

/// Runs the build → lint → test sequence for one triggered module.
///
/// Per-step policy:
/// - build failure aborts the remaining steps for this trigger;
/// - a lint execution error disables linting for the rest of the session
///   but the run continues;
/// - a test failure is reported but ends the run normally.
///
/// Failures are never propagated upward: one module's broken build must
/// not stop the watch loop. Steps are never retried; the next file change
/// is the retry.
pub struct PipelineController {
    runner: Arc<dyn CommandRunner>,
    reporter: Arc<StatusReporter>,
    resolver: ModuleResolver,
    spec: PipelineSpec,
    session: SessionState,
}

impl PipelineController {
    pub fn new(
        runner: Arc<dyn CommandRunner>,
        reporter: Arc<StatusReporter>,
        resolver: ModuleResolver,
        spec: PipelineSpec,
    ) -> Self {
        let session = SessionState {
            lint_enabled: spec.lint.is_some(),
        };
        Self {
            runner,
            reporter,
            resolver,
            spec,
            session,
        }
    }

    pub fn lint_enabled(&self) -> bool {
        self.session.lint_enabled
    }

    /// Run the full pipeline for the module containing `path`.
    pub async fn run_for_change(&mut self, path: &Path) -> RunReport {
        let dir = containing_dir(path).to_path_buf();
        let module = self.resolver.display_name(&dir);
        debug!(module = %module, "pipeline triggered");

        let mut steps = Vec::new();
        self.reporter.blank_line();

        // Build: required, aborts the run on failure.
        let task = self.reporter.begin_task(format!("Building {module}"));
        let build = self.spec.build.clone();
        match self.run_step(&dir, &build).await {
            Err(err) => {
                self.reporter.finish(&task, RowState::Failure);
                self.reporter.dump_err(&stderr_of(&err));
                steps.push(StepReport {
                    step: StepKind::Build,
                    outcome: StepOutcome::Failure,
                });
                return RunReport { module, steps };
            }
            Ok(_) => {
                self.reporter.finish(&task, RowState::Success);
                steps.push(StepReport {
                    step: StepKind::Build,
                    outcome: StepOutcome::Success,
                });
            }
        }

        // Lint: optional, disabled for the rest of the session on the
        // first execution error.
        if self.session.lint_enabled {
            if let Some(lint) = self.spec.lint.clone() {
                let task = self.reporter.begin_task("Linting");
                match self.run_step(&dir, &lint).await {
                    Err(err) => {
                        self.reporter.finish(&task, RowState::Failure);
                        warn!(error = %err, "lint tool failed to run");
                        self.reporter.warn_line(
                            "an error occurred while linting, disabling linting for this session",
                        );
                        self.session.lint_enabled = false;
                        steps.push(StepReport {
                            step: StepKind::Lint,
                            outcome: StepOutcome::Failure,
                        });
                    }
                    Ok(out) if !out.stdout.is_empty() => {
                        self.reporter.finish(&task, RowState::Warning);
                        self.reporter
                            .dump(&format!("#{}\n{}", base_name(&dir), out.stdout));
                        steps.push(StepReport {
                            step: StepKind::Lint,
                            outcome: StepOutcome::Warning,
                        });
                    }
                    Ok(_) => {
                        self.reporter.finish(&task, RowState::Success);
                        steps.push(StepReport {
                            step: StepKind::Lint,
                            outcome: StepOutcome::Success,
                        });
                    }
                }
            }
        }

        // Test: required, but failure does not abort anything; the run
        // ends here either way.
        let task = self.reporter.begin_task("Testing");
        let test = self.spec.test.clone();
        match self.run_step(&dir, &test).await {
            Err(err) => {
                self.reporter.finish(&task, RowState::Failure);
                self.reporter
                    .dump(&format!("some tests failed:\n{}", stdout_of(&err)));
                steps.push(StepReport {
                    step: StepKind::Test,
                    outcome: StepOutcome::Failure,
                });
            }
            Ok(_) => {
                self.reporter.finish(&task, RowState::Success);
                steps.push(StepReport {
                    step: StepKind::Test,
                    outcome: StepOutcome::Success,
                });
            }
        }

        RunReport { module, steps }
    }

    async fn run_step(
        &self,
        dir: &Path,
        cmd: &StepCommand,
    ) -> Result<crate::exec::CommandOutput, ExecError> {
        self.runner.run(dir, &cmd.program, &cmd.args).await
    }
}

/// Text to show for a failed step on the error console: the tool's own
/// stderr when it ran, otherwise the spawn error.
fn stderr_of(err: &ExecError) -> String {
    match err {
        ExecError::NonZero { output, .. } => output.stderr.clone(),
        other => other.to_string(),
    }
}

/// Test runners report failures on stdout.
fn stdout_of(err: &ExecError) -> String {
    match err {
        ExecError::NonZero { output, .. } => output.stdout.clone(),
        other => other.to_string(),
    }
}

fn base_name(dir: &Path) -> String {
    dir.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| dir.to_string_lossy().into_owned())
}
