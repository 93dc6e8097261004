use std::collections::{HashMap, VecDeque};
use std::future::Future;
use std::io;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use watchci::errors::ExecError;
use watchci::exec::{CommandOutput, CommandRunner};
use watchci::module::ModuleResolver;
use watchci::pipeline::{PipelineController, PipelineSpec, StepCommand, StepKind, StepOutcome};
use watchci::status::StatusReporter;

/// A command runner that replays scripted results per program name and
/// records every call. Programs without a script succeed with empty
/// output.
#[derive(Default)]
struct ScriptedRunner {
    script: Mutex<HashMap<String, VecDeque<Result<CommandOutput, ExecError>>>>,
    calls: Mutex<Vec<(PathBuf, String)>>,
}

impl ScriptedRunner {
    fn push(&self, program: &str, result: Result<CommandOutput, ExecError>) {
        self.script
            .lock()
            .unwrap()
            .entry(program.to_string())
            .or_default()
            .push_back(result);
    }

    fn calls_for(&self, program: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(_, p)| p == program)
            .count()
    }
}

impl CommandRunner for ScriptedRunner {
    fn run<'a>(
        &'a self,
        dir: &'a Path,
        program: &'a str,
        _args: &'a [String],
    ) -> Pin<Box<dyn Future<Output = Result<CommandOutput, ExecError>> + Send + 'a>> {
        self.calls
            .lock()
            .unwrap()
            .push((dir.to_path_buf(), program.to_string()));

        let result = self
            .script
            .lock()
            .unwrap()
            .get_mut(program)
            .and_then(|queue| queue.pop_front())
            .unwrap_or_else(|| Ok(CommandOutput::default()));

        Box::pin(async move { result })
    }
}

fn non_zero(program: &str, code: i32, stdout: &str, stderr: &str) -> ExecError {
    ExecError::NonZero {
        program: program.to_string(),
        code,
        output: CommandOutput {
            stdout: stdout.to_string(),
            stderr: stderr.to_string(),
        },
    }
}

fn spawn_failure(program: &str) -> ExecError {
    ExecError::Spawn {
        program: program.to_string(),
        source: io::Error::new(io::ErrorKind::NotFound, "no such file"),
    }
}

fn sink_reporter() -> Arc<StatusReporter> {
    Arc::new(StatusReporter::with_writers(
        Box::new(io::sink()),
        Box::new(io::sink()),
        80,
        false,
    ))
}

fn controller(runner: Arc<ScriptedRunner>, with_lint: bool) -> PipelineController {
    let spec = PipelineSpec {
        build: StepCommand::parse("buildc").unwrap(),
        lint: with_lint.then(|| StepCommand::parse("lintc").unwrap()),
        test: StepCommand::parse("testc").unwrap(),
    };
    PipelineController::new(runner, sink_reporter(), ModuleResolver::new("/work"), spec)
}

#[tokio::test]
async fn build_failure_aborts_lint_and_test() {
    let runner = Arc::new(ScriptedRunner::default());
    runner.push("buildc", Err(non_zero("buildc", 1, "", "syntax error")));

    let mut ctrl = controller(Arc::clone(&runner), true);
    let report = ctrl.run_for_change(Path::new("/work/app/main.rs")).await;

    assert_eq!(report.module, "app");
    assert_eq!(report.steps.len(), 1);
    assert_eq!(
        report.outcome_of(StepKind::Build),
        Some(StepOutcome::Failure)
    );
    assert_eq!(runner.calls_for("lintc"), 0);
    assert_eq!(runner.calls_for("testc"), 0);
}

#[tokio::test]
async fn lint_findings_report_warning_and_tests_still_run() {
    let runner = Arc::new(ScriptedRunner::default());
    runner.push(
        "lintc",
        Ok(CommandOutput {
            stdout: "main.rs:3: exported function lacks a doc comment\n".to_string(),
            stderr: String::new(),
        }),
    );

    let mut ctrl = controller(Arc::clone(&runner), true);
    let report = ctrl.run_for_change(Path::new("/work/app/main.rs")).await;

    assert_eq!(
        report.outcome_of(StepKind::Lint),
        Some(StepOutcome::Warning)
    );
    assert_eq!(report.outcome_of(StepKind::Test), Some(StepOutcome::Success));
    assert_eq!(runner.calls_for("testc"), 1);
}

#[tokio::test]
async fn lint_execution_error_disables_linting_for_the_session() {
    let runner = Arc::new(ScriptedRunner::default());
    runner.push("lintc", Err(spawn_failure("lintc")));

    let mut ctrl = controller(Arc::clone(&runner), true);

    let first = ctrl.run_for_change(Path::new("/work/app/main.rs")).await;
    assert_eq!(first.outcome_of(StepKind::Lint), Some(StepOutcome::Failure));
    // The run continued past the broken linter.
    assert_eq!(first.outcome_of(StepKind::Test), Some(StepOutcome::Success));
    assert!(!ctrl.lint_enabled());

    // Any later trigger, for any module, must skip the lint phase.
    let second = ctrl.run_for_change(Path::new("/work/other/lib.rs")).await;
    assert!(!second.ran(StepKind::Lint));
    assert_eq!(runner.calls_for("lintc"), 1);
}

#[tokio::test]
async fn test_failure_ends_the_run_but_not_the_session() {
    let runner = Arc::new(ScriptedRunner::default());
    runner.push("testc", Err(non_zero("testc", 1, "1 test failed: smoke", "")));

    let mut ctrl = controller(Arc::clone(&runner), false);

    let first = ctrl.run_for_change(Path::new("/work/app/main.rs")).await;
    assert_eq!(first.outcome_of(StepKind::Test), Some(StepOutcome::Failure));

    // An unrelated change still gets a full, clean run.
    let second = ctrl.run_for_change(Path::new("/work/other/lib.rs")).await;
    assert_eq!(
        second.outcome_of(StepKind::Build),
        Some(StepOutcome::Success)
    );
    assert_eq!(
        second.outcome_of(StepKind::Test),
        Some(StepOutcome::Success)
    );
}

#[tokio::test]
async fn sequence_of_runs_reports_outcomes_in_event_order() {
    let runner = Arc::new(ScriptedRunner::default());
    runner.push("testc", Ok(CommandOutput::default()));
    runner.push("testc", Ok(CommandOutput::default()));
    runner.push("testc", Err(non_zero("testc", 1, "regression in a", "")));

    let mut ctrl = controller(Arc::clone(&runner), false);

    let events = [
        "/work/a/main.rs",
        "/work/b/main.rs",
        "/work/a/main.rs",
    ];
    let mut results = Vec::new();
    for path in events {
        let report = ctrl.run_for_change(Path::new(path)).await;
        results.push((
            report.module.clone(),
            report.outcome_of(StepKind::Build).unwrap(),
            report.outcome_of(StepKind::Test).unwrap(),
        ));
    }

    assert_eq!(
        results,
        vec![
            ("a".to_string(), StepOutcome::Success, StepOutcome::Success),
            ("b".to_string(), StepOutcome::Success, StepOutcome::Success),
            ("a".to_string(), StepOutcome::Success, StepOutcome::Failure),
        ]
    );
}
