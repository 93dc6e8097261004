use std::future::Future;
use std::io;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;
use watchci::engine::{Runtime, RuntimeEvent};
use watchci::errors::ExecError;
use watchci::exec::{CommandOutput, CommandRunner};
use watchci::module::ModuleResolver;
use watchci::pipeline::{PipelineController, PipelineSpec, StepCommand};
use watchci::status::StatusReporter;

/// Records every call and always succeeds with empty output.
#[derive(Default)]
struct RecordingRunner {
    calls: Mutex<Vec<(PathBuf, String)>>,
}

impl RecordingRunner {
    fn dirs(&self) -> Vec<PathBuf> {
        self.calls.lock().unwrap().iter().map(|(d, _)| d.clone()).collect()
    }
}

impl CommandRunner for RecordingRunner {
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
        Box::pin(async { Ok(CommandOutput::default()) })
    }
}

fn controller(runner: Arc<RecordingRunner>) -> PipelineController {
    let reporter = Arc::new(StatusReporter::with_writers(
        Box::new(io::sink()),
        Box::new(io::sink()),
        80,
        false,
    ));
    let spec = PipelineSpec {
        build: StepCommand::parse("buildc").unwrap(),
        lint: None,
        test: StepCommand::parse("testc").unwrap(),
    };
    PipelineController::new(runner, reporter, ModuleResolver::new("/work"), spec)
}

#[tokio::test]
async fn queued_events_run_to_completion_in_order() -> anyhow::Result<()> {
    let runner = Arc::new(RecordingRunner::default());
    let (tx, rx) = mpsc::channel::<RuntimeEvent>(16);

    tx.send(RuntimeEvent::SourceChanged {
        path: PathBuf::from("/work/a/main.rs"),
    })
    .await?;
    tx.send(RuntimeEvent::SourceChanged {
        path: PathBuf::from("/work/b/main.rs"),
    })
    .await?;
    drop(tx);

    Runtime::new(rx, controller(Arc::clone(&runner))).run().await?;

    // Two steps (build, test) per module, strictly sequential, in event order.
    assert_eq!(
        runner.dirs(),
        vec![
            PathBuf::from("/work/a"),
            PathBuf::from("/work/a"),
            PathBuf::from("/work/b"),
            PathBuf::from("/work/b"),
        ]
    );

    Ok(())
}

#[tokio::test]
async fn shutdown_is_honored_between_runs() -> anyhow::Result<()> {
    let runner = Arc::new(RecordingRunner::default());
    let (tx, rx) = mpsc::channel::<RuntimeEvent>(16);

    tx.send(RuntimeEvent::SourceChanged {
        path: PathBuf::from("/work/a/main.rs"),
    })
    .await?;
    tx.send(RuntimeEvent::ShutdownRequested).await?;
    tx.send(RuntimeEvent::SourceChanged {
        path: PathBuf::from("/work/b/main.rs"),
    })
    .await?;
    drop(tx);

    Runtime::new(rx, controller(Arc::clone(&runner))).run().await?;

    // The first pipeline finished; the change queued after the shutdown
    // request never ran.
    assert_eq!(
        runner.dirs(),
        vec![PathBuf::from("/work/a"), PathBuf::from("/work/a")]
    );

    Ok(())
}
