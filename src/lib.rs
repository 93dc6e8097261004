// src/lib.rs

pub mod cli;
pub mod config;
pub mod engine;
pub mod errors;
pub mod exec;
pub mod logging;
pub mod module;
pub mod pipeline;
pub mod status;
pub mod watch;

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use crossterm::style::Stylize;
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::cli::CliArgs;
use crate::config::load_or_default;
use crate::engine::{Runtime, RuntimeEvent};
use crate::exec::ProcessRunner;
use crate::module::ModuleResolver;
use crate::pipeline::{PipelineController, PipelineSpec, StepCommand};
use crate::status::StatusReporter;
use crate::watch::ChangeFilter;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading
/// - startup checks (working directory, source root, linter probe)
/// - status reporter / pipeline controller / runtime
/// - file watcher
/// - Ctrl-C handling
pub async fn run(args: CliArgs) -> Result<()> {
    let config_path = PathBuf::from(&args.config);
    let cfg = load_or_default(&config_path)?;

    let cwd = std::env::current_dir().context("determining the working directory")?;

    let source_root = match &cfg.source_root {
        Some(root) => PathBuf::from(root),
        None => cwd.clone(),
    };
    let resolver = ModuleResolver::new(&source_root);
    if !resolver.contains(&cwd) {
        bail!(
            "watchci must be run inside the source root {}",
            source_root.display()
        );
    }

    let width = args.width.unwrap_or(cfg.terminal.width);
    let reporter = Arc::new(StatusReporter::stdout(width, args.plain));

    banner(&cwd);

    // The build and test commands are required; validation already
    // rejected blank ones, the context here covers default-less misuse
    // of the library API.
    let build = StepCommand::parse(&cfg.steps.build).context("steps.build must not be empty")?;
    let test = StepCommand::parse(&cfg.steps.test).context("steps.test must not be empty")?;

    let lint = match StepCommand::parse(&cfg.steps.lint) {
        Some(cmd) => match probe_linter(&cmd.program) {
            Some(path) => Some(StepCommand {
                program: path.to_string_lossy().into_owned(),
                args: cmd.args,
            }),
            None => {
                reporter.warn_line("linter not found, disabling linting for the current session");
                None
            }
        },
        None => None,
    };

    let controller = PipelineController::new(
        Arc::new(ProcessRunner),
        Arc::clone(&reporter),
        resolver,
        PipelineSpec { build, lint, test },
    );

    // Runtime event channel.
    let (rt_tx, rt_rx) = mpsc::channel::<RuntimeEvent>(64);

    let filter = ChangeFilter::new(&cfg.watch.extensions, &cfg.watch.ignore)?;
    let interval = Duration::from_millis(args.interval.unwrap_or(cfg.watch.poll_interval_ms));
    let _watcher_handle = watch::spawn_watcher(cwd.clone(), filter, interval, rt_tx.clone())
        .with_context(|| format!("cannot monitor {}", cwd.display()))?;

    // Ctrl-C → graceful shutdown between pipeline runs.
    {
        let tx = rt_tx.clone();
        tokio::spawn(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                eprintln!("failed to listen for Ctrl+C: {e}");
                return;
            }
            let _ = tx.send(RuntimeEvent::ShutdownRequested).await;
        });
    }

    info!(root = %cwd.display(), "watching for changes");
    Runtime::new(rt_rx, controller).run().await?;

    println!("exiting");
    Ok(())
}

fn banner(root: &Path) {
    println!(
        "{} {}",
        "watchci".bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!(
        "watching {}",
        root.display().to_string().blue().bold()
    );
}

/// Resolve the linter binary once at startup.
///
/// A name with a path separator is checked as-is; a bare name is looked
/// up in `$CARGO_HOME/bin` (falling back to `$HOME/.cargo/bin`), the
/// well-known install location for cargo-distributed tools.
fn probe_linter(name: &str) -> Option<PathBuf> {
    let mut file = name.to_string();
    if cfg!(windows) && !file.ends_with(".exe") {
        file.push_str(".exe");
    }

    let candidate = if file.contains('/') || file.contains('\\') {
        PathBuf::from(&file)
    } else {
        cargo_bin_dir()?.join(&file)
    };

    if candidate.is_file() {
        debug!(linter = %candidate.display(), "linter found");
        Some(candidate)
    } else {
        debug!(linter = %candidate.display(), "linter not found");
        None
    }
}

fn cargo_bin_dir() -> Option<PathBuf> {
    if let Some(home) = std::env::var_os("CARGO_HOME") {
        return Some(PathBuf::from(home).join("bin"));
    }
    let home = std::env::var_os("HOME").or_else(|| std::env::var_os("USERPROFILE"))?;
    Some(PathBuf::from(home).join(".cargo").join("bin"))
}
