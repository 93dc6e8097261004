// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{Parser, ValueEnum};

/// Command-line arguments for `watchci`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "watchci",
    version,
    about = "Watch a source tree and re-run build, lint and test on change.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the config file (TOML).
    ///
    /// The file is optional; built-in defaults apply when it does not exist.
    #[arg(long, value_name = "PATH", default_value = "Watchci.toml")]
    pub config: String,

    /// Poll interval in milliseconds between checks for modified source code.
    ///
    /// Overrides `watch.poll_interval_ms` from the config file.
    #[arg(short = 'i', long, value_name = "MS")]
    pub interval: Option<u64>,

    /// Terminal width used to right-align status glyphs.
    ///
    /// Overrides `terminal.width` from the config file.
    #[arg(short = 'w', long, value_name = "COLS")]
    pub width: Option<usize>,

    /// Disable in-place status updates; append a plain line per state change.
    #[arg(long)]
    pub plain: bool,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `WATCHCI_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
