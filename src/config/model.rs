// src/config/model.rs

use serde::Deserialize;

/// Top-level configuration as read from a TOML file.
///
/// ```toml
/// source_root = "/home/me/src"
///
/// [watch]
/// poll_interval_ms = 500
/// extensions = [".rs"]
/// ignore = ["**/.git/**", "**/target/**"]
///
/// [terminal]
/// width = 80
///
/// [steps]
/// build = "cargo build"
/// lint = "cargo-clippy"
/// test = "cargo test"
/// ```
///
/// All sections are optional and have reasonable defaults.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ConfigFile {
    /// Root that module display names are computed against.
    ///
    /// Defaults to the working directory when absent.
    #[serde(default)]
    pub source_root: Option<String>,

    #[serde(default)]
    pub watch: WatchSection,

    #[serde(default)]
    pub terminal: TerminalSection,

    #[serde(default)]
    pub steps: StepsSection,
}

/// `[watch]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct WatchSection {
    /// Elapsed time between checks for modified source code.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// File extensions that trigger a pipeline run.
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// Glob patterns for paths to ignore, relative to the watched root.
    #[serde(default = "default_ignore")]
    pub ignore: Vec<String>,
}

fn default_poll_interval_ms() -> u64 {
    500
}

fn default_extensions() -> Vec<String> {
    vec![".rs".to_string()]
}

fn default_ignore() -> Vec<String> {
    vec!["**/.git/**".to_string(), "**/target/**".to_string()]
}

impl Default for WatchSection {
    fn default() -> Self {
        Self {
            poll_interval_ms: default_poll_interval_ms(),
            extensions: default_extensions(),
            ignore: default_ignore(),
        }
    }
}

/// `[terminal]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct TerminalSection {
    /// Width used to right-align the status glyph column.
    #[serde(default = "default_width")]
    pub width: usize,
}

fn default_width() -> usize {
    80
}

impl Default for TerminalSection {
    fn default() -> Self {
        Self {
            width: default_width(),
        }
    }
}

/// `[steps]` section: the three pipeline command lines.
///
/// `lint` names the linter binary probed at startup; an empty string
/// disables linting outright.
#[derive(Debug, Clone, Deserialize)]
pub struct StepsSection {
    #[serde(default = "default_build")]
    pub build: String,

    #[serde(default = "default_lint")]
    pub lint: String,

    #[serde(default = "default_test")]
    pub test: String,
}

fn default_build() -> String {
    "cargo build".to_string()
}

fn default_lint() -> String {
    "cargo-clippy".to_string()
}

fn default_test() -> String {
    "cargo test".to_string()
}

impl Default for StepsSection {
    fn default() -> Self {
        Self {
            build: default_build(),
            lint: default_lint(),
            test: default_test(),
        }
    }
}
