// src/config/validate.rs

use anyhow::{bail, Result};

use crate::config::model::ConfigFile;
use crate::pipeline::StepCommand;

/// Check basic invariants of a loaded configuration.
///
/// `steps.lint` may be blank (that disables linting); build and test
/// commands are required.
pub fn validate_config(cfg: &ConfigFile) -> Result<()> {
    if cfg.watch.poll_interval_ms == 0 {
        bail!("watch.poll_interval_ms must be at least 1");
    }

    if cfg.watch.extensions.is_empty() {
        bail!("watch.extensions must list at least one extension");
    }

    if cfg.terminal.width < 16 {
        bail!("terminal.width must be at least 16 columns");
    }

    if StepCommand::parse(&cfg.steps.build).is_none() {
        bail!("steps.build must not be empty");
    }

    if StepCommand::parse(&cfg.steps.test).is_none() {
        bail!("steps.test must not be empty");
    }

    Ok(())
}
