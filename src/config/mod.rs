// src/config/mod.rs

//! Configuration loading and validation for watchci.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load a config file from disk, falling back to defaults when the
//!   file does not exist (`loader.rs`).
//! - Validate basic invariants like sane interval/width values
//!   (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{load_from_path, load_or_default};
pub use model::{ConfigFile, StepsSection, TerminalSection, WatchSection};
pub use validate::validate_config;
