// src/engine/mod.rs

//! Orchestration engine for watchci.
//!
//! This module ties together:
//! - the change queue (what happens when changes arrive while a pipeline
//!   run is active)
//! - the main runtime event loop that reacts to:
//!   - file-watch changes
//!   - shutdown signals

pub mod queue;
pub mod runtime;

pub use queue::ChangeQueue;
pub use runtime::{Runtime, RuntimeEvent};
