// src/watch/mod.rs

//! File watching and change dispatch.
//!
//! This module is responsible for:
//! - Compiling the extension allow-list and ignore glob set.
//! - Wiring up a polling filesystem watcher (`notify`).
//!
//! It does **not** know about the pipeline; it only turns qualifying
//! filesystem changes into runtime events.

pub mod filter;
pub mod watcher;

pub use filter::ChangeFilter;
pub use watcher::{spawn_watcher, WatcherHandle};
