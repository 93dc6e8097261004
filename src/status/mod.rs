// src/status/mod.rs

//! Terminal status rendering.
//!
//! One live row per in-flight pipeline step: a label plus a status glyph
//! right-aligned at a column derived from the configured terminal width.
//! Rows start as pending and are overwritten in place when the step
//! finishes, which works even when rows finalize out of creation order.

pub mod reporter;

pub use reporter::{RowState, StatusReporter, TaskHandle};
