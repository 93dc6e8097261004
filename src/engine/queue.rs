// src/engine/queue.rs

use std::collections::{HashSet, VecDeque};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::module::containing_dir;

/// Queue of changes that arrive while a pipeline run is in progress.
///
/// Semantics:
/// - Entries are kept in arrival order, at most one per module directory.
/// - A change for a module that already has a pending entry is dropped;
///   the queued run will see the latest state of that module's files
///   anyway. Distinct modules each keep their own entry.
///
/// This is the coalescing policy for the "change during a run" case: the
/// runtime drains the event channel between pipeline runs and records
/// everything here before picking the next change to process.
#[derive(Debug, Default)]
pub struct ChangeQueue {
    pending: VecDeque<PathBuf>,
    /// Module directories with a pending entry.
    dirs: HashSet<PathBuf>,
}

impl ChangeQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Record a changed path, coalescing per module directory.
    pub fn record(&mut self, path: PathBuf) {
        let dir = module_key(&path);
        if !self.dirs.insert(dir) {
            debug!(path = %path.display(), "coalesced duplicate change for module");
            return;
        }
        self.pending.push_back(path);
    }

    /// Pop the oldest pending change, freeing its module slot.
    pub fn next(&mut self) -> Option<PathBuf> {
        let path = self.pending.pop_front()?;
        self.dirs.remove(&module_key(&path));
        Some(path)
    }
}

fn module_key(path: &Path) -> PathBuf {
    containing_dir(path).to_path_buf()
}
