// src/module.rs

//! Mapping file-system paths to logical module names.
//!
//! A module is a directory under the configured source root; its display
//! name is the root-relative path in forward-slash form. Paths outside the
//! root pass through unchanged.

use std::path::{Path, PathBuf};

/// Resolves paths to module display names relative to a source root.
#[derive(Debug, Clone)]
pub struct ModuleResolver {
    root: PathBuf,
    /// Forward-slash form of `root`, kept for prefix comparison.
    root_fwd: String,
}

impl ModuleResolver {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let root_fwd = root.to_string_lossy().replace('\\', "/");
        Self { root, root_fwd }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns true if `path` lies under the source root (case-insensitive).
    pub fn contains(&self, path: &Path) -> bool {
        let p = path.to_string_lossy().replace('\\', "/");
        has_prefix_ignore_ascii_case(&p, &self.root_fwd)
    }

    /// Convert a path under the source root to a module display name.
    ///
    /// The root prefix is stripped case-insensitively, separators become
    /// forward slashes and the leading separator is removed. A path outside
    /// the root is returned untouched. Infallible; already-relative input
    /// simply takes the untouched branch, so the function is idempotent on
    /// its own output.
    pub fn display_name(&self, path: &Path) -> String {
        let p = path.to_string_lossy().replace('\\', "/");

        if has_prefix_ignore_ascii_case(&p, &self.root_fwd) {
            return p[self.root_fwd.len()..].trim_start_matches('/').to_string();
        }

        path.to_string_lossy().into_owned()
    }
}

/// Directory a changed file belongs to; this is what the pipeline builds.
pub fn containing_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => path,
    }
}

fn has_prefix_ignore_ascii_case(s: &str, prefix: &str) -> bool {
    s.len() >= prefix.len()
        && s.is_char_boundary(prefix.len())
        && s[..prefix.len()].eq_ignore_ascii_case(prefix)
}
