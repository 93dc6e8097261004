// src/watch/filter.rs

use std::path::Path;

use anyhow::{Context, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};

/// Decides which changed paths are worth a pipeline run.
///
/// A path qualifies when its extension is on the allow-list and it does
/// not match any ignore glob. Paths are matched in root-relative,
/// forward-slash form (e.g. `"src/foo/bar.rs"`).
#[derive(Debug, Clone)]
pub struct ChangeFilter {
    /// Lowercase extensions without the leading dot.
    extensions: Vec<String>,
    ignore_set: Option<GlobSet>,
}

impl ChangeFilter {
    pub fn new(extensions: &[String], ignore: &[String]) -> Result<Self> {
        let extensions = extensions
            .iter()
            .map(|e| e.trim_start_matches('.').to_lowercase())
            .collect();

        let ignore_set = if ignore.is_empty() {
            None
        } else {
            Some(build_globset(ignore).context("building ignore globset")?)
        };

        Ok(Self {
            extensions,
            ignore_set,
        })
    }

    pub fn accepts(&self, rel_path: &str) -> bool {
        if let Some(ignore) = &self.ignore_set {
            if ignore.is_match(rel_path) {
                return false;
            }
        }

        let Some(ext) = Path::new(rel_path).extension().and_then(|e| e.to_str()) else {
            return false;
        };
        let ext = ext.to_lowercase();
        self.extensions.iter().any(|e| *e == ext)
    }
}

fn build_globset(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pat in patterns {
        let glob = Glob::new(pat).with_context(|| format!("invalid glob pattern: {pat}"))?;
        builder.add(glob);
    }
    Ok(builder.build()?)
}
