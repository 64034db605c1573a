//! Copy plan: glob expansion, target path mapping and execution.
//!
//! Each matched file keeps its path relative to the literal (non-glob) prefix
//! of the pattern that matched it, so `dist/**/*.css` copies
//! `dist/themes/dark.css` to `<target>/<dest>/themes/dark.css`. A pattern
//! without wildcards keeps only its final component. Directories matched by a
//! pattern are copied recursively.

#[cfg(test)]
#[path = "plan_test.rs"]
mod plan_test;

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::AssetError;
use crate::manifest::Manifest;

const GLOB_META: [char; 3] = ['*', '?', '['];

/// One file to copy.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CopyEntry {
    pub dependency: String,
    pub source: PathBuf,
    pub target: PathBuf,
}

/// A pattern that matched nothing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Unmatched {
    pub dependency: String,
    pub pattern: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CopyPlan {
    pub entries: Vec<CopyEntry>,
    pub unmatched: Vec<Unmatched>,
    /// Per-dependency target directories, in manifest order.
    pub target_dirs: Vec<PathBuf>,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct CopyOptions {
    pub dry_run: bool,
    pub clean: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CopyStats {
    pub copied: usize,
    pub bytes: u64,
    pub cleaned: usize,
}

/// Leading path components of `pattern` that contain no glob metacharacters.
/// For a pattern without wildcards this is its parent directory.
#[must_use]
pub fn literal_prefix(pattern: &str) -> PathBuf {
    let parts: Vec<&str> = pattern.split('/').filter(|s| !s.is_empty() && *s != ".").collect();
    let end = parts.iter().position(|p| p.contains(GLOB_META)).unwrap_or(parts.len().saturating_sub(1));
    parts[..end].iter().collect()
}

/// Expand every pattern of `manifest` into a copy plan.
///
/// A target reached by several patterns is copied once, from the first match.
///
/// # Errors
///
/// Fails on malformed patterns or unreadable directories.
pub fn build(manifest: &Manifest) -> Result<CopyPlan, AssetError> {
    let mut plan = CopyPlan::default();
    let mut seen = HashSet::new();
    let root = glob::Pattern::escape(&manifest.source_root.to_string_lossy());

    for dep in &manifest.dependencies {
        let target_dir = manifest.target_root.join(dep.target_dir());
        if !plan.target_dirs.contains(&target_dir) {
            plan.target_dirs.push(target_dir.clone());
        }

        for pattern in dep.files.iter().map(|f| f.trim()).filter(|f| !f.is_empty()) {
            let base = manifest.source_root.join(literal_prefix(pattern));
            let full = format!("{}/{}", root.trim_end_matches('/'), pattern.trim_start_matches("./"));
            let paths = glob::glob(&full)
                .map_err(|source| AssetError::Pattern { pattern: pattern.to_owned(), source })?;

            let mut matched = false;
            for path in paths {
                for file in expand(&path?)? {
                    let Ok(relative) = file.strip_prefix(&base) else {
                        continue;
                    };
                    matched = true;
                    let target = target_dir.join(relative);
                    if seen.insert(target.clone()) {
                        plan.entries.push(CopyEntry { dependency: dep.name.clone(), source: file, target });
                    }
                }
            }

            if !matched {
                plan.unmatched.push(Unmatched { dependency: dep.name.clone(), pattern: pattern.to_owned() });
            }
        }
    }
    Ok(plan)
}

fn expand(path: &Path) -> Result<Vec<PathBuf>, AssetError> {
    if !path.is_dir() {
        return Ok(vec![path.to_path_buf()]);
    }
    let mut files = Vec::new();
    for entry in WalkDir::new(path).sort_by_file_name() {
        let entry = entry?;
        if entry.file_type().is_file() {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

impl CopyPlan {
    /// Fail when any pattern matched nothing.
    ///
    /// # Errors
    ///
    /// Returns [`AssetError::Unmatched`] with the number of empty patterns.
    pub fn check(&self) -> Result<(), AssetError> {
        for miss in &self.unmatched {
            tracing::error!(dependency = %miss.dependency, pattern = %miss.pattern, "pattern matched no files");
        }
        if self.unmatched.is_empty() {
            tracing::info!(files = self.entries.len(), "all patterns matched");
            Ok(())
        } else {
            Err(AssetError::Unmatched { count: self.unmatched.len() })
        }
    }
}

/// Copy every planned file, optionally removing the target directories first.
///
/// # Errors
///
/// Fails on the first filesystem error.
pub fn execute(plan: &CopyPlan, options: CopyOptions) -> Result<CopyStats, AssetError> {
    let mut stats = CopyStats::default();

    for miss in &plan.unmatched {
        tracing::warn!(dependency = %miss.dependency, pattern = %miss.pattern, "pattern matched no files");
    }

    if options.clean {
        for dir in plan.target_dirs.iter().filter(|d| d.exists()) {
            if options.dry_run {
                tracing::info!(dir = %dir.display(), "would remove");
            } else {
                fs::remove_dir_all(dir).map_err(|e| AssetError::io("remove", dir, e))?;
                tracing::debug!(dir = %dir.display(), "removed");
            }
            stats.cleaned += 1;
        }
    }

    for entry in &plan.entries {
        if options.dry_run {
            tracing::info!(from = %entry.source.display(), to = %entry.target.display(), "would copy");
            stats.copied += 1;
            continue;
        }
        if let Some(parent) = entry.target.parent() {
            fs::create_dir_all(parent).map_err(|e| AssetError::io("create", parent, e))?;
        }
        stats.bytes += fs::copy(&entry.source, &entry.target).map_err(|e| AssetError::io("copy", &entry.source, e))?;
        stats.copied += 1;
        tracing::debug!(from = %entry.source.display(), to = %entry.target.display(), "copied");
    }
    Ok(stats)
}
