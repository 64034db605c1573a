//! Asset manifest: which files of which third-party package go where.
//!
//! ```json
//! {
//!   "sourceRoot": "node_modules",
//!   "targetRoot": "src/main/resources/META-INF/resources/resources/javascript/libs",
//!   "dependencies": [
//!     { "name": "openseadragon", "files": ["openseadragon/build/openseadragon/*.js"] },
//!     { "name": "swiper", "files": ["swiper/swiper-bundle.min.*"], "dest": "swiper" }
//!   ]
//! }
//! ```
//!
//! Relative roots are resolved against the directory holding the manifest.

#[cfg(test)]
#[path = "manifest_test.rs"]
mod manifest_test;

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::AssetError;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    pub source_root: PathBuf,
    pub target_root: PathBuf,
    #[serde(default)]
    pub dependencies: Vec<Dependency>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Dependency {
    pub name: String,
    /// Glob patterns relative to the source root.
    pub files: Vec<String>,
    /// Directory below the target root; defaults to `name`.
    #[serde(default)]
    pub dest: Option<String>,
}

impl Dependency {
    #[must_use]
    pub fn target_dir(&self) -> &str {
        self.dest.as_deref().filter(|d| !d.trim().is_empty()).unwrap_or(&self.name)
    }
}

impl Manifest {
    /// Read, parse and validate the manifest at `path`.
    ///
    /// # Errors
    ///
    /// Fails when the file cannot be read, is not valid JSON, or does not validate.
    pub fn load(path: &Path) -> Result<Self, AssetError> {
        let raw = std::fs::read_to_string(path)
            .map_err(|source| AssetError::ReadManifest { path: path.to_path_buf(), source })?;
        let base = path.parent().unwrap_or_else(|| Path::new(""));
        Ok(Self::parse(&raw)?.resolve_against(base))
    }

    /// Parse and validate a manifest body without touching the filesystem.
    ///
    /// # Errors
    ///
    /// Fails on invalid JSON or when [`Manifest::validate`] rejects it.
    pub fn parse(raw: &str) -> Result<Self, AssetError> {
        let manifest: Self = serde_json::from_str(raw)?;
        manifest.validate()?;
        Ok(manifest)
    }

    /// Every dependency needs a name and at least one pattern; names are unique.
    ///
    /// # Errors
    ///
    /// Returns [`AssetError::InvalidManifest`] naming the first problem found.
    pub fn validate(&self) -> Result<(), AssetError> {
        let mut seen = HashSet::new();
        for dep in &self.dependencies {
            if dep.name.trim().is_empty() {
                return Err(AssetError::InvalidManifest("dependency without a name".to_owned()));
            }
            if !seen.insert(dep.name.as_str()) {
                return Err(AssetError::InvalidManifest(format!("duplicate dependency `{}`", dep.name)));
            }
            if dep.files.iter().all(|f| f.trim().is_empty()) {
                return Err(AssetError::InvalidManifest(format!("dependency `{}` lists no files", dep.name)));
            }
            if Path::new(dep.target_dir()).is_absolute() || dep.target_dir().split('/').any(|s| s == "..") {
                return Err(AssetError::InvalidManifest(format!(
                    "dependency `{}` has a destination outside the target root",
                    dep.name
                )));
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn resolve_against(mut self, base: &Path) -> Self {
        if self.source_root.is_relative() {
            self.source_root = base.join(&self.source_root);
        }
        if self.target_root.is_relative() {
            self.target_root = base.join(&self.target_root);
        }
        self
    }
}
