use std::io;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("failed to read manifest {}: {source}", path.display())]
    ReadManifest { path: PathBuf, source: io::Error },
    #[error("invalid manifest JSON: {0}")]
    ParseManifest(#[from] serde_json::Error),
    #[error("invalid manifest: {0}")]
    InvalidManifest(String),
    #[error("invalid glob `{pattern}`: {source}")]
    Pattern { pattern: String, source: glob::PatternError },
    #[error("glob walk failed: {0}")]
    Glob(#[from] glob::GlobError),
    #[error("directory walk failed: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("{count} pattern(s) matched no files")]
    Unmatched { count: usize },
    #[error("{op} {}: {source}", path.display())]
    Io { op: &'static str, path: PathBuf, source: io::Error },
}

impl AssetError {
    pub fn io(op: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io { op, path: path.into(), source }
    }
}
