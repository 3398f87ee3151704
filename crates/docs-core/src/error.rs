//! Error types for docs-core

use std::path::PathBuf;

/// Result type for docs-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while scanning, validating or fixing documents
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Frontmatter could not be parsed
    #[error("Failed to parse {}{}: {message}", .path.display(), at_line(.line))]
    ParseError {
        path: PathBuf,
        line: Option<usize>,
        message: String,
    },

    /// A fix name that is not registered
    #[error("Unknown fix: {name} (available: {available})")]
    UnknownFix { name: String, available: String },

    /// The build command ran past its time limit
    #[error("Build command timed out after {seconds}s")]
    BuildTimeout { seconds: u64 },

    /// The build command could not be started
    #[error("Failed to run build command `{command}`: {message}")]
    BuildFailed { command: String, message: String },

    /// Git history could not be read
    #[error("Git error for {}: {message}", .path.display())]
    Git { path: PathBuf, message: String },

    /// A bulk update request that cannot be carried out
    #[error("Invalid update: {message}")]
    InvalidUpdate { message: String },

    #[error(transparent)]
    Fs(#[from] docs_fs::Error),

    #[error(transparent)]
    Content(#[from] docs_content::Error),

    #[error(transparent)]
    Schema(#[from] docs_schema::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

fn at_line(line: &Option<usize>) -> String {
    line.map(|l| format!(" (line {l})")).unwrap_or_default()
}

impl Error {
    /// Attach a file path to a frontmatter error.
    pub fn parse(path: impl Into<PathBuf>, source: &docs_content::Error) -> Self {
        Self::ParseError {
            path: path.into(),
            line: source.line(),
            message: source.to_string(),
        }
    }

    pub fn git(path: impl Into<PathBuf>, source: git2::Error) -> Self {
        Self::Git {
            path: path.into(),
            message: source.message().to_string(),
        }
    }

    pub fn invalid_update(message: impl Into<String>) -> Self {
        Self::InvalidUpdate {
            message: message.into(),
        }
    }
}
