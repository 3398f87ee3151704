//! Error types for docs-schema

use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Unknown document type: {name} (expected one of: {expected})")]
    UnknownDocType { name: String, expected: String },

    #[error("Invalid project configuration at {path}: {message}")]
    InvalidConfig { path: PathBuf, message: String },

    #[error(transparent)]
    Fs(#[from] docs_fs::Error),
}

impl Error {
    pub fn unknown_doc_type(name: impl Into<String>) -> Self {
        let expected = crate::DocType::ALL
            .iter()
            .map(|t| t.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        Self::UnknownDocType {
            name: name.into(),
            expected,
        }
    }
}
