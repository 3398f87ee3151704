//! Error types for docs-cli

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Exit code for usage and internal errors.
pub const EXIT_USAGE: i32 = 2;

/// Errors that end a command before it produces a report
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] docs_core::Error),

    #[error(transparent)]
    Schema(#[from] docs_schema::Error),

    #[error(transparent)]
    Fs(#[from] docs_fs::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// User-facing error with a message
    #[error("{message}")]
    User { message: String },
}

impl CliError {
    pub fn user(message: impl Into<String>) -> Self {
        Self::User {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_error_displays_message() {
        let error = CliError::user("no documents matched");
        assert_eq!(error.to_string(), "no documents matched");
    }

    #[test]
    fn test_unknown_fix_passes_through() {
        let error = CliError::from(docs_core::Error::UnknownFix {
            name: "spelling".into(),
            available: "tags, dates".into(),
        });
        assert_eq!(error.to_string(), "Unknown fix: spelling (available: tags, dates)");
    }
}
