//! Error types for docs-content

/// Result type for docs-content operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while reading a frontmatter block
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("no frontmatter: the document does not start with a `---` line")]
    MissingFrontmatter,

    #[error("frontmatter opened on line 1 is never closed by a `---` line")]
    Unterminated,

    #[error("invalid YAML{}: {}", at_line(.line), .message)]
    Yaml { line: Option<usize>, message: String },

    #[error("duplicate frontmatter key `{key}` on line {line}")]
    DuplicateKey { key: String, line: usize },

    #[error("frontmatter must be a mapping of keys to values, found {found}")]
    NotAMapping { found: String },
}

fn at_line(line: &Option<usize>) -> String {
    line.map(|l| format!(" on line {l}")).unwrap_or_default()
}

impl Error {
    pub fn yaml(line: Option<usize>, message: impl Into<String>) -> Self {
        Self::Yaml {
            line,
            message: message.into(),
        }
    }

    /// File line the error points at, when known.
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::MissingFrontmatter | Self::Unterminated => Some(1),
            Self::Yaml { line, .. } => *line,
            Self::DuplicateKey { line, .. } => Some(*line),
            Self::NotAMapping { .. } => Some(2),
        }
    }
}
