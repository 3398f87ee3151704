//! Well-known names inside a documentation repository.

use std::path::Path;

/// Standard docs-cms filesystem markers and paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CmsPath {
    /// The `docs-cms` directory holding all managed documents
    CmsDir,
    /// The `docs-project.yaml` project configuration
    ProjectConfig,
    /// The `templates` directory (never scanned)
    TemplatesDir,
    /// The `.git` directory
    GitDir,
}

impl CmsPath {
    /// Get the string representation of the path.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CmsDir => "docs-cms",
            Self::ProjectConfig => "docs-project.yaml",
            Self::TemplatesDir => "templates",
            Self::GitDir => ".git",
        }
    }
}

/// Accepted file names for the project configuration, in lookup order.
pub const PROJECT_CONFIG_CANDIDATES: &[&str] = &[
    "docs-project.yaml",
    "docs-project.yml",
    "docs-project.toml",
    "docs-project.json",
];

/// File extensions treated as Markdown documents.
pub const MARKDOWN_EXTENSIONS: &[&str] = &["md", "mdx"];

impl AsRef<Path> for CmsPath {
    fn as_ref(&self) -> &Path {
        Path::new(self.as_str())
    }
}

impl AsRef<str> for CmsPath {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl std::fmt::Display for CmsPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
