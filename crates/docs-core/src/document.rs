//! Per-document scan results

use docs_content::Frontmatter;
use docs_fs::NormalizedPath;
use docs_schema::DocType;
use serde::Serialize;

use crate::report::{Issue, Severity};

/// One scanned document and the issues found in it.
///
/// Created fresh for every scan and only appended to while validating.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentRecord {
    pub path: NormalizedPath,
    /// Path relative to the CMS root
    pub rel_path: String,
    pub doc_type: DocType,
    /// `None` when the frontmatter could not be parsed
    #[serde(skip)]
    pub frontmatter: Option<Frontmatter>,
    #[serde(skip)]
    pub source: String,
    /// Byte offset of the body within `source`
    #[serde(skip)]
    pub body_offset: usize,
    /// 1-based file line of the first body line
    #[serde(skip)]
    pub body_line: usize,
    pub errors: Vec<Issue>,
    pub warnings: Vec<Issue>,
}

impl DocumentRecord {
    pub fn body(&self) -> &str {
        self.source.get(self.body_offset..).unwrap_or_default()
    }

    pub fn is_parsed(&self) -> bool {
        self.frontmatter.is_some()
    }

    /// File name without its extension.
    pub fn file_stem(&self) -> &str {
        self.path.file_stem().unwrap_or_default()
    }

    /// Route an issue to the error or warning list.
    pub fn push(&mut self, issue: Issue) {
        match issue.severity {
            Severity::Error => self.errors.push(issue),
            Severity::Warning => self.warnings.push(issue),
        }
    }

    pub fn extend(&mut self, issues: impl IntoIterator<Item = Issue>) {
        for issue in issues {
            self.push(issue);
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}
