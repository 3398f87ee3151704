//! Document discovery and parsing
//!
//! The scanner walks every configured document folder, classifies each
//! Markdown file and parses its frontmatter. One bad file never aborts a
//! scan: parse failures become document errors, and files without any
//! frontmatter are skipped with a warning.

use std::collections::BTreeMap;

use docs_content::frontmatter;
use docs_fs::constants::MARKDOWN_EXTENSIONS;
use docs_fs::{io, NormalizedPath};
use docs_schema::DocType;
use walkdir::{DirEntry, WalkDir};

use crate::document::DocumentRecord;
use crate::report::{Issue, Phase};
use crate::RunConfig;

/// Directories never descended into.
const SKIPPED_DIRS: &[&str] = &["node_modules", "build", ".docusaurus"];

/// A Markdown file found under a document folder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredFile {
    pub path: NormalizedPath,
    /// Path relative to the CMS root
    pub rel_path: String,
    /// Type mapped to the containing folder, if any
    pub folder_type: Option<DocType>,
}

/// Documents plus run-level notes from one scan.
#[derive(Debug, Clone, Default)]
pub struct ScanResult {
    pub documents: Vec<DocumentRecord>,
    /// Skipped files and other issues that belong to no document
    pub issues: Vec<Issue>,
}

pub struct Scanner<'a> {
    config: &'a RunConfig,
}

impl<'a> Scanner<'a> {
    pub fn new(config: &'a RunConfig) -> Self {
        Self { config }
    }

    /// Every candidate Markdown file, sorted by path.
    pub fn discover(&self) -> Vec<DiscoveredFile> {
        let template_dir = self.config.template_dir();
        let mut found = BTreeMap::new();

        for (folder, folder_type) in self.config.document_folders() {
            let root = self.config.cms_root().join(&folder);
            if !root.is_dir() {
                tracing::debug!(folder = %folder, "document folder does not exist, skipping");
                continue;
            }
            let walker = WalkDir::new(root.to_native())
                .follow_links(false)
                .sort_by_file_name()
                .into_iter()
                .filter_entry(|entry| !is_skipped_dir(entry, &template_dir));

            for entry in walker {
                let entry = match entry {
                    Ok(entry) => entry,
                    Err(e) => {
                        tracing::warn!(error = %e, "cannot read directory entry");
                        continue;
                    }
                };
                if !entry.file_type().is_file() {
                    continue;
                }
                let path = NormalizedPath::new(entry.path());
                if !is_candidate(&path) {
                    continue;
                }
                let rel_path = self.config.display_path(&path);
                found.entry(path.clone()).or_insert(DiscoveredFile {
                    path,
                    rel_path,
                    folder_type,
                });
            }
        }

        tracing::debug!(count = found.len(), "discovered documents");
        found.into_values().collect()
    }

    /// Classify an explicitly named file by the document folder holding it.
    pub fn classify(&self, path: &NormalizedPath) -> DiscoveredFile {
        let rel_path = self.config.display_path(path);
        let folder_type = self
            .config
            .document_folders()
            .into_iter()
            .find(|(folder, _)| {
                rel_path
                    .strip_prefix(folder.as_str())
                    .is_some_and(|rest| rest.starts_with('/'))
            })
            .and_then(|(_, doc_type)| doc_type);
        DiscoveredFile {
            path: path.clone(),
            rel_path,
            folder_type,
        }
    }

    /// Discover and parse every document.
    pub fn scan(&self) -> ScanResult {
        let mut result = ScanResult::default();
        for file in self.discover() {
            match self.load(&file) {
                Loaded::Document(record) => result.documents.push(*record),
                Loaded::Skipped(issue) => result.issues.push(issue),
            }
        }
        tracing::info!(documents = result.documents.len(), "scan complete");
        result
    }

    fn load(&self, file: &DiscoveredFile) -> Loaded {
        let mut record = DocumentRecord {
            path: file.path.clone(),
            rel_path: file.rel_path.clone(),
            doc_type: file.folder_type.unwrap_or(DocType::Generic),
            frontmatter: None,
            source: String::new(),
            body_offset: 0,
            body_line: 1,
            errors: Vec::new(),
            warnings: Vec::new(),
        };

        let source = match io::read_text(&file.path) {
            Ok(source) => source,
            Err(e) => {
                tracing::warn!(path = %file.rel_path, error = %e, "cannot read document");
                record.push(Issue::error(
                    Phase::Parse,
                    format!("document could not be read: {e}"),
                ));
                return Loaded::Document(Box::new(record));
            }
        };

        match frontmatter::parse(&source) {
            Ok(parsed) => {
                record.body_offset = source.len() - parsed.body.len();
                record.body_line = parsed.body_line;
                if file.folder_type.is_none() {
                    record.doc_type = resolve_doc_type(None, Some(&parsed.frontmatter));
                }
                record.frontmatter = Some(parsed.frontmatter);
            }
            Err(docs_content::Error::MissingFrontmatter) => {
                tracing::warn!(path = %file.rel_path, "no frontmatter, skipping");
                return Loaded::Skipped(Issue::warning(
                    Phase::Parse,
                    format!("{}: no frontmatter, not checked", file.rel_path),
                ));
            }
            Err(e) => {
                tracing::debug!(path = %file.rel_path, error = %e, "frontmatter parse failed");
                record.push(
                    Issue::error(Phase::Parse, format!("frontmatter could not be parsed: {e}"))
                        .at_line(e.line()),
                );
                if let Ok(Some(split)) = frontmatter::split(&source) {
                    record.body_offset = source.len() - split.body.len();
                    record.body_line = split.body_line;
                }
            }
        }
        record.source = source;
        Loaded::Document(Box::new(record))
    }
}

enum Loaded {
    Document(Box<DocumentRecord>),
    Skipped(Issue),
}

/// Folder type first, then the `id` prefix, then [`DocType::Generic`].
pub fn resolve_doc_type(
    folder_type: Option<DocType>,
    frontmatter: Option<&docs_content::Frontmatter>,
) -> DocType {
    folder_type
        .or_else(|| {
            frontmatter
                .and_then(|fm| fm.get_str("id"))
                .and_then(DocType::from_id)
        })
        .unwrap_or(DocType::Generic)
}

fn is_skipped_dir(entry: &DirEntry, template_dir: &NormalizedPath) -> bool {
    if !entry.file_type().is_dir() || entry.depth() == 0 {
        return false;
    }
    let name = entry.file_name().to_string_lossy();
    name.starts_with('.')
        || SKIPPED_DIRS.contains(&name.as_ref())
        || NormalizedPath::new(entry.path()) == *template_dir
}

/// Markdown files that are real documents rather than indexes or templates.
pub fn is_candidate(path: &NormalizedPath) -> bool {
    let Some(name) = path.file_name() else {
        return false;
    };
    let is_markdown = path
        .extension()
        .is_some_and(|ext| MARKDOWN_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()));
    let lower = name.to_ascii_lowercase();
    is_markdown
        && !matches!(lower.as_str(), "readme.md" | "index.md" | "index.mdx")
        && !lower.starts_with("_category_")
        && !lower.starts_with("000-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidate_filter() {
        assert!(is_candidate(&NormalizedPath::new("/d/adr/adr-001-x.md")));
        assert!(is_candidate(&NormalizedPath::new("/d/adr/adr-002-x.mdx")));
        assert!(!is_candidate(&NormalizedPath::new("/d/adr/README.md")));
        assert!(!is_candidate(&NormalizedPath::new("/d/adr/index.md")));
        assert!(!is_candidate(&NormalizedPath::new("/d/adr/000-template.md")));
        assert!(!is_candidate(&NormalizedPath::new("/d/adr/_category_.json")));
        assert!(!is_candidate(&NormalizedPath::new("/d/adr/diagram.png")));
    }

    #[test]
    fn test_resolve_doc_type_prefers_folder() {
        let fm = docs_content::Frontmatter::from_yaml("id: rfc-001\n", 2).unwrap();
        assert_eq!(resolve_doc_type(Some(DocType::Adr), Some(&fm)), DocType::Adr);
        assert_eq!(resolve_doc_type(None, Some(&fm)), DocType::Rfc);
        assert_eq!(resolve_doc_type(None, None), DocType::Generic);
    }
}
