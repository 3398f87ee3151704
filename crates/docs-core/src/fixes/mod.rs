//! Named, independent document fixes
//!
//! Every fix is a pure text transformation behind the [`Fix`] trait. The
//! [`FixRegistry`] reads each file once, runs the selected fixes over it
//! in memory and writes the result back atomically, unless the run is a
//! dry run. Applying a fix to its own output must report zero changes.

mod blank_lines;
mod code_blocks;
mod dates;
mod frontmatter_fields;
mod frontmatter_whitespace;
mod links;
mod mdx;
mod missing_frontmatter;
mod status;
mod tags;
mod timestamps;
mod whitespace;

pub use blank_lines::BlankLines;
pub use code_blocks::CodeBlocks;
pub use dates::Dates;
pub use frontmatter_fields::FrontmatterFields;
pub use frontmatter_whitespace::FrontmatterWhitespace;
pub use links::InternalLinks;
pub use mdx::MdxEscape;
pub use missing_frontmatter::MissingFrontmatter;
pub use status::Status;
pub use tags::Tags;
pub use timestamps::{file_history, FileHistory, Timestamps};
pub use whitespace::TrailingWhitespace;

use chrono::NaiveDate;
use docs_content::diff::unified_diff;
use docs_content::frontmatter;
use docs_fs::{io, NormalizedPath};
use docs_schema::{DocType, ProjectConfig};
use serde::Serialize;

use crate::report::{FileFailure, EXIT_ERRORS, EXIT_OK};
use crate::scanner::{resolve_doc_type, DiscoveredFile, Scanner};
use crate::{Error, Result, RunConfig};

/// Selection name that runs every fix included in batches.
pub const ALL: &str = "all";

/// What a fix knows about the file it is rewriting.
#[derive(Debug, Clone, Copy)]
pub struct FixContext<'a> {
    pub path: &'a NormalizedPath,
    pub doc_type: DocType,
    pub project: &'a ProjectConfig,
    pub repo_root: &'a NormalizedPath,
    /// Date used for generated `date`/`created` values
    pub today: NaiveDate,
}

/// Rewritten text and the number of changes made.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixOutput {
    pub content: String,
    pub changes: usize,
}

impl FixOutput {
    pub fn new(content: String, changes: usize) -> Self {
        Self { content, changes }
    }

    pub fn unchanged(content: &str) -> Self {
        Self {
            content: content.to_string(),
            changes: 0,
        }
    }
}

/// A named text transformation.
///
/// `apply_to` must be idempotent, and must leave every byte it does not
/// target untouched.
pub trait Fix: Send + Sync {
    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    /// Whether `fix all` runs this fix.
    fn included_in_all(&self) -> bool {
        true
    }

    fn apply_to(&self, ctx: &FixContext<'_>, content: &str) -> Result<FixOutput>;
}

/// Split a document into its frontmatter head and Markdown body.
///
/// Documents without a readable frontmatter block are all body.
pub(crate) fn split_head(content: &str) -> (&str, &str) {
    match frontmatter::split(content) {
        Ok(Some(split)) => content.split_at(content.len() - split.body.len()),
        _ => ("", content),
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FixOptions {
    pub dry_run: bool,
    /// Collect a unified diff for every changed file
    pub diff: bool,
    pub today: NaiveDate,
}

impl Default for FixOptions {
    fn default() -> Self {
        Self {
            dry_run: false,
            diff: false,
            today: chrono::Local::now().date_naive(),
        }
    }
}

/// Changes one fix made to one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppliedFix {
    pub name: &'static str,
    pub changes: usize,
}

/// Result for one changed file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileFix {
    pub path: NormalizedPath,
    pub rel_path: String,
    pub applied: Vec<AppliedFix>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diff: Option<String>,
}

impl FileFix {
    pub fn changes(&self) -> usize {
        self.applied.iter().map(|a| a.changes).sum()
    }
}

/// Outcome of a batch fix run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FixSummary {
    pub dry_run: bool,
    pub files_processed: usize,
    /// Files with at least one change
    pub changed: Vec<FileFix>,
    pub failures: Vec<FileFailure>,
}

impl FixSummary {
    pub fn total_changes(&self) -> usize {
        self.changed.iter().map(FileFix::changes).sum()
    }

    /// Non-zero when any file could not be processed.
    pub fn exit_code(&self) -> i32 {
        if self.failures.is_empty() { EXIT_OK } else { EXIT_ERRORS }
    }
}

/// Catalog of fixes, in the order a batch applies them.
pub struct FixRegistry {
    fixes: Vec<Box<dyn Fix>>,
}

impl FixRegistry {
    pub fn new() -> Self {
        Self { fixes: Vec::new() }
    }

    /// Registry with every built-in fix.
    ///
    /// Frontmatter fixes run before body fixes. Values are trimmed before
    /// status, dates and tags normalize them. Trailing whitespace runs last
    /// so no other fix can leave any behind.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(MissingFrontmatter));
        registry.register(Box::new(FrontmatterWhitespace));
        registry.register(Box::new(FrontmatterFields));
        registry.register(Box::new(Status));
        registry.register(Box::new(Dates));
        registry.register(Box::new(Tags));
        registry.register(Box::new(Timestamps));
        registry.register(Box::new(InternalLinks));
        registry.register(Box::new(CodeBlocks));
        registry.register(Box::new(BlankLines));
        registry.register(Box::new(MdxEscape));
        registry.register(Box::new(TrailingWhitespace));
        registry
    }

    /// Add a fix, replacing any fix with the same name.
    pub fn register(&mut self, fix: Box<dyn Fix>) {
        match self.fixes.iter().position(|f| f.name() == fix.name()) {
            Some(idx) => self.fixes[idx] = fix,
            None => self.fixes.push(fix),
        }
    }

    pub fn get(&self, name: &str) -> Result<&dyn Fix> {
        self.fixes
            .iter()
            .find(|f| f.name() == name)
            .map(|f| f.as_ref())
            .ok_or_else(|| Error::UnknownFix {
                name: name.to_string(),
                available: self.names().join(", "),
            })
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.fixes.iter().map(|f| f.name()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn Fix> {
        self.fixes.iter().map(|f| f.as_ref())
    }

    pub fn len(&self) -> usize {
        self.fixes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fixes.is_empty()
    }

    /// Fixes named by `selection`: one fix, or every batch fix for `all`.
    pub fn resolve(&self, selection: &str) -> Result<Vec<&dyn Fix>> {
        if selection == ALL {
            return Ok(self.iter().filter(|f| f.included_in_all()).collect());
        }
        Ok(vec![self.get(selection)?])
    }

    /// Apply one fix to one file and return its change count.
    ///
    /// In dry-run mode the file is left untouched and the count is the one
    /// a real run would report.
    pub fn apply(&self, name: &str, path: &NormalizedPath, config: &RunConfig, dry_run: bool) -> Result<usize> {
        let fix = self.get(name)?;
        let file = Scanner::new(config).classify(path);
        let options = FixOptions {
            dry_run,
            ..FixOptions::default()
        };
        let result = fix_file(&[fix], &file, config, &options)?;
        Ok(result.map_or(0, |f| f.changes()))
    }

    /// Run the selected fixes over `files`.
    ///
    /// Fails only for an unknown selection. Per-file problems are collected
    /// in the summary and the remaining files are still processed.
    pub fn run(
        &self,
        selection: &str,
        files: &[DiscoveredFile],
        config: &RunConfig,
        options: &FixOptions,
    ) -> Result<FixSummary> {
        let fixes = self.resolve(selection)?;
        tracing::info!(
            selection,
            files = files.len(),
            dry_run = options.dry_run,
            "running fixes"
        );

        let mut summary = FixSummary {
            dry_run: options.dry_run,
            ..FixSummary::default()
        };
        for file in files {
            summary.files_processed += 1;
            match fix_file(&fixes, file, config, options) {
                Ok(Some(result)) => summary.changed.push(result),
                Ok(None) => {}
                Err(e) => {
                    tracing::warn!(path = %file.rel_path, error = %e, "fix failed");
                    summary.failures.push(FileFailure {
                        path: file.rel_path.clone(),
                        message: e.to_string(),
                    });
                }
            }
        }
        Ok(summary)
    }
}

impl Default for FixRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn doc_type_of(file: &DiscoveredFile, content: &str) -> DocType {
    if file.folder_type.is_some() {
        return resolve_doc_type(file.folder_type, None);
    }
    let parsed = frontmatter::parse(content).ok();
    resolve_doc_type(None, parsed.as_ref().map(|p| &p.frontmatter))
}

/// Run `fixes` over one file; `None` when nothing changed.
fn fix_file(
    fixes: &[&dyn Fix],
    file: &DiscoveredFile,
    config: &RunConfig,
    options: &FixOptions,
) -> Result<Option<FileFix>> {
    let original = io::read_text(&file.path)?;
    let ctx = FixContext {
        path: &file.path,
        doc_type: doc_type_of(file, &original),
        project: config.project(),
        repo_root: config.repo_root(),
        today: options.today,
    };

    let mut content = original.clone();
    let mut applied = Vec::new();
    for fix in fixes {
        let output = fix.apply_to(&ctx, &content)?;
        if output.changes > 0 {
            tracing::debug!(path = %file.rel_path, fix = fix.name(), changes = output.changes, "fixed");
            applied.push(AppliedFix {
                name: fix.name(),
                changes: output.changes,
            });
            content = output.content;
        }
    }

    if applied.is_empty() {
        return Ok(None);
    }
    if !options.dry_run && content != original {
        io::write_atomic(&file.path, content.as_bytes())?;
    }
    let diff = options
        .diff
        .then(|| unified_diff(&file.rel_path, &original, &content));
    Ok(Some(FileFix {
        path: file.path.clone(),
        rel_path: file.rel_path.clone(),
        applied,
        diff,
    }))
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_catalog() {
        let registry = FixRegistry::with_builtins();
        assert_eq!(registry.len(), 12);
        assert!(registry.get("trailing-whitespace").is_ok());
        let all: Vec<_> = registry.resolve(ALL).unwrap().iter().map(|f| f.name()).collect();
        assert!(!all.contains(&"timestamps"));
        assert_eq!(all.len(), 11);
    }

    #[test]
    fn test_unknown_fix_lists_available() {
        let registry = FixRegistry::with_builtins();
        let err = registry.get("spelling").err().unwrap();
        let message = err.to_string();
        assert!(message.contains("spelling"));
        assert!(message.contains("code-blocks"));
    }

    #[test]
    fn test_split_head() {
        assert_eq!(split_head("---\na: 1\n---\nbody\n"), ("---\na: 1\n---\n", "body\n"));
        assert_eq!(split_head("no frontmatter\n"), ("", "no frontmatter\n"));
        assert_eq!(split_head("---\nunterminated\n"), ("", "---\nunterminated\n"));
    }
}
