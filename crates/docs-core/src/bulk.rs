//! Bulk frontmatter updates
//!
//! One field operation applied to many documents. Edits go through the
//! text-preserving frontmatter editor, so only the touched entry changes.

use std::fmt;
use std::str::FromStr;

use docs_content::yaml::{render_flow_list, render_scalar, scalar_text, top_level_key};
use docs_content::{frontmatter, FrontmatterEditor};
use docs_fs::io;
use serde::Serialize;
use serde_yaml::Value;

use crate::report::{FileFailure, EXIT_ERRORS, EXIT_OK};
use crate::scanner::DiscoveredFile;
use crate::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BulkOperation {
    /// Create or replace a scalar value
    Set,
    /// Append to a list, creating it if needed
    Add,
    /// Delete the field, or one item of a list
    Remove,
    Rename,
}

impl FromStr for BulkOperation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "set" => Ok(Self::Set),
            "add" => Ok(Self::Add),
            "remove" => Ok(Self::Remove),
            "rename" => Ok(Self::Rename),
            other => Err(Error::invalid_update(format!(
                "unknown operation `{other}` (expected set, add, remove or rename)"
            ))),
        }
    }
}

impl fmt::Display for BulkOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Set => "set",
            Self::Add => "add",
            Self::Remove => "remove",
            Self::Rename => "rename",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkUpdate {
    pub field: String,
    pub operation: BulkOperation,
    pub value: Option<String>,
    pub new_name: Option<String>,
}

/// What an update did to one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BulkOutcome {
    Changed(String),
    Unchanged,
    NoFrontmatter,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct BulkSummary {
    pub dry_run: bool,
    pub changed: Vec<String>,
    pub unchanged: usize,
    /// Documents without frontmatter
    pub skipped: Vec<String>,
    pub failures: Vec<FileFailure>,
}

impl BulkSummary {
    pub fn exit_code(&self) -> i32 {
        if self.failures.is_empty() { EXIT_OK } else { EXIT_ERRORS }
    }
}

fn is_valid_key(key: &str) -> bool {
    top_level_key(&format!("{key}: x")).is_some_and(|(parsed, _)| parsed == key)
}

fn list_items(field: &str, value: Option<&Value>) -> Result<Vec<String>> {
    match value {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Sequence(items)) => Ok(items.iter().filter_map(scalar_text).collect()),
        Some(other) => scalar_text(other)
            .map(|text| vec![text])
            .ok_or_else(|| Error::invalid_update(format!("`{field}` is not a list"))),
    }
}

impl BulkUpdate {
    pub fn new(field: impl Into<String>, operation: BulkOperation) -> Self {
        Self {
            field: field.into(),
            operation,
            value: None,
            new_name: None,
        }
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn with_new_name(mut self, new_name: impl Into<String>) -> Self {
        self.new_name = Some(new_name.into());
        self
    }

    /// Reject requests that cannot apply to any document.
    pub fn validate(&self) -> Result<()> {
        if !is_valid_key(&self.field) {
            return Err(Error::invalid_update(format!("`{}` is not a valid field name", self.field)));
        }
        match self.operation {
            BulkOperation::Set | BulkOperation::Add if self.value.is_none() => Err(Error::invalid_update(
                format!("`{}` needs a value", self.operation),
            )),
            BulkOperation::Rename => match self.new_name.as_deref() {
                Some(name) if is_valid_key(name) => Ok(()),
                Some(name) => Err(Error::invalid_update(format!("`{name}` is not a valid field name"))),
                None => Err(Error::invalid_update("`rename` needs a new field name")),
            },
            _ => Ok(()),
        }
    }

    /// Apply the update to one document's text.
    pub fn apply_to(&self, content: &str) -> Result<BulkOutcome> {
        self.validate()?;
        let parsed = match frontmatter::parse(content) {
            Ok(parsed) => parsed,
            Err(docs_content::Error::MissingFrontmatter) => return Ok(BulkOutcome::NoFrontmatter),
            Err(e) => return Err(e.into()),
        };
        let Some(mut editor) = FrontmatterEditor::new(content)? else {
            return Ok(BulkOutcome::NoFrontmatter);
        };
        let fm = &parsed.frontmatter;
        let field = self.field.as_str();
        let value = self.value.as_deref().unwrap_or_default();

        let changed = match self.operation {
            BulkOperation::Set => editor.set(field, &render_scalar(value)),
            BulkOperation::Add => {
                let mut items = list_items(field, fm.get(field))?;
                if items.iter().any(|item| item == value) {
                    false
                } else {
                    items.push(value.to_string());
                    editor.set(field, &render_flow_list(&items))
                }
            }
            BulkOperation::Remove => match (&self.value, fm.get(field)) {
                (None, _) => editor.remove(field),
                (Some(_), Some(Value::Sequence(_))) => {
                    let items = list_items(field, fm.get(field))?;
                    let kept: Vec<String> = items.iter().filter(|item| *item != value).cloned().collect();
                    kept.len() != items.len() && editor.set(field, &render_flow_list(&kept))
                }
                (Some(_), Some(other)) if scalar_text(other).as_deref() == Some(value) => editor.remove(field),
                _ => false,
            },
            BulkOperation::Rename => {
                let new_name = self.new_name.as_deref().unwrap_or_default();
                if new_name != field && editor.has_key(new_name) && editor.has_key(field) {
                    return Err(Error::invalid_update(format!(
                        "cannot rename `{field}` to `{new_name}`: `{new_name}` already exists"
                    )));
                }
                editor.rename(field, new_name)
            }
        };

        Ok(if changed {
            BulkOutcome::Changed(editor.finish())
        } else {
            BulkOutcome::Unchanged
        })
    }

    /// Apply the update to every file, collecting per-file results.
    pub fn run(&self, files: &[DiscoveredFile], dry_run: bool) -> Result<BulkSummary> {
        self.validate()?;
        tracing::info!(field = %self.field, operation = %self.operation, files = files.len(), dry_run, "bulk update");

        let mut summary = BulkSummary {
            dry_run,
            ..BulkSummary::default()
        };
        for file in files {
            let result = io::read_text(&file.path)
                .map_err(Error::from)
                .and_then(|content| self.apply_to(&content));
            let outcome = match result {
                Ok(outcome) => outcome,
                Err(e) => {
                    tracing::warn!(path = %file.rel_path, error = %e, "bulk update failed");
                    summary.failures.push(FileFailure {
                        path: file.rel_path.clone(),
                        message: e.to_string(),
                    });
                    continue;
                }
            };
            match outcome {
                BulkOutcome::Changed(updated) => {
                    if !dry_run {
                        if let Err(e) = io::write_atomic(&file.path, updated.as_bytes()) {
                            summary.failures.push(FileFailure {
                                path: file.rel_path.clone(),
                                message: e.to_string(),
                            });
                            continue;
                        }
                    }
                    summary.changed.push(file.rel_path.clone());
                }
                BulkOutcome::Unchanged => summary.unchanged += 1,
                BulkOutcome::NoFrontmatter => summary.skipped.push(file.rel_path.clone()),
            }
        }
        Ok(summary)
    }
}
