//! Validation results and exit-code computation

use std::fmt;

use serde::Serialize;

use crate::document::DocumentRecord;
use crate::Result;

/// Exit code when no document has errors.
pub const EXIT_OK: i32 = 0;
/// Exit code when at least one error was found.
pub const EXIT_ERRORS: i32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

/// Validation phase that produced an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Config,
    Parse,
    Schema,
    Links,
    Format,
    Readability,
    Build,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Config => "config",
            Phase::Parse => "parse",
            Phase::Schema => "schema",
            Phase::Links => "links",
            Phase::Format => "format",
            Phase::Readability => "readability",
            Phase::Build => "build",
        };
        f.write_str(name)
    }
}

/// One error or warning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Issue {
    pub severity: Severity,
    pub phase: Phase,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
}

impl Issue {
    pub fn error(phase: Phase, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            phase,
            message: message.into(),
            line: None,
        }
    }

    pub fn warning(phase: Phase, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            phase,
            message: message.into(),
            line: None,
        }
    }

    pub fn at_line(mut self, line: Option<usize>) -> Self {
        self.line = line;
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "line {line}: {}", self.message),
            None => f.write_str(&self.message),
        }
    }
}

/// Everything a validation run found.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationReport {
    /// Documents scanned (after any type filter)
    pub scanned: usize,
    pub documents: Vec<DocumentRecord>,
    /// Issues not tied to a single document
    pub run_issues: Vec<Issue>,
    pub error_count: usize,
    pub warning_count: usize,
}

impl ValidationReport {
    pub fn new(documents: Vec<DocumentRecord>, run_issues: Vec<Issue>) -> Self {
        let run_errors = run_issues.iter().filter(|i| i.is_error()).count();
        let error_count = run_errors + documents.iter().map(|d| d.errors.len()).sum::<usize>();
        let warning_count = (run_issues.len() - run_errors)
            + documents.iter().map(|d| d.warnings.len()).sum::<usize>();
        Self {
            scanned: documents.len(),
            documents,
            run_issues,
            error_count,
            warning_count,
        }
    }

    pub fn has_errors(&self) -> bool {
        self.error_count > 0
    }

    /// `0` when there are no errors, `1` otherwise. Warnings never fail.
    pub fn exit_code(&self) -> i32 {
        if self.has_errors() { EXIT_ERRORS } else { EXIT_OK }
    }

    pub fn documents_with_errors(&self) -> impl Iterator<Item = &DocumentRecord> {
        self.documents.iter().filter(|d| d.has_errors())
    }

    pub fn documents_with_issues(&self) -> impl Iterator<Item = &DocumentRecord> {
        self.documents
            .iter()
            .filter(|d| !d.errors.is_empty() || !d.warnings.is_empty())
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// A file that a batch operation could not process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileFailure {
    pub path: String,
    pub message: String,
}
