//! Scanner, validator and fix registry for docs-cms repositories
//!
//! The read path is [`Scanner`] → [`Validator`] → [`ValidationReport`].
//! Fixes run through the [`FixRegistry`] directly on files and do not
//! depend on a prior validation.

pub mod bulk;
pub mod config;
pub mod document;
pub mod error;
pub mod fixes;
pub mod report;
pub mod scanner;
pub mod validator;

pub use bulk::{BulkOperation, BulkOutcome, BulkSummary, BulkUpdate};
pub use config::RunConfig;
pub use document::DocumentRecord;
pub use error::{Error, Result};
pub use fixes::{Fix, FixContext, FixOptions, FixOutput, FixRegistry, FixSummary};
pub use report::{FileFailure, Issue, Phase, Severity, ValidationReport, EXIT_ERRORS, EXIT_OK};
pub use scanner::{DiscoveredFile, ScanResult, Scanner};
pub use validator::Validator;
