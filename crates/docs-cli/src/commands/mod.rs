//! Command implementations for docs-cli
//!
//! Every command returns the process exit code on success; errors map to
//! exit code 2 in `main`.

pub mod bulk_update;
pub mod completions;
pub mod fix;
pub mod list_fixes;
pub mod validate;

pub use bulk_update::{run_bulk_update, BulkArgs};
pub use completions::run_completions;
pub use fix::run_fix;
pub use list_fixes::run_list_fixes;
pub use validate::run_validate;
