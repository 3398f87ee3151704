//! Fix command implementation

use std::path::PathBuf;

use docs_core::{FixOptions, FixRegistry};

use crate::cli::GlobalArgs;
use crate::context::{run_config, target_files};
use crate::error::Result;
use crate::render;

/// Run the fix command
pub fn run_fix(
    global: &GlobalArgs,
    name: &str,
    dry_run: bool,
    diff: bool,
    files: &[PathBuf],
    json: bool,
) -> Result<i32> {
    let registry = FixRegistry::with_builtins();
    // Reject unknown names before reading anything.
    registry.resolve(name)?;

    let config = run_config(global)?;
    let targets = target_files(&config, files);
    let options = FixOptions {
        dry_run,
        diff,
        ..FixOptions::default()
    };
    let summary = registry.run(name, &targets, &config, &options)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("{}", render::fix_summary(&summary, config.verbose()));
    }
    Ok(summary.exit_code())
}

#[cfg(test)]
mod tests {
    use super::*;
    use docs_test_utils::TestCms;

    fn global(cms: &TestCms) -> GlobalArgs {
        GlobalArgs {
            verbose: true,
            repo_root: cms.root().to_path_buf(),
            cms_dir: None,
        }
    }

    #[test]
    fn test_dry_run_leaves_file() {
        let cms = TestCms::new().with_default_config();
        cms.write_doc("memos/memo-001-plan.md", "Line 1   \n");
        let code = run_fix(&global(&cms), "trailing-whitespace", true, true, &[], false).unwrap();
        assert_eq!(code, 0);
        assert_eq!(cms.read_doc("memos/memo-001-plan.md"), "Line 1   \n");
    }

    #[test]
    fn test_explicit_file_only() {
        let cms = TestCms::new().with_default_config();
        let target = cms.write_doc("memos/memo-001-plan.md", "Line 1   \n");
        cms.write_doc("memos/memo-002-other.md", "Other   \n");
        run_fix(&global(&cms), "trailing-whitespace", false, false, &[target], false).unwrap();
        assert_eq!(cms.read_doc("memos/memo-001-plan.md"), "Line 1\n");
        assert_eq!(cms.read_doc("memos/memo-002-other.md"), "Other   \n");
    }

    #[test]
    fn test_unknown_fix_is_an_error() {
        let cms = TestCms::new().with_default_config();
        assert!(run_fix(&global(&cms), "spelling", false, false, &[], false).is_err());
    }
}
