//! Bulk-update command implementation

use std::path::PathBuf;

use docs_core::{BulkOperation, BulkUpdate};

use crate::cli::GlobalArgs;
use crate::context::{run_config, target_files};
use crate::error::Result;
use crate::render;

/// Arguments of `docs bulk-update`
#[derive(Debug, Clone, Default)]
pub struct BulkArgs {
    pub field: String,
    pub value: Option<String>,
    pub operation: String,
    pub new_name: Option<String>,
    pub dry_run: bool,
    pub files: Vec<PathBuf>,
    pub json: bool,
}

impl BulkArgs {
    fn update(&self) -> Result<BulkUpdate> {
        let operation: BulkOperation = self.operation.parse()?;
        let mut update = BulkUpdate::new(&self.field, operation);
        if let Some(value) = &self.value {
            update = update.with_value(value);
        }
        if let Some(new_name) = &self.new_name {
            update = update.with_new_name(new_name);
        }
        update.validate()?;
        Ok(update)
    }
}

/// Run the bulk-update command
pub fn run_bulk_update(global: &GlobalArgs, args: &BulkArgs) -> Result<i32> {
    let update = args.update()?;
    let config = run_config(global)?;
    let targets = target_files(&config, &args.files);
    let summary = update.run(&targets, args.dry_run)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("{}", render::bulk_summary(&summary, config.verbose()));
    }
    Ok(summary.exit_code())
}

#[cfg(test)]
mod tests {
    use super::*;
    use docs_test_utils::{docs, TestCms};

    fn args(field: &str, operation: &str) -> BulkArgs {
        BulkArgs {
            field: field.to_string(),
            operation: operation.to_string(),
            ..BulkArgs::default()
        }
    }

    #[test]
    fn test_update_requires_value_for_set() {
        assert!(args("status", "set").update().is_err());
        assert!(args("status", "merge").update().is_err());
        assert!(args("status", "remove").update().is_ok());
    }

    #[test]
    fn test_set_status_across_tree() {
        let cms = TestCms::new().with_default_config();
        cms.write_doc("rfcs/rfc-001-api.md", &docs::rfc(1, "API design", "Body\n"));
        let global = GlobalArgs {
            verbose: false,
            repo_root: cms.root().to_path_buf(),
            cms_dir: None,
        };
        let mut request = args("status", "set");
        request.value = Some("In Review".to_string());

        assert_eq!(run_bulk_update(&global, &request).unwrap(), 0);
        assert!(cms.read_doc("rfcs/rfc-001-api.md").contains("status: In Review\n"));
    }
}
