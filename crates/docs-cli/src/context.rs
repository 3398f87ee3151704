//! Run configuration from global flags

use std::path::Path;

use docs_core::{DiscoveredFile, RunConfig, Scanner};
use docs_fs::NormalizedPath;

use crate::cli::GlobalArgs;
use crate::error::Result;

/// Detect the CMS layout and load the project config.
pub fn run_config(global: &GlobalArgs) -> Result<RunConfig> {
    let config = RunConfig::load(&global.repo_root, global.cms_dir.as_deref())?;
    tracing::debug!(
        repo_root = %config.repo_root(),
        cms_root = %config.cms_root(),
        project = config.project().project_id(),
        "resolved run configuration"
    );
    Ok(config.with_verbose(global.verbose))
}

/// Files to operate on: the explicit list, or every discovered document.
pub fn target_files(config: &RunConfig, files: &[impl AsRef<Path>]) -> Vec<DiscoveredFile> {
    let scanner = Scanner::new(config);
    if files.is_empty() {
        return scanner.discover();
    }
    files
        .iter()
        .map(|file| {
            let path = file.as_ref();
            // Missing files still get a path so the failure names them.
            let resolved = dunce::canonicalize(path).unwrap_or_else(|_| {
                std::env::current_dir()
                    .map(|cwd| cwd.join(path))
                    .unwrap_or_else(|_| path.to_path_buf())
            });
            scanner.classify(&NormalizedPath::new(resolved).clean())
        })
        .collect()
}
