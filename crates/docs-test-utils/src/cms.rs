//! [`TestCms`] builder for linter scenarios.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::{docs, git};

/// A temporary repository holding a `docs-cms/` directory.
///
/// # Example
///
/// ```rust,no_run
/// use docs_test_utils::{docs, TestCms};
///
/// let cms = TestCms::new().with_default_config();
/// cms.write_doc("adr/adr-001-use-rust.md", &docs::adr(1, "Use Rust for tooling", "# Decision\n"));
/// cms.assert_file_exists("docs-cms/adr/adr-001-use-rust.md");
/// ```
pub struct TestCms {
    temp_dir: TempDir,
}

impl Default for TestCms {
    fn default() -> Self {
        Self::new()
    }
}

impl TestCms {
    /// Create a temporary repository with an empty `docs-cms/`.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("TestCms::new: create temp dir");
        fs::create_dir_all(temp_dir.path().join("docs-cms"))
            .expect("TestCms::new: create docs-cms");
        Self { temp_dir }
    }

    /// Repository root.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn cms_root(&self) -> PathBuf {
        self.root().join("docs-cms")
    }

    /// Write `docs-project.yaml` with `content`.
    pub fn with_config(self, content: &str) -> Self {
        self.write_doc("docs-project.yaml", content);
        self
    }

    pub fn with_default_config(self) -> Self {
        self.with_config(docs::PROJECT_CONFIG)
    }

    /// Write a file relative to the CMS root, creating parent folders.
    pub fn write_doc(&self, rel: &str, content: &str) -> PathBuf {
        let path = self.cms_root().join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .unwrap_or_else(|e| panic!("write_doc: create {}: {e}", parent.display()));
        }
        fs::write(&path, content).unwrap_or_else(|e| panic!("write_doc: write {rel}: {e}"));
        path
    }

    /// Read a file relative to the CMS root.
    pub fn read_doc(&self, rel: &str) -> String {
        fs::read_to_string(self.cms_root().join(rel))
            .unwrap_or_else(|e| panic!("read_doc: read {rel}: {e}"))
    }

    /// Turn the repository into a real git repository.
    pub fn init_git(&self) -> git2::Repository {
        git::init_repo(self.root())
    }

    /// Assert that `path` (relative to the repository root) exists.
    ///
    /// # Panics
    /// Panics with a descriptive message if the path does not exist.
    pub fn assert_file_exists(&self, path: &str) {
        let full_path = self.root().join(path);
        assert!(full_path.exists(), "expected {} to exist", full_path.display());
    }
}
