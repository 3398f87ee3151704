//! CMS root detection
//!
//! A repository either keeps its documents under `docs-cms/` or is itself
//! the CMS root. An explicit directory name always wins over detection.

use std::path::Path;

use crate::constants::{CmsPath, PROJECT_CONFIG_CANDIDATES};
use crate::{Error, NormalizedPath, Result};

/// Resolved locations for one linter run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CmsLayout {
    /// Canonical repository root
    pub repo_root: NormalizedPath,
    /// Directory containing the document folders and project config
    pub cms_root: NormalizedPath,
}

impl CmsLayout {
    /// Detect the layout below `repo_root`.
    ///
    /// `cms_dir` overrides detection and must name an existing directory
    /// relative to the repository root.
    pub fn detect(repo_root: impl AsRef<Path>, cms_dir: Option<&str>) -> Result<Self> {
        let repo_root = repo_root.as_ref();
        let canonical = dunce::canonicalize(repo_root).map_err(|_| Error::RootNotFound {
            path: repo_root.to_path_buf(),
        })?;
        if !canonical.is_dir() {
            return Err(Error::RootNotFound {
                path: repo_root.to_path_buf(),
            });
        }
        let repo_root = NormalizedPath::new(&canonical);

        let cms_root = match cms_dir {
            Some(dir) => {
                let candidate = repo_root.join(dir).clean();
                if !candidate.is_dir() {
                    return Err(Error::CmsDirNotFound {
                        path: candidate.to_native(),
                    });
                }
                candidate
            }
            None => {
                let conventional = repo_root.join(CmsPath::CmsDir.as_str());
                if conventional.is_dir() {
                    conventional
                } else {
                    repo_root.clone()
                }
            }
        };

        tracing::debug!(repo_root = %repo_root, cms_root = %cms_root, "detected CMS layout");
        Ok(Self {
            repo_root,
            cms_root,
        })
    }

    /// The first project configuration file that exists, if any.
    pub fn project_config_path(&self) -> Option<NormalizedPath> {
        PROJECT_CONFIG_CANDIDATES
            .iter()
            .map(|name| self.cms_root.join(name))
            .find(NormalizedPath::is_file)
    }

    /// Path of a folder directly below the CMS root.
    pub fn folder(&self, name: &str) -> NormalizedPath {
        self.cms_root.join(name)
    }

    /// Display form of `path` relative to the CMS root, falling back to the
    /// full path for files outside it.
    pub fn display_path(&self, path: &NormalizedPath) -> String {
        path.relative_to(&self.cms_root)
            .filter(|rel| !rel.is_empty())
            .unwrap_or_else(|| path.to_string())
    }
}
