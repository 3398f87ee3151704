//! Immutable run configuration
//!
//! Everything a scan, validation or fix run needs is resolved once up
//! front and passed by reference; nothing reads ambient global state.

use std::path::Path;

use docs_fs::{CmsLayout, NormalizedPath};
use docs_schema::{DocType, ProjectConfig};

use crate::Result;

#[derive(Debug, Clone)]
pub struct RunConfig {
    layout: CmsLayout,
    project: ProjectConfig,
    skip_build: bool,
    verbose: bool,
}

impl RunConfig {
    /// Detect the CMS layout under `repo_root` and load its project config.
    pub fn load(repo_root: impl AsRef<Path>, cms_dir: Option<&str>) -> Result<Self> {
        let layout = CmsLayout::detect(repo_root, cms_dir)?;
        let project = ProjectConfig::load(&layout)?;
        Ok(Self::new(layout, project))
    }

    pub fn new(layout: CmsLayout, project: ProjectConfig) -> Self {
        Self {
            layout,
            project,
            skip_build: false,
            verbose: false,
        }
    }

    pub fn with_skip_build(mut self, skip_build: bool) -> Self {
        self.skip_build = skip_build;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn layout(&self) -> &CmsLayout {
        &self.layout
    }

    pub fn repo_root(&self) -> &NormalizedPath {
        &self.layout.repo_root
    }

    pub fn cms_root(&self) -> &NormalizedPath {
        &self.layout.cms_root
    }

    pub fn project(&self) -> &ProjectConfig {
        &self.project
    }

    pub fn skip_build(&self) -> bool {
        self.skip_build
    }

    pub fn verbose(&self) -> bool {
        self.verbose
    }

    /// Configured document folders with their mapped type, in config order.
    pub fn document_folders(&self) -> Vec<(String, Option<DocType>)> {
        let mut seen = Vec::new();
        for folder in &self.project.structure.document_folders {
            let folder = folder.trim_matches('/').to_string();
            if seen.iter().any(|(f, _)| *f == folder) {
                continue;
            }
            let doc_type = self.project.doc_type_for_folder(&folder);
            seen.push((folder, doc_type));
        }
        seen
    }

    pub fn template_dir(&self) -> NormalizedPath {
        self.cms_root().join(&self.project.structure.template_dir)
    }

    /// Path relative to the CMS root, for messages.
    pub fn display_path(&self, path: &NormalizedPath) -> String {
        self.layout.display_path(path)
    }
}
