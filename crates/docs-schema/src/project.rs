//! Project configuration (`docs-project.yaml`)
//!
//! The file is optional. Without it every setting takes its default and
//! the project id is `my-project`.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use docs_fs::{CmsLayout, ConfigStore, NormalizedPath};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::{DocType, Error, Result};

pub const DEFAULT_PROJECT_ID: &str = "my-project";

static PROJECT_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9-]+$").expect("project id regex is valid"));

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProjectConfig {
    pub project: ProjectInfo,
    #[serde(default)]
    pub structure: StructureConfig,
    #[serde(default)]
    pub metadata: MetadataConfig,
    #[serde(default)]
    pub validation: ValidationSettings,
    #[serde(default)]
    pub readability: ReadabilitySettings,
    #[serde(default)]
    pub build: BuildSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectInfo {
    /// Lowercase id written into every document's `project_id`
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl Default for ProjectInfo {
    fn default() -> Self {
        Self {
            id: DEFAULT_PROJECT_ID.to_string(),
            name: "My Project".to_string(),
            description: None,
        }
    }
}

/// Folder names, relative to the CMS root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StructureConfig {
    pub adr_dir: String,
    pub rfc_dir: String,
    pub memo_dir: String,
    pub prd_dir: String,
    pub frd_dir: String,
    pub prdfaq_dir: String,
    pub template_dir: String,
    /// Folders the scanner walks
    pub document_folders: Vec<String>,
}

impl Default for StructureConfig {
    fn default() -> Self {
        Self {
            adr_dir: "adr".to_string(),
            rfc_dir: "rfcs".to_string(),
            memo_dir: "memos".to_string(),
            prd_dir: "prd".to_string(),
            frd_dir: "frd".to_string(),
            prdfaq_dir: "prdfaq".to_string(),
            template_dir: "templates".to_string(),
            document_folders: ["adr", "rfcs", "memos", "prd"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

impl StructureConfig {
    /// Configured folder for each numbered type.
    fn type_dirs(&self) -> [(DocType, &str); 6] {
        [
            (DocType::Adr, self.adr_dir.as_str()),
            (DocType::Rfc, self.rfc_dir.as_str()),
            (DocType::Memo, self.memo_dir.as_str()),
            (DocType::Prd, self.prd_dir.as_str()),
            (DocType::Frd, self.frd_dir.as_str()),
            (DocType::PrdFaq, self.prdfaq_dir.as_str()),
        ]
    }

    /// Document type for a folder, by its configured name.
    pub fn doc_type_for_folder(&self, folder: &str) -> Option<DocType> {
        let folder = folder.trim_matches('/');
        self.type_dirs()
            .into_iter()
            .find(|(_, dir)| dir.trim_matches('/') == folder)
            .map(|(doc_type, _)| doc_type)
    }

    /// Folder holding documents of `doc_type`.
    pub fn folder_for(&self, doc_type: DocType) -> Option<&str> {
        self.type_dirs()
            .into_iter()
            .find(|(t, _)| *t == doc_type)
            .map(|(_, dir)| dir)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MetadataConfig {
    pub created: Option<String>,
    pub maintainers: Vec<String>,
    pub purpose: Option<String>,
}

/// Toggles for the optional validation phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationSettings {
    pub check_links: bool,
    pub check_format: bool,
    pub check_mdx: bool,
}

impl Default for ValidationSettings {
    fn default() -> Self {
        Self {
            check_links: true,
            check_format: true,
            check_mdx: true,
        }
    }
}

/// Paragraph readability thresholds. `None` disables a metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReadabilitySettings {
    pub enabled: bool,
    pub flesch_reading_ease_min: Option<f64>,
    pub flesch_kincaid_grade_max: Option<f64>,
    pub gunning_fog_max: Option<f64>,
    pub smog_index_max: Option<f64>,
    pub automated_readability_index_max: Option<f64>,
    pub coleman_liau_index_max: Option<f64>,
    /// Paragraphs shorter than this many characters are not scored
    pub min_paragraph_length: usize,
}

impl Default for ReadabilitySettings {
    fn default() -> Self {
        Self {
            enabled: false,
            flesch_reading_ease_min: Some(60.0),
            flesch_kincaid_grade_max: Some(10.0),
            gunning_fog_max: Some(12.0),
            smog_index_max: Some(12.0),
            automated_readability_index_max: Some(10.0),
            coleman_liau_index_max: Some(10.0),
            min_paragraph_length: 100,
        }
    }
}

/// How a failed site build is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildSeverity {
    #[default]
    Error,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildSettings {
    /// Shell command run from the CMS root
    pub command: String,
    pub timeout_secs: u64,
    pub failure_severity: BuildSeverity,
}

impl Default for BuildSettings {
    fn default() -> Self {
        Self {
            command: "npm run build".to_string(),
            timeout_secs: 300,
            failure_severity: BuildSeverity::Error,
        }
    }
}

impl ProjectConfig {
    /// Load the project config for `layout`, or defaults when none exists.
    pub fn load(layout: &CmsLayout) -> Result<Self> {
        match layout.project_config_path() {
            Some(path) => Self::load_from(&path),
            None => {
                tracing::debug!(cms_root = %layout.cms_root, "no project config, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn load_from(path: &NormalizedPath) -> Result<Self> {
        let config: Self = ConfigStore::new().load(path)?;
        config.validate(path)?;
        tracing::debug!(path = %path, project = %config.project.id, "loaded project config");
        Ok(config)
    }

    fn validate(&self, path: &NormalizedPath) -> Result<()> {
        let invalid = |message: String| Error::InvalidConfig {
            path: path.to_native(),
            message,
        };
        if !PROJECT_ID.is_match(&self.project.id) {
            return Err(invalid(format!(
                "project.id `{}` must be lowercase letters, digits and hyphens",
                self.project.id
            )));
        }
        if self.build.timeout_secs == 0 {
            return Err(invalid("build.timeout_secs must be greater than zero".into()));
        }
        Ok(())
    }

    pub fn project_id(&self) -> &str {
        &self.project.id
    }

    pub fn doc_type_for_folder(&self, folder: &str) -> Option<DocType> {
        self.structure.doc_type_for_folder(folder)
    }

    /// Non-fatal configuration problems worth reporting.
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        let mut seen = BTreeMap::new();
        for folder in &self.structure.document_folders {
            *seen.entry(folder.as_str()).or_insert(0usize) += 1;
        }
        for (folder, count) in &seen {
            if *count > 1 {
                warnings.push(format!(
                    "folder `{folder}` is listed {count} times in structure.document_folders"
                ));
            }
        }

        let mut owners: BTreeMap<&str, Vec<DocType>> = BTreeMap::new();
        for (doc_type, dir) in self.structure.type_dirs() {
            owners.entry(dir).or_default().push(doc_type);
        }
        for (dir, types) in owners {
            if types.len() > 1 {
                let names = types.iter().map(|t| t.as_str()).collect::<Vec<_>>().join(", ");
                warnings.push(format!(
                    "folder `{dir}` is configured for several document types ({names}); the first one wins"
                ));
            }
        }

        for folder in seen.keys() {
            if self.doc_type_for_folder(folder).is_none() {
                warnings.push(format!(
                    "folder `{folder}` maps to no document type; its documents are classified by id prefix"
                ));
            }
        }
        warnings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ProjectConfig::default();
        assert_eq!(config.project_id(), DEFAULT_PROJECT_ID);
        assert_eq!(config.structure.document_folders, vec!["adr", "rfcs", "memos", "prd"]);
        assert!(config.validation.check_links);
        assert!(!config.readability.enabled);
        assert!(config.warnings().is_empty());
    }

    #[test]
    fn test_folder_mapping() {
        let structure = StructureConfig::default();
        assert_eq!(structure.doc_type_for_folder("rfcs"), Some(DocType::Rfc));
        assert_eq!(structure.doc_type_for_folder("adr/"), Some(DocType::Adr));
        assert_eq!(structure.doc_type_for_folder("guides"), None);
        assert_eq!(structure.folder_for(DocType::Memo), Some("memos"));
    }

    #[test]
    fn test_warnings_for_duplicate_and_unknown_folders() {
        let mut config = ProjectConfig::default();
        config.structure.document_folders = vec!["adr".into(), "adr".into(), "guides".into()];
        config.structure.rfc_dir = "adr".into();
        let warnings = config.warnings();
        assert_eq!(warnings.len(), 3, "{warnings:?}");
        assert!(warnings[0].contains("listed 2 times"));
        assert!(warnings[1].contains("adr, rfc"));
        assert!(warnings[2].contains("`guides`"));
    }
}
