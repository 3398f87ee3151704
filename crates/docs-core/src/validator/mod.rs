//! Validation pipeline
//!
//! A run scans the CMS and then applies each phase to every document:
//! schema, links, format, readability and finally the optional site
//! build. Phases only append issues; none of them stops the others.

pub mod build;
pub mod format;
pub mod links;
#[cfg(feature = "readability")]
pub mod readability;
pub mod schema;

use docs_schema::{DocType, SchemaRegistry};

use crate::document::DocumentRecord;
use crate::report::{Issue, Phase, ValidationReport};
use crate::scanner::Scanner;
use crate::RunConfig;

pub struct Validator<'a> {
    config: &'a RunConfig,
    registry: SchemaRegistry,
    filter: Option<DocType>,
}

impl<'a> Validator<'a> {
    /// Validator using the built-in schemas.
    pub fn new(config: &'a RunConfig) -> Self {
        Self::with_registry(config, SchemaRegistry::with_builtins())
    }

    pub fn with_registry(config: &'a RunConfig, registry: SchemaRegistry) -> Self {
        Self {
            config,
            registry,
            filter: None,
        }
    }

    /// Restrict the run to one document type.
    pub fn only(mut self, doc_type: Option<DocType>) -> Self {
        self.filter = doc_type;
        self
    }

    pub fn registry(&self) -> &SchemaRegistry {
        &self.registry
    }

    /// Run every enabled phase and collect the report.
    pub fn run(&self) -> ValidationReport {
        let scan = Scanner::new(self.config).scan();
        let mut run_issues: Vec<Issue> = self
            .config
            .project()
            .warnings()
            .into_iter()
            .map(|w| Issue::warning(Phase::Config, w))
            .collect();
        run_issues.extend(scan.issues);

        let mut documents = scan.documents;
        if let Some(doc_type) = self.filter {
            documents.retain(|doc| doc.doc_type == doc_type);
        }

        tracing::info!(documents = documents.len(), "checking documents");
        for doc in &mut documents {
            self.validate_document(doc);
        }

        if self.config.skip_build() {
            tracing::debug!("build check skipped");
        } else {
            tracing::info!("checking site build");
            run_issues.extend(build::check(self.config));
        }

        let report = ValidationReport::new(documents, run_issues);
        tracing::info!(
            errors = report.error_count,
            warnings = report.warning_count,
            "validation finished"
        );
        report
    }

    /// Apply the per-document phases to one scanned document.
    pub fn validate_document(&self, doc: &mut DocumentRecord) {
        let project = self.config.project();
        tracing::debug!(path = %doc.rel_path, doc_type = %doc.doc_type, "validating");

        let issues = schema::check(doc, &self.registry, project);
        doc.extend(issues);

        if project.validation.check_links {
            let issues = links::check(doc, &project.structure);
            doc.extend(issues);
        }

        if project.validation.check_format {
            let issues = format::check(doc, &project.validation);
            doc.extend(issues);
        }

        self.check_readability(doc);
    }

    #[cfg(feature = "readability")]
    fn check_readability(&self, doc: &mut DocumentRecord) {
        let settings = &self.config.project().readability;
        if settings.enabled {
            let issues = readability::check(doc, settings);
            doc.extend(issues);
        }
    }

    #[cfg(not(feature = "readability"))]
    fn check_readability(&self, _doc: &mut DocumentRecord) {
        if self.config.project().readability.enabled {
            tracing::debug!("readability support not compiled in, skipping");
        }
    }
}
