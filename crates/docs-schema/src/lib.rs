//! Document types, frontmatter schemas and project configuration
//!
//! Schemas are declarative data: a new document type needs a new
//! [`Schema`] entry in the [`SchemaRegistry`], not new validation code.

pub mod builtin;
pub mod doc_type;
pub mod error;
pub mod project;
pub mod registry;
pub mod schema;

pub use doc_type::DocType;
pub use error::{Error, Result};
pub use project::{
    BuildSettings, BuildSeverity, ProjectConfig, ReadabilitySettings, StructureConfig,
    ValidationSettings,
};
pub use registry::SchemaRegistry;
pub use schema::{Constraint, CrossFieldRule, FieldContext, FieldRule, FieldType, Schema, Violation};
