//! Registry mapping document types to their schemas

use std::collections::HashMap;

use crate::{builtin, DocType, Error, Result, Schema};

/// Lookup table of schemas by document type.
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    schemas: HashMap<DocType, Schema>,
}

impl SchemaRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            schemas: HashMap::new(),
        }
    }

    /// Create a registry holding a schema for every [`DocType`].
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for doc_type in DocType::ALL {
            registry.register(builtin::schema_for(doc_type));
        }
        registry
    }

    /// Register a schema, replacing any previous one for the same type.
    pub fn register(&mut self, schema: Schema) -> Option<Schema> {
        self.schemas.insert(schema.doc_type, schema)
    }

    pub fn get_schema(&self, doc_type: DocType) -> Result<&Schema> {
        self.schemas
            .get(&doc_type)
            .ok_or_else(|| Error::unknown_doc_type(doc_type.as_str()))
    }

    /// Look a schema up by type name such as `adr` or `rfcs`.
    pub fn get_schema_by_name(&self, name: &str) -> Result<&Schema> {
        let doc_type: DocType = name.parse()?;
        self.get_schema(doc_type)
    }

    /// Registered types, sorted.
    pub fn doc_types(&self) -> Vec<DocType> {
        let mut types: Vec<DocType> = self.schemas.keys().copied().collect();
        types.sort();
        types
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}
