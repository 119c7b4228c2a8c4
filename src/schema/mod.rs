//! Document schemas and field-path resolution
//!
//! A [`Schema`] is a named set of [`DocumentSchema`]s. Embedded fields refer to
//! other documents of the same set by name, so a schema is usually loaded as a
//! whole from the `[documents.*]` tables of the configuration file:
//!
//! ```text
//! [documents.User]
//! fields = [
//!     { name = "name", db_field = "n", type = "string" },
//!     { name = "profile", type = "embedded", document = "Profile" },
//!     { name = "tags", type = "list", item = { type = "string" } },
//! ]
//! ```
//!
//! [`Schema::document`] binds one document to its schema set and yields a
//! [`FieldResolver`] that the query compiler and validator consume.

pub mod error;
pub mod field;
pub mod resolver;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub use error::UnresolvableFieldError;
pub use field::{FieldCategory, FieldDescriptor, FieldKind, ScalarType};
pub use resolver::{DocumentRef, FieldResolver, PathSegment, wire_name};

/// Fields of one document type
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentSchema {
    pub fields: Vec<FieldDescriptor>,
}

impl DocumentSchema {
    pub fn new(fields: Vec<FieldDescriptor>) -> Self {
        Self { fields }
    }

    /// Find a field by its logical name
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// All document types known to the compiler, keyed by name
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Schema {
    pub documents: BTreeMap<String, DocumentSchema>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(mut self, name: impl Into<String>, document: DocumentSchema) -> Self {
        self.documents.insert(name.into(), document);
        self
    }

    /// Bind the named document for field resolution
    pub fn document(&self, name: &str) -> Option<DocumentRef<'_>> {
        self.documents
            .get_key_value(name)
            .map(|(name, document)| DocumentRef::new(self, name, document))
    }

    pub fn document_names(&self) -> Vec<&str> {
        self.documents.keys().map(String::as_str).collect()
    }
}
