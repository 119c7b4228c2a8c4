use thiserror::Error;

/// A field path that does not resolve against a document schema
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnresolvableFieldError {
    #[error("Invalid field '{path}': field '{segment}' not found in '{document}'")]
    FieldNotFound {
        document: String,
        path: String,
        segment: String,
    },

    #[error("Invalid field '{path}': '{field}' is not an embedded document or list")]
    NotTraversable { path: String, field: String },

    #[error("Invalid field '{path}': unknown embedded document '{document}'")]
    UnknownDocument { path: String, document: String },

    #[error("Invalid field '{0}': empty field path")]
    EmptyPath(String),
}

impl UnresolvableFieldError {
    /// The full path that failed to resolve
    pub fn path(&self) -> &str {
        match self {
            UnresolvableFieldError::FieldNotFound { path, .. }
            | UnresolvableFieldError::NotTraversable { path, .. }
            | UnresolvableFieldError::UnknownDocument { path, .. } => path,
            UnresolvableFieldError::EmptyPath(path) => path,
        }
    }
}
