use crate::schema::UnresolvableFieldError;
use thiserror::Error;

/// Why a filter key was rejected by the validator
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidFilterReason {
    #[error("{0}")]
    Unresolvable(String),

    #[error(
        "Invalid operator (if this is a sub-property, then it must be used in embedded document fields)."
    )]
    AmbiguousSubProperty,
}

/// A filter key rejected by the validator
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid filter '{key}': {reason}")]
pub struct InvalidFilterError {
    pub key: String,
    pub reason: InvalidFilterReason,
}

/// Errors that can occur while compiling a filter set
#[derive(Debug, Error)]
pub enum QueryError {
    #[error(transparent)]
    UnresolvableField(#[from] UnresolvableFieldError),

    #[error(transparent)]
    InvalidFilter(#[from] InvalidFilterError),

    #[error("Raw filter must be a mapping, got: {0}")]
    RawNotMapping(String),
}
