use crate::query::FilterSet;
use serde_json::Value;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur when reading filter sets
#[derive(Debug, Error)]
pub enum InputError {
    #[error("Failed to read filter file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse filters: {0}")]
    Parse(String),

    #[error("Filters must be an object of key/value pairs, got: {0}")]
    NotAnObject(String),

    #[error("Expected 'key=value' format, got: {0}")]
    InvalidInlineFilter(String),
}

/// Parse a filter set from JSON or JSON5 text
pub fn parse_filters(text: &str) -> Result<FilterSet, InputError> {
    let value: Value = json5::from_str(text).map_err(|e| InputError::Parse(e.to_string()))?;
    match value {
        Value::Object(map) => Ok(map.into_iter().collect()),
        other => Err(InputError::NotAnObject(other.to_string())),
    }
}

pub fn load_filters(path: &Path) -> Result<FilterSet, InputError> {
    let raw = fs::read_to_string(path).map_err(|source| InputError::Read {
        path: path.display().to_string(),
        source,
    })?;
    parse_filters(&raw)
}

/// Parse a `key=value` filter given on the command line
///
/// The value is read as JSON5; anything that does not parse is taken as a
/// plain string, so `name=alice` works without quoting.
pub fn parse_inline_filter(s: &str) -> Result<(String, Value), InputError> {
    let Some((key, value)) = s.split_once('=') else {
        return Err(InputError::InvalidInlineFilter(s.to_string()));
    };

    let key = key.trim();
    if key.is_empty() {
        return Err(InputError::InvalidInlineFilter(s.to_string()));
    }

    let value = json5::from_str::<Value>(value.trim())
        .unwrap_or_else(|_| Value::String(value.trim().to_string()));
    Ok((key.to_string(), value))
}
