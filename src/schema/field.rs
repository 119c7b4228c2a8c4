use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};

/// Storage type of a scalar field, used to encode filter values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScalarType {
    String,
    Int,
    Float,
    Bool,
    DateTime,
    ObjectId,
    Uuid,
    Any,
}

/// Coarse category of a field, the only thing the validator looks at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldCategory {
    Scalar,
    EmbeddedDocument,
    List,
}

/// Declared kind of a field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FieldKind {
    String,
    Int,
    Float,
    Bool,
    DateTime,
    ObjectId,
    Uuid,
    Any,
    /// A nested document, described by another schema entry
    Embedded { document: String },
    /// A list whose items are of `item` kind
    List { item: Box<FieldKind> },
}

impl FieldKind {
    pub fn category(&self) -> FieldCategory {
        match self {
            FieldKind::Embedded { .. } => FieldCategory::EmbeddedDocument,
            FieldKind::List { .. } => FieldCategory::List,
            _ => FieldCategory::Scalar,
        }
    }

    /// Whether the field holds a structured value that can be traversed
    pub fn is_composite(&self) -> bool {
        self.category() != FieldCategory::Scalar
    }

    pub fn scalar_type(&self) -> Option<ScalarType> {
        let scalar = match self {
            FieldKind::String => ScalarType::String,
            FieldKind::Int => ScalarType::Int,
            FieldKind::Float => ScalarType::Float,
            FieldKind::Bool => ScalarType::Bool,
            FieldKind::DateTime => ScalarType::DateTime,
            FieldKind::ObjectId => ScalarType::ObjectId,
            FieldKind::Uuid => ScalarType::Uuid,
            FieldKind::Any => ScalarType::Any,
            FieldKind::Embedded { .. } | FieldKind::List { .. } => return None,
        };
        Some(scalar)
    }

    /// Name of the embedded document reachable through this kind, looking
    /// through list items
    pub fn embedded_document(&self) -> Option<&str> {
        match self {
            FieldKind::Embedded { document } => Some(document),
            FieldKind::List { item } => item.embedded_document(),
            _ => None,
        }
    }

    /// Encode a filter value into its stored representation
    pub fn to_stored(&self, value: &Value) -> Value {
        match self {
            FieldKind::List { item } => match value {
                Value::Array(items) => {
                    Value::Array(items.iter().map(|v| item.to_stored(v)).collect())
                }
                // A single value matches lists containing it
                other => item.to_stored(other),
            },
            FieldKind::Embedded { .. } => value.clone(),
            scalar => match scalar.scalar_type() {
                Some(scalar_type) => encode_scalar(scalar_type, value),
                None => value.clone(),
            },
        }
    }
}

/// A declared field of a document schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Logical name used in filter keys
    pub name: String,
    /// Name of the field in stored documents, defaults to `name`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub db_field: Option<String>,
    #[serde(flatten)]
    pub kind: FieldKind,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            db_field: None,
            kind,
        }
    }

    pub fn with_db_field(mut self, db_field: impl Into<String>) -> Self {
        self.db_field = Some(db_field.into());
        self
    }

    /// Wire-level name of this field
    pub fn alias(&self) -> &str {
        self.db_field.as_deref().unwrap_or(&self.name)
    }

    pub fn is_composite(&self) -> bool {
        self.kind.is_composite()
    }

    pub fn to_stored(&self, value: &Value) -> Value {
        self.kind.to_stored(value)
    }
}

fn encode_scalar(scalar_type: ScalarType, value: &Value) -> Value {
    match (scalar_type, value) {
        (ScalarType::Int, Value::String(s)) => s
            .trim()
            .parse::<i64>()
            .map(Value::from)
            .unwrap_or_else(|_| value.clone()),
        (ScalarType::Float, Value::String(s)) => s
            .trim()
            .parse::<f64>()
            .ok()
            .and_then(Number::from_f64)
            .map(Value::Number)
            .unwrap_or_else(|| value.clone()),
        (ScalarType::Bool, Value::String(s)) => match s.to_lowercase().as_str() {
            "true" | "1" | "yes" => Value::Bool(true),
            "false" | "0" | "no" => Value::Bool(false),
            _ => value.clone(),
        },
        (ScalarType::String, Value::Number(n)) => Value::String(n.to_string()),
        (ScalarType::ObjectId, Value::String(s)) if is_object_id(s) => {
            serde_json::json!({ "$oid": s.to_lowercase() })
        }
        (ScalarType::DateTime, Value::String(_) | Value::Number(_)) => {
            serde_json::json!({ "$date": value })
        }
        (ScalarType::Uuid, Value::String(s)) => Value::String(s.to_lowercase()),
        _ => value.clone(),
    }
}

fn is_object_id(s: &str) -> bool {
    s.len() == 24 && s.chars().all(|c| c.is_ascii_hexdigit())
}
