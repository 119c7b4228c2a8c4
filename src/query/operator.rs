use crate::schema::FieldDescriptor;
use serde_json::{Map, Value, json};
use std::fmt;

/// Query operators addressable from a filter key suffix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// Implicit operator of keys without a suffix
    Equals,
    Exists,
    GreaterThan,
    GreaterThanOrEqual,
    LessThan,
    LessThanOrEqual,
    In,
    IsNull,
    Not,
    NotEqual,
}

impl Operator {
    pub const ALL: [Operator; 10] = [
        Operator::Equals,
        Operator::Exists,
        Operator::GreaterThan,
        Operator::GreaterThanOrEqual,
        Operator::LessThan,
        Operator::LessThanOrEqual,
        Operator::In,
        Operator::IsNull,
        Operator::Not,
        Operator::NotEqual,
    ];

    /// Parse a registered operator token
    ///
    /// The default operator has no token of its own, so anything that is not
    /// one of the explicit suffixes yields `None`.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "exists" => Some(Operator::Exists),
            "gt" => Some(Operator::GreaterThan),
            "gte" => Some(Operator::GreaterThanOrEqual),
            "lt" => Some(Operator::LessThan),
            "lte" => Some(Operator::LessThanOrEqual),
            "in" => Some(Operator::In),
            "is_null" => Some(Operator::IsNull),
            "ne" => Some(Operator::NotEqual),
            "not" => Some(Operator::Not),
            _ => None,
        }
    }

    /// Operator for `token`, falling back to [`Operator::Equals`]
    pub fn lookup(token: &str) -> Self {
        Self::from_token(token).unwrap_or(Operator::Equals)
    }

    pub fn is_token(token: &str) -> bool {
        Self::from_token(token).is_some()
    }

    /// Key suffix selecting this operator, empty for the default
    pub fn token(&self) -> &'static str {
        match self {
            Operator::Equals => "",
            Operator::Exists => "exists",
            Operator::GreaterThan => "gt",
            Operator::GreaterThanOrEqual => "gte",
            Operator::LessThan => "lt",
            Operator::LessThanOrEqual => "lte",
            Operator::In => "in",
            Operator::IsNull => "is_null",
            Operator::Not => "not",
            Operator::NotEqual => "ne",
        }
    }

    /// Query operator the fragment is namespaced under, if any
    fn query_operator(&self) -> Option<&'static str> {
        match self {
            Operator::Exists => Some("$exists"),
            Operator::GreaterThan => Some("$gt"),
            Operator::GreaterThanOrEqual => Some("$gte"),
            Operator::LessThan => Some("$lt"),
            Operator::LessThanOrEqual => Some("$lte"),
            Operator::In => Some("$in"),
            Operator::Not => Some("$not"),
            Operator::NotEqual => Some("$ne"),
            Operator::Equals | Operator::IsNull => None,
        }
    }

    /// Convert a raw filter value into the representation stored for `field`
    ///
    /// `field` is the leaf of the resolved path; it is `None` when the leaf is
    /// an undeclared segment, in which case values are left as given.
    pub fn transform(&self, field: Option<&FieldDescriptor>, value: &Value) -> Value {
        let encode = |v: &Value| match field {
            Some(field) => field.to_stored(v),
            None => v.clone(),
        };

        match self {
            Operator::Exists | Operator::IsNull => Value::Bool(is_truthy(value)),
            Operator::In => match value {
                Value::Array(items) => Value::Array(items.iter().map(encode).collect()),
                other => Value::Array(vec![encode(other)]),
            },
            Operator::Not if value.is_object() => value.clone(),
            _ => encode(value),
        }
    }

    /// Build the query fragment for one filter
    pub fn build_fragment(&self, wire_name: &str, value: Value) -> Map<String, Value> {
        let shape = match (self, self.query_operator()) {
            (Operator::IsNull, _) => {
                if is_truthy(&value) {
                    Value::Null
                } else {
                    json!({ "$ne": null })
                }
            }
            (_, Some(op)) => {
                let mut shape = Map::new();
                shape.insert(op.to_string(), value);
                Value::Object(shape)
            }
            (_, None) => value,
        };

        let mut fragment = Map::new();
        fragment.insert(wire_name.to_string(), shape);
        fragment
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operator::Equals => write!(f, "equals"),
            other => write!(f, "{}", other.token()),
        }
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FieldKind;

    #[test]
    fn test_token_round_trip() {
        for op in Operator::ALL.iter().skip(1) {
            assert_eq!(Operator::from_token(op.token()), Some(*op));
        }
        assert_eq!(Operator::from_token(""), None);
        assert_eq!(Operator::from_token("equals"), None);
    }

    #[test]
    fn test_lookup_falls_back_to_equals() {
        assert_eq!(Operator::lookup("city"), Operator::Equals);
        assert_eq!(Operator::lookup(""), Operator::Equals);
        assert_eq!(Operator::lookup("gte"), Operator::GreaterThanOrEqual);
    }

    #[test]
    fn test_default_fragment_is_plain_value() {
        let fragment = Operator::Equals.build_fragment("n", json!("x"));
        assert_eq!(Value::Object(fragment), json!({"n": "x"}));
    }

    #[test]
    fn test_comparison_fragments() {
        let gt = Operator::GreaterThan.build_fragment("age", json!(5));
        assert_eq!(Value::Object(gt), json!({"age": {"$gt": 5}}));

        let lte = Operator::LessThanOrEqual.build_fragment("age", json!(9));
        assert_eq!(Value::Object(lte), json!({"age": {"$lte": 9}}));

        let ne = Operator::NotEqual.build_fragment("age", json!(1));
        assert_eq!(Value::Object(ne), json!({"age": {"$ne": 1}}));
    }

    #[test]
    fn test_is_null_fragment() {
        let field = FieldDescriptor::new("email", FieldKind::String);
        let value = Operator::IsNull.transform(Some(&field), &json!(1));
        let fragment = Operator::IsNull.build_fragment("email", value);
        assert_eq!(Value::Object(fragment), json!({"email": null}));

        let value = Operator::IsNull.transform(Some(&field), &json!(false));
        let fragment = Operator::IsNull.build_fragment("email", value);
        assert_eq!(Value::Object(fragment), json!({"email": {"$ne": null}}));
    }

    #[test]
    fn test_in_encodes_each_item() {
        let field = FieldDescriptor::new("age", FieldKind::Int);
        assert_eq!(
            Operator::In.transform(Some(&field), &json!(["1", 2])),
            json!([1, 2])
        );
        assert_eq!(Operator::In.transform(Some(&field), &json!("3")), json!([3]));
    }

    #[test]
    fn test_not_keeps_operator_expressions() {
        let field = FieldDescriptor::new("age", FieldKind::Int);
        let value = Operator::Not.transform(Some(&field), &json!({"$gt": 5}));
        assert_eq!(value, json!({"$gt": 5}));
        let fragment = Operator::Not.build_fragment("age", value);
        assert_eq!(Value::Object(fragment), json!({"age": {"$not": {"$gt": 5}}}));
    }

    #[test]
    fn test_transform_without_field_passes_through() {
        assert_eq!(Operator::Equals.transform(None, &json!("7")), json!("7"));
        assert_eq!(Operator::Exists.transform(None, &json!("")), json!(false));
    }
}
