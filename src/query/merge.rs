use serde_json::{Map, Value};

/// Merge `source` into `target` in place and return `target`
///
/// Mapping values are merged key by key at every depth. Every other value,
/// arrays included, replaces whatever `target` holds at that key, so the
/// later fragment wins on collisions.
pub fn deep_merge(
    target: &mut Map<String, Value>,
    source: Map<String, Value>,
) -> &mut Map<String, Value> {
    for (key, value) in source {
        match value {
            Value::Object(nested) => {
                let slot = target.entry(key).or_insert_with(|| Value::Object(Map::new()));
                if !slot.is_object() {
                    *slot = Value::Object(Map::new());
                }
                if let Value::Object(existing) = slot {
                    deep_merge(existing, nested);
                }
            }
            other => {
                target.insert(key, other);
            }
        }
    }
    target
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn test_scalar_overwrites() {
        let mut target = Map::new();
        deep_merge(&mut target, object(json!({"a": 1})));
        deep_merge(&mut target, object(json!({"a": 2})));
        assert_eq!(Value::Object(target), json!({"a": 2}));
    }

    #[test]
    fn test_mappings_merge_key_wise() {
        let mut target = Map::new();
        deep_merge(&mut target, object(json!({"a": {"x": 1}})));
        deep_merge(&mut target, object(json!({"a": {"y": 2}})));
        assert_eq!(Value::Object(target), json!({"a": {"x": 1, "y": 2}}));
    }

    #[test]
    fn test_disjoint_keys_are_order_independent() {
        let first = object(json!({"a": {"$gt": 1}}));
        let second = object(json!({"b": [1, 2]}));

        let mut forward = Map::new();
        deep_merge(&mut forward, first.clone());
        deep_merge(&mut forward, second.clone());

        let mut backward = Map::new();
        deep_merge(&mut backward, second);
        deep_merge(&mut backward, first);

        assert_eq!(forward, backward);
    }

    #[test]
    fn test_arrays_are_not_merged() {
        let mut target = object(json!({"tags": ["a", "b"]}));
        deep_merge(&mut target, object(json!({"tags": ["c"]})));
        assert_eq!(Value::Object(target), json!({"tags": ["c"]}));
    }

    #[test]
    fn test_mapping_replaces_scalar() {
        let mut target = object(json!({"age": 3}));
        deep_merge(&mut target, object(json!({"age": {"$lt": 9}})));
        assert_eq!(Value::Object(target), json!({"age": {"$lt": 9}}));
    }

    #[test]
    fn test_deep_levels_are_created() {
        let mut target = object(json!({"a": {"b": {"c": 1}}}));
        deep_merge(&mut target, object(json!({"a": {"b": {"d": 2}, "e": 3}})));
        assert_eq!(
            Value::Object(target),
            json!({"a": {"b": {"c": 1, "d": 2}, "e": 3}})
        );
    }
}
