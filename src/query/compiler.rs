use super::error::QueryError;
use super::key::{FilterKey, RAW_KEY};
use super::merge::deep_merge;
use super::validator::validate;
use super::{FilterSet, QueryDocument};
use crate::schema::{FieldResolver, UnresolvableFieldError, wire_name};
use serde_json::Value;
use tracing::{debug, trace};

/// Compile a filter set into a query document
///
/// Keys are visited in sorted order, so fragments touching the same wire
/// field always merge the same way. The `raw` key is merged verbatim without
/// any field resolution. Resolution failures are returned as-is; call
/// [`validate`] first (or use [`compile_checked`]) to get a rejection that
/// names the offending key.
pub fn compile<R>(resolver: &R, filters: &FilterSet) -> Result<QueryDocument, QueryError>
where
    R: FieldResolver + ?Sized,
{
    let mut query = QueryDocument::new();

    for (key, value) in filters {
        if key == RAW_KEY {
            let Value::Object(fragment) = value else {
                return Err(QueryError::RawNotMapping(value.to_string()));
            };
            trace!(fields = fragment.len(), "merging raw fragment");
            deep_merge(&mut query, fragment.clone());
            continue;
        }

        let fragment = compile_filter(resolver, key, value)?;
        deep_merge(&mut query, fragment);
    }

    debug!(
        document = resolver.document_name(),
        filters = filters.len(),
        fields = query.len(),
        "compiled query"
    );
    Ok(query)
}

/// Validate the filter set, then compile it
pub fn compile_checked<R>(resolver: &R, filters: &FilterSet) -> Result<QueryDocument, QueryError>
where
    R: FieldResolver + ?Sized,
{
    validate(resolver, filters)?;
    compile(resolver, filters)
}

/// Build the fragment for a single filter key
pub fn compile_filter<R>(
    resolver: &R,
    key: &str,
    value: &Value,
) -> Result<QueryDocument, QueryError>
where
    R: FieldResolver + ?Sized,
{
    let filter_key = FilterKey::parse(key);
    let segments = resolver.get_fields(&filter_key.field_path)?;

    // The leaf field decides how the value is encoded
    let Some(leaf) = segments.last() else {
        return Err(UnresolvableFieldError::EmptyPath(filter_key.field_path).into());
    };

    let wire = wire_name(&segments);
    let operator = filter_key.operator();
    let stored = operator.transform(leaf.field(), value);

    trace!(key = %key, wire = %wire, operator = %operator, "compiled filter");
    Ok(operator.build_fragment(&wire, stored))
}
