use super::FilterSet;
use super::error::{InvalidFilterError, InvalidFilterReason};
use super::key::{FilterKey, RAW_KEY};
use crate::schema::FieldResolver;
use tracing::debug;

/// Check every filter key of `filters` against the schema
///
/// Validation stops at the first offending key. The `raw` key is not checked.
pub fn validate<R>(resolver: &R, filters: &FilterSet) -> Result<(), InvalidFilterError>
where
    R: FieldResolver + ?Sized,
{
    for key in filters.keys() {
        if key == RAW_KEY {
            continue;
        }
        validate_key(resolver, key)?;
    }
    Ok(())
}

/// Check a single filter key
///
/// The path must resolve. A key that reaches into a sub-property without an
/// explicit operator is only accepted when its first field is an embedded
/// document or a list.
pub fn validate_key<R>(resolver: &R, key: &str) -> Result<(), InvalidFilterError>
where
    R: FieldResolver + ?Sized,
{
    let filter_key = FilterKey::parse(key);
    let invalid = |reason: InvalidFilterReason| {
        debug!(key = %key, document = resolver.document_name(), %reason, "rejected filter");
        InvalidFilterError {
            key: key.to_string(),
            reason,
        }
    };

    let segments = resolver
        .get_fields(&filter_key.field_path)
        .map_err(|e| invalid(InvalidFilterReason::Unresolvable(e.to_string())))?;

    let Some(first) = segments.first() else {
        return Err(invalid(InvalidFilterReason::Unresolvable(format!(
            "no field resolved for '{}'",
            filter_key.field_path
        ))));
    };

    if filter_key.is_nested() && !filter_key.has_explicit_operator() && !first.is_composite() {
        return Err(invalid(InvalidFilterReason::AmbiguousSubProperty));
    }

    Ok(())
}
