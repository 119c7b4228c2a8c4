use super::operator::Operator;

/// Separator between path segments and the operator suffix of a filter key
pub const KEY_SEPARATOR: &str = "__";

/// Key whose value is a pre-built fragment merged into the query verbatim
pub const RAW_KEY: &str = "raw";

/// A filter key split into its field path and operator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterKey {
    /// Dotted logical field path
    pub field_path: String,
    /// Operator named by the key suffix, `None` when the key has none
    pub operator: Option<Operator>,
}

impl FilterKey {
    /// Split a filter key such as `age__gt` or `address__city`
    ///
    /// A trailing segment that is not a registered operator token is part of
    /// the field path, so `address__city` addresses `address.city` with the
    /// default operator.
    pub fn parse(key: &str) -> Self {
        if !key.contains(KEY_SEPARATOR) {
            return FilterKey {
                field_path: key.to_string(),
                operator: None,
            };
        }

        let mut segments: Vec<&str> = key.split(KEY_SEPARATOR).collect();
        let last = segments.pop().unwrap_or_default();
        let head = segments.join(".");
        match Operator::from_token(last) {
            Some(operator) => FilterKey {
                field_path: head,
                operator: Some(operator),
            },
            None => FilterKey {
                field_path: format!("{head}.{last}"),
                operator: None,
            },
        }
    }

    /// Operator to apply, the default one when the key names none
    pub fn operator(&self) -> Operator {
        self.operator.unwrap_or(Operator::Equals)
    }

    pub fn has_explicit_operator(&self) -> bool {
        self.operator.is_some()
    }

    /// Whether the path reaches below its first field
    pub fn is_nested(&self) -> bool {
        self.field_path.contains('.')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_field_name() {
        let key = FilterKey::parse("name");
        assert_eq!(key.field_path, "name");
        assert_eq!(key.operator, None);
        assert_eq!(key.operator(), Operator::Equals);
        assert!(!key.is_nested());
    }

    #[test]
    fn test_operator_suffix() {
        let key = FilterKey::parse("age__gt");
        assert_eq!(key.field_path, "age");
        assert_eq!(key.operator, Some(Operator::GreaterThan));
        assert!(key.has_explicit_operator());
    }

    #[test]
    fn test_unknown_suffix_folds_into_path() {
        let key = FilterKey::parse("addr__city");
        assert_eq!(key.field_path, "addr.city");
        assert_eq!(key.operator, None);
        assert!(key.is_nested());
    }

    #[test]
    fn test_multi_segment_path_with_operator() {
        let key = FilterKey::parse("author__profile__age__lte");
        assert_eq!(key.field_path, "author.profile.age");
        assert_eq!(key.operator, Some(Operator::LessThanOrEqual));

        let key = FilterKey::parse("comments__0__body");
        assert_eq!(key.field_path, "comments.0.body");
        assert_eq!(key.operator, None);
    }

    #[test]
    fn test_is_null_token_contains_underscore() {
        let key = FilterKey::parse("email__is_null");
        assert_eq!(key.field_path, "email");
        assert_eq!(key.operator, Some(Operator::IsNull));
    }

    #[test]
    fn test_dotted_key_without_separator() {
        let key = FilterKey::parse("profile.nickname");
        assert_eq!(key.field_path, "profile.nickname");
        assert_eq!(key.operator, None);
        assert!(key.is_nested());
    }
}
