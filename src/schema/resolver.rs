use super::error::UnresolvableFieldError;
use super::field::{FieldDescriptor, FieldKind};
use super::{DocumentSchema, Schema};

/// One step of a resolved field path
#[derive(Debug, Clone, PartialEq)]
pub enum PathSegment<'a> {
    /// A declared field
    Field(&'a FieldDescriptor),
    /// A segment with no declaration behind it, e.g. a list index
    Raw(String),
}

impl<'a> PathSegment<'a> {
    /// Name of this segment as the data store expects it
    pub fn wire_name(&self) -> &str {
        match self {
            PathSegment::Field(field) => field.alias(),
            PathSegment::Raw(segment) => segment,
        }
    }

    pub fn field(&self) -> Option<&'a FieldDescriptor> {
        match self {
            PathSegment::Field(field) => Some(*field),
            PathSegment::Raw(_) => None,
        }
    }

    pub fn is_composite(&self) -> bool {
        self.field().is_some_and(FieldDescriptor::is_composite)
    }
}

/// Join resolved segments into the dotted wire field name
pub fn wire_name(segments: &[PathSegment<'_>]) -> String {
    segments
        .iter()
        .map(PathSegment::wire_name)
        .collect::<Vec<_>>()
        .join(".")
}

/// Looks up the fields along a dotted logical path
pub trait FieldResolver {
    /// Name of the document the resolver is bound to, for diagnostics
    fn document_name(&self) -> &str;

    /// Resolve `path` into one segment per path component
    fn get_fields(&self, path: &str) -> Result<Vec<PathSegment<'_>>, UnresolvableFieldError>;
}

/// A document schema bound to the schema set it belongs to, so embedded
/// documents can be followed
#[derive(Debug, Clone, Copy)]
pub struct DocumentRef<'a> {
    schema: &'a Schema,
    name: &'a str,
    document: &'a DocumentSchema,
}

impl<'a> DocumentRef<'a> {
    pub(crate) fn new(schema: &'a Schema, name: &'a str, document: &'a DocumentSchema) -> Self {
        Self {
            schema,
            name,
            document,
        }
    }

    pub fn schema(&self) -> &'a DocumentSchema {
        self.document
    }
}

/// Where the walk currently stands
enum Cursor<'a> {
    Document(&'a str, &'a DocumentSchema),
    Embedded(&'a str),
    List(&'a str, &'a FieldKind),
    Dynamic,
    Leaf(&'a str),
}

impl<'a> Cursor<'a> {
    fn after(field: &'a FieldDescriptor) -> Self {
        Self::after_kind(&field.name, &field.kind)
    }

    fn after_kind(field_name: &'a str, kind: &'a FieldKind) -> Self {
        match kind {
            FieldKind::Embedded { document } => Cursor::Embedded(document),
            FieldKind::List { item } => Cursor::List(field_name, item),
            FieldKind::Any => Cursor::Dynamic,
            _ => Cursor::Leaf(field_name),
        }
    }
}

impl<'a> DocumentRef<'a> {
    fn embedded(
        &self,
        path: &str,
        document: &str,
    ) -> Result<(&'a str, &'a DocumentSchema), UnresolvableFieldError> {
        self.schema
            .documents
            .get_key_value(document)
            .map(|(name, schema)| (name.as_str(), schema))
            .ok_or_else(|| UnresolvableFieldError::UnknownDocument {
                path: path.to_string(),
                document: document.to_string(),
            })
    }
}

fn lookup<'a>(
    path: &str,
    document_name: &str,
    document: &'a DocumentSchema,
    segment: &str,
) -> Result<&'a FieldDescriptor, UnresolvableFieldError> {
    document
        .field(segment)
        .ok_or_else(|| UnresolvableFieldError::FieldNotFound {
            document: document_name.to_string(),
            path: path.to_string(),
            segment: segment.to_string(),
        })
}

impl FieldResolver for DocumentRef<'_> {
    fn document_name(&self) -> &str {
        self.name
    }

    fn get_fields(&self, path: &str) -> Result<Vec<PathSegment<'_>>, UnresolvableFieldError> {
        if path.is_empty() {
            return Err(UnresolvableFieldError::EmptyPath(path.to_string()));
        }

        let mut segments = Vec::new();
        let mut cursor = Cursor::Document(self.name, self.document);

        for segment in path.split('.') {
            cursor = match cursor {
                Cursor::Document(document_name, document) => {
                    let field = lookup(path, document_name, document, segment)?;
                    segments.push(PathSegment::Field(field));
                    Cursor::after(field)
                }
                Cursor::Embedded(document) => {
                    let (document_name, document) = self.embedded(path, document)?;
                    let field = lookup(path, document_name, document, segment)?;
                    segments.push(PathSegment::Field(field));
                    Cursor::after(field)
                }
                Cursor::List(field_name, item) if is_position(segment) => {
                    segments.push(PathSegment::Raw(segment.to_string()));
                    Cursor::after_kind(field_name, item)
                }
                Cursor::List(field_name, item) => {
                    // Sub-fields of list items are addressed without a position
                    let Some(document) = item.embedded_document() else {
                        return Err(UnresolvableFieldError::NotTraversable {
                            path: path.to_string(),
                            field: field_name.to_string(),
                        });
                    };
                    let (document_name, document) = self.embedded(path, document)?;
                    let field = lookup(path, document_name, document, segment)?;
                    segments.push(PathSegment::Field(field));
                    Cursor::after(field)
                }
                Cursor::Dynamic => {
                    segments.push(PathSegment::Raw(segment.to_string()));
                    Cursor::Dynamic
                }
                Cursor::Leaf(field_name) => {
                    return Err(UnresolvableFieldError::NotTraversable {
                        path: path.to_string(),
                        field: field_name.to_string(),
                    });
                }
            };
        }

        Ok(segments)
    }
}

fn is_position(segment: &str) -> bool {
    !segment.is_empty() && segment.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blog_schema() -> Schema {
        toml::from_str(
            r#"
            [documents.Post]
            fields = [
                { name = "title", db_field = "t", type = "string" },
                { name = "author", type = "embedded", document = "User" },
                { name = "comments", db_field = "c", type = "list", item = { type = "embedded", document = "Comment" } },
                { name = "tags", type = "list", item = { type = "string" } },
                { name = "extra", type = "any" },
            ]

            [documents.User]
            fields = [
                { name = "name", db_field = "n", type = "string" },
            ]

            [documents.Comment]
            fields = [
                { name = "body", db_field = "b", type = "string" },
                { name = "author", type = "embedded", document = "User" },
            ]
            "#,
        )
        .expect("valid schema")
    }

    fn names(segments: &[PathSegment<'_>]) -> Vec<String> {
        segments.iter().map(|s| s.wire_name().to_string()).collect()
    }

    #[test]
    fn test_resolve_top_level_field() {
        let schema = blog_schema();
        let post = schema.document("Post").unwrap();
        let segments = post.get_fields("title").unwrap();
        assert_eq!(names(&segments), vec!["t"]);
    }

    #[test]
    fn test_resolve_through_embedded_document() {
        let schema = blog_schema();
        let post = schema.document("Post").unwrap();
        let segments = post.get_fields("author.name").unwrap();
        assert_eq!(wire_name(&segments), "author.n");
        assert!(segments[0].is_composite());
    }

    #[test]
    fn test_resolve_list_items_with_and_without_position() {
        let schema = blog_schema();
        let post = schema.document("Post").unwrap();

        let segments = post.get_fields("comments.0.author.name").unwrap();
        assert_eq!(wire_name(&segments), "c.0.author.n");
        assert_eq!(segments[1], PathSegment::Raw("0".to_string()));

        let segments = post.get_fields("comments.body").unwrap();
        assert_eq!(wire_name(&segments), "c.b");

        let segments = post.get_fields("tags.1").unwrap();
        assert_eq!(wire_name(&segments), "tags.1");
    }

    #[test]
    fn test_dynamic_field_accepts_any_sub_path() {
        let schema = blog_schema();
        let post = schema.document("Post").unwrap();
        let segments = post.get_fields("extra.a.b").unwrap();
        assert_eq!(wire_name(&segments), "extra.a.b");
    }

    #[test]
    fn test_unresolvable_paths() {
        let schema = blog_schema();
        let post = schema.document("Post").unwrap();

        assert!(matches!(
            post.get_fields("missing"),
            Err(UnresolvableFieldError::FieldNotFound { .. })
        ));
        assert!(matches!(
            post.get_fields("title.length"),
            Err(UnresolvableFieldError::NotTraversable { .. })
        ));
        assert!(matches!(
            post.get_fields("tags.name"),
            Err(UnresolvableFieldError::NotTraversable { .. })
        ));
        assert!(matches!(
            post.get_fields(""),
            Err(UnresolvableFieldError::EmptyPath(_))
        ));
    }
}
