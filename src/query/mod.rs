//! Filter compilation and validation
//!
//! A filter set maps filter keys to values. A key names a field path and,
//! optionally, an operator, all joined with `__`. The compiler turns the set
//! into one nested query document.
//!
//! # Syntax
//!
//! ```text
//! name                 name equals the value
//! age__gt              age greater than the value
//! address__city        city of the embedded address equals the value
//! comments__0__body    body of the first comment equals the value
//! profile.nickname     dotted paths work without any separator too
//! raw                  value is a fragment merged into the query verbatim
//! ```
//!
//! # Operators
//!
//! - `exists` - `{field: {"$exists": bool}}`
//! - `gt` / `gte` / `lt` / `lte` - comparisons
//! - `in` - `{field: {"$in": [...]}}`
//! - `is_null` - `{field: null}` or `{field: {"$ne": null}}`
//! - `ne` - `{field: {"$ne": value}}`
//! - `not` - `{field: {"$not": value}}`
//!
//! Any other trailing segment is treated as part of the field path.
//!
//! # Examples
//!
//! ```text
//! {"name": "x"}                        {"n": "x"}
//! {"age__gt": 5, "age__lt": 10}        {"age": {"$gt": 5, "$lt": 10}}
//! {"addr__city": "Paris"}              {"a.c": "Paris"}
//! ```

pub mod compiler;
pub mod error;
pub mod key;
pub mod merge;
pub mod operator;
pub mod validator;

use serde_json::{Map, Value};
use std::collections::BTreeMap;

pub use compiler::{compile, compile_checked, compile_filter};
pub use error::{InvalidFilterError, InvalidFilterReason, QueryError};
pub use key::{FilterKey, KEY_SEPARATOR, RAW_KEY};
pub use merge::deep_merge;
pub use operator::Operator;
pub use validator::{validate, validate_key};

/// Filter key to value, iterated in sorted key order
pub type FilterSet = BTreeMap<String, Value>;

/// Nested query document produced by the compiler
pub type QueryDocument = Map<String, Value>;
