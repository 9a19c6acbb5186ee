//! GraphQL Semantic Nullability Converter
//!
//! Converts schemas annotated with `@semanticNonNull` into either a strict
//! schema, where semantic non-null positions become enforced `!`, or a
//! nullable schema, where the annotations are simply removed.
//!
//! # Example
//!
//! ```
//! use graphql_sock::{load_schema_str, print_schema, semantic_to_nullable, semantic_to_strict};
//!
//! let schema = load_schema_str(r#"
//!     directive @semanticNonNull(levels: [Int] = [0]) on FIELD_DEFINITION
//!
//!     type Query {
//!         tags: [String] @semanticNonNull(levels: [0, 1])
//!     }
//! "#).unwrap();
//!
//! let strict = print_schema(&semantic_to_strict(&schema)).unwrap();
//! assert!(strict.contains("tags: [String!]!"));
//! assert!(!strict.contains("semanticNonNull"));
//!
//! let nullable = print_schema(&semantic_to_nullable(&schema)).unwrap();
//! assert!(nullable.contains("tags: [String]"));
//! ```
//!
//! # Levels
//!
//! `levels` picks positions by list depth. Level 0 is the field itself, and
//! each list entered adds one:
//!
//! | Field type | `levels` | Strict | Nullable |
//! |------------|----------|--------|----------|
//! | `String` | (none) | `String!` | `String` |
//! | `[[String]]` | `[0, 2]` | `[[String!]]!` | `[[String]]` |
//! | `[String]!` | `[1]` | `[String!]!` | `[String]!` |
//!
//! A `!` the directive does not cover is kept in both outputs. A `!` at a
//! covered level is replaced by the semantic marker, so it is kept in the strict
//! output and dropped in the nullable one.

mod assembler;
mod directive;
mod error;
mod loader;
mod printer;
mod rewriter;
mod schema;
mod types;
mod validator;

pub use assembler::assemble;
pub use directive::{apply_directive, resolve_levels, Levels, LEVELS_ARGUMENT};
pub use error::{LoadError, PrintError, SchemaError, ValidateError};
pub use loader::{is_url, load_schema, load_schema_auto, load_schema_str};
pub use printer::{print_schema, to_document};
pub use rewriter::{convert_schema, convert_type, semantic_to_nullable, semantic_to_strict};
pub use schema::{
    Directive, DirectiveDefinition, EnumType, Field, FieldedType, InputObjectType, InputValue,
    ScalarType, Schema, TypeDefinition, TypeKind, UnionType,
};
pub use types::{
    is_builtin_scalar, is_introspection_name, Mode, TypeRef, BUILTIN_SCALARS,
    INTROSPECTION_PREFIX, SEMANTIC_NON_NULL,
};
pub use validator::validate;

#[cfg(feature = "remote")]
pub use loader::load_schema_url;
