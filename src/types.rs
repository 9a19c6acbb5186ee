//! Core types for nullability conversion.

use std::fmt;

/// Name of the field directive carrying semantic non-null levels.
pub const SEMANTIC_NON_NULL: &str = "semanticNonNull";

/// Name prefix reserved for introspection types.
pub const INTROSPECTION_PREFIX: &str = "__";

/// Scalars every schema has without defining them.
pub const BUILTIN_SCALARS: &[&str] = &["Int", "Float", "String", "Boolean", "ID"];

/// Returns true if the name is reserved for introspection.
pub fn is_introspection_name(name: &str) -> bool {
    name.starts_with(INTROSPECTION_PREFIX)
}

/// Returns true for the built-in scalar names.
pub fn is_builtin_scalar(name: &str) -> bool {
    BUILTIN_SCALARS.contains(&name)
}

/// Target of a schema conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Semantic markers become enforced non-null wrappers.
    Strict,
    /// Semantic markers are erased.
    Nullable,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Strict => "strict",
            Mode::Nullable => "nullable",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A (possibly wrapped) reference to a named type.
///
/// `NonNull` and `SemanticNonNull` never wrap each other or themselves;
/// `List` may wrap anything.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeRef {
    Named(String),
    List(Box<TypeRef>),
    NonNull(Box<TypeRef>),
    SemanticNonNull(Box<TypeRef>),
}

impl TypeRef {
    pub fn named(name: impl Into<String>) -> Self {
        TypeRef::Named(name.into())
    }

    pub fn list(inner: TypeRef) -> Self {
        TypeRef::List(Box::new(inner))
    }

    pub fn non_null(inner: TypeRef) -> Self {
        TypeRef::NonNull(Box::new(inner))
    }

    pub fn semantic_non_null(inner: TypeRef) -> Self {
        TypeRef::SemanticNonNull(Box::new(inner))
    }

    /// Name of the innermost named type.
    pub fn base_name(&self) -> &str {
        match self {
            TypeRef::Named(name) => name,
            TypeRef::List(inner) | TypeRef::NonNull(inner) | TypeRef::SemanticNonNull(inner) => {
                inner.base_name()
            }
        }
    }

    /// Returns true if a semantic marker appears anywhere in the composition.
    pub fn has_semantic_marker(&self) -> bool {
        match self {
            TypeRef::Named(_) => false,
            TypeRef::SemanticNonNull(_) => true,
            TypeRef::List(inner) | TypeRef::NonNull(inner) => inner.has_semantic_marker(),
        }
    }
}

/// Prints SDL type syntax, with `*` standing for a semantic marker.
impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeRef::Named(name) => f.write_str(name),
            TypeRef::List(inner) => write!(f, "[{}]", inner),
            TypeRef::NonNull(inner) => write!(f, "{}!", inner),
            TypeRef::SemanticNonNull(inner) => write!(f, "{}*", inner),
        }
    }
}
