//! `@semanticNonNull` directive resolution.
//!
//! Turns a field's level-indexed directive into explicit
//! [`TypeRef::SemanticNonNull`] markers. Level 0 is the field's own type
//! position; every `List` entered adds one level, `NonNull` adds none.

use graphql_parser::schema::Value;

use crate::schema::{Directive, Field};
use crate::types::TypeRef;

/// Name of the directive argument listing the levels.
pub const LEVELS_ARGUMENT: &str = "levels";

/// Ordered set of levels a `@semanticNonNull` application covers.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Levels(Vec<u32>);

impl Levels {
    pub fn new(levels: impl IntoIterator<Item = u32>) -> Self {
        let mut out = Vec::new();
        for level in levels {
            if !out.contains(&level) {
                out.push(level);
            }
        }
        Levels(out)
    }

    /// The default when the directive carries no `levels` argument.
    pub fn outer() -> Self {
        Levels(vec![0])
    }

    /// Read the levels off a directive application.
    ///
    /// A missing or non-list `levels` argument means `[0]`. Entries that are not
    /// non-negative integers are dropped; an empty result is kept as-is and makes
    /// the directive inert.
    pub fn from_directive(directive: &Directive) -> Self {
        let argument = directive
            .arguments
            .iter()
            .find(|(name, _)| name == LEVELS_ARGUMENT)
            .map(|(_, value)| value);

        match argument {
            Some(Value::List(values)) => Levels::new(values.iter().filter_map(|v| match v {
                Value::Int(n) => n.as_i64().and_then(|n| u32::try_from(n).ok()),
                _ => None,
            })),
            _ => Levels::outer(),
        }
    }

    pub fn contains(&self, level: u32) -> bool {
        self.0.contains(&level)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.0
    }
}

/// Insert semantic markers at exactly the given levels.
///
/// Existing semantic markers are discarded (the directive wins), and a hard
/// `NonNull` at a covered level is subsumed by the semantic marker.
pub fn resolve_levels(ty: &TypeRef, levels: &Levels) -> TypeRef {
    resolve_at(ty, 0, levels)
}

fn resolve_at(ty: &TypeRef, level: u32, levels: &Levels) -> TypeRef {
    match ty {
        TypeRef::SemanticNonNull(inner) => resolve_at(inner, level, levels),
        TypeRef::NonNull(inner) => {
            let inner = resolve_at(inner, level, levels);
            if levels.contains(level) {
                inner
            } else {
                TypeRef::non_null(inner)
            }
        }
        TypeRef::List(inner) => {
            let list = TypeRef::list(resolve_at(inner, level + 1, levels));
            if levels.contains(level) {
                TypeRef::semantic_non_null(list)
            } else {
                list
            }
        }
        TypeRef::Named(_) => {
            if levels.contains(level) {
                TypeRef::semantic_non_null(ty.clone())
            } else {
                ty.clone()
            }
        }
    }
}

/// Resolve a field's `@semanticNonNull` annotation into its type and strip it.
///
/// Fields without the annotation come back unchanged.
pub fn apply_directive(field: &Field) -> Field {
    let Some(levels) = &field.semantic_non_null else {
        return field.clone();
    };

    let ty = resolve_levels(&field.ty, levels);
    tracing::debug!(
        field = %field.name,
        levels = ?levels.as_slice(),
        from = %field.ty,
        to = %ty,
        "applied semanticNonNull"
    );

    Field {
        ty,
        semantic_non_null: None,
        ..field.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use graphql_parser::schema::Document;

    fn named(name: &str) -> TypeRef {
        TypeRef::named(name)
    }

    fn field_directive(sdl: &str) -> Directive {
        let doc: Document<'_, String> = graphql_parser::parse_schema(sdl).unwrap();
        let doc = doc.into_static();
        match doc.definitions.into_iter().next() {
            Some(graphql_parser::schema::Definition::TypeDefinition(
                graphql_parser::schema::TypeDefinition::Object(obj),
            )) => obj.fields[0].directives[0].clone(),
            other => panic!("unexpected definition: {:?}", other),
        }
    }

    #[test]
    fn levels_default_to_outer() {
        let d = field_directive("type Q { a: Int @semanticNonNull }");
        assert_eq!(Levels::from_directive(&d), Levels::outer());
    }

    #[test]
    fn levels_from_list() {
        let d = field_directive("type Q { a: [[Int]] @semanticNonNull(levels: [0, 2]) }");
        assert_eq!(Levels::from_directive(&d).as_slice(), &[0, 2]);
    }

    #[test]
    fn levels_drop_malformed_entries() {
        let d = field_directive(
            r#"type Q { a: [Int] @semanticNonNull(levels: [1, "two", 2.5, -1, null]) }"#,
        );
        assert_eq!(Levels::from_directive(&d).as_slice(), &[1]);
    }

    #[test]
    fn levels_all_malformed_stays_empty() {
        let d = field_directive(r#"type Q { a: [Int] @semanticNonNull(levels: ["x"]) }"#);
        let levels = Levels::from_directive(&d);
        assert!(levels.is_empty());
    }

    #[test]
    fn non_list_levels_argument_means_outer() {
        let d = field_directive("type Q { a: [Int] @semanticNonNull(levels: 1) }");
        assert_eq!(Levels::from_directive(&d), Levels::outer());
    }

    #[test]
    fn nested_lists_at_zero_and_two() {
        let ty = TypeRef::list(TypeRef::list(named("Foo")));
        let resolved = resolve_levels(&ty, &Levels::new([0, 2]));
        assert_eq!(
            resolved,
            TypeRef::semantic_non_null(TypeRef::list(TypeRef::list(
                TypeRef::semantic_non_null(named("Foo"))
            )))
        );
    }

    #[test]
    fn non_null_outside_covered_levels_is_kept() {
        let ty = TypeRef::non_null(TypeRef::list(named("String")));
        let resolved = resolve_levels(&ty, &Levels::new([1]));
        assert_eq!(
            resolved,
            TypeRef::non_null(TypeRef::list(TypeRef::semantic_non_null(named("String"))))
        );
    }

    #[test]
    fn non_null_at_covered_level_is_subsumed() {
        let ty = TypeRef::non_null(named("String"));
        let resolved = resolve_levels(&ty, &Levels::outer());
        assert_eq!(resolved, TypeRef::semantic_non_null(named("String")));
    }

    #[test]
    fn directive_replaces_existing_markers() {
        let ty = TypeRef::list(TypeRef::semantic_non_null(named("String")));
        let resolved = resolve_levels(&ty, &Levels::outer());
        assert_eq!(
            resolved,
            TypeRef::semantic_non_null(TypeRef::list(named("String")))
        );
    }

    #[test]
    fn levels_beyond_depth_have_no_effect() {
        let ty = TypeRef::list(named("String"));
        assert_eq!(resolve_levels(&ty, &Levels::new([5])), ty);
    }

    #[test]
    fn empty_levels_strip_markers_only() {
        let ty = TypeRef::semantic_non_null(named("String"));
        assert_eq!(resolve_levels(&ty, &Levels::default()), named("String"));
    }

    #[test]
    fn apply_directive_strips_annotation() {
        let field = Field::new("tags", TypeRef::list(named("String")))
            .with_semantic_non_null(Levels::new([1]));
        let applied = apply_directive(&field);
        assert!(applied.semantic_non_null.is_none());
        assert_eq!(
            applied.ty,
            TypeRef::list(TypeRef::semantic_non_null(named("String")))
        );
    }

    #[test]
    fn apply_directive_without_annotation_is_identity() {
        let field = Field::new("name", TypeRef::non_null(named("String")));
        assert_eq!(apply_directive(&field), field);
    }
}
