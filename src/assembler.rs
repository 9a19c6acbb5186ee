//! Output schema assembly.

use indexmap::IndexMap;

use crate::schema::{Schema, TypeDefinition};
use crate::types::{is_introspection_name, SEMANTIC_NON_NULL};

/// Build the output schema from converted type definitions.
///
/// Types keep the source schema's registry order. Introspection types and the
/// `@semanticNonNull` directive definition are dropped; everything else on the
/// schema (root names, schema directives, other directive definitions) is
/// carried over from `source`.
pub fn assemble(source: &Schema, mut converted: IndexMap<String, TypeDefinition>) -> Schema {
    let mut types = IndexMap::with_capacity(converted.len());
    for name in source.types.keys() {
        if let Some(definition) = converted.shift_remove(name) {
            types.insert(name.clone(), definition);
        }
    }
    // Anything left was reached but not registered in the source.
    types.extend(converted);
    types.retain(|name, _| !is_introspection_name(name));

    let directive_definitions = source
        .directive_definitions
        .iter()
        .filter(|(name, _)| name.as_str() != SEMANTIC_NON_NULL)
        .map(|(name, definition)| (name.clone(), definition.clone()))
        .collect();

    Schema {
        query: source.query.clone(),
        mutation: source.mutation.clone(),
        subscription: source.subscription.clone(),
        directives: source.directives.clone(),
        types,
        directive_definitions,
    }
}
