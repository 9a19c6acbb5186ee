//! Schema conversion - rewrites semantic annotations into strict or nullable form.

use indexmap::IndexMap;

use crate::assembler::assemble;
use crate::directive::apply_directive;
use crate::schema::{Field, FieldedType, Schema, TypeDefinition, UnionType};
use crate::types::{is_builtin_scalar, is_introspection_name, Mode, TypeRef};

/// Convert a whole schema into the given mode.
///
/// The input is never modified; every call uses its own type cache, so the
/// strict and nullable outputs can be derived from the same schema
/// independently.
#[tracing::instrument(skip_all, fields(mode = %mode))]
pub fn convert_schema(schema: &Schema, mode: Mode) -> Schema {
    let mut rewriter = Rewriter::new(schema, mode);

    for (_, root) in schema.roots() {
        rewriter.visit(root);
    }
    rewriter.drain();
    for name in schema.types.keys() {
        rewriter.visit(name);
    }
    rewriter.drain();

    let types = rewriter.finish();
    tracing::debug!(types = types.len(), "schema converted");
    assemble(schema, types)
}

/// Semantic non-null becomes enforced non-null.
pub fn semantic_to_strict(schema: &Schema) -> Schema {
    convert_schema(schema, Mode::Strict)
}

/// Semantic non-null is erased.
pub fn semantic_to_nullable(schema: &Schema) -> Schema {
    convert_schema(schema, Mode::Nullable)
}

/// Rewrite the wrappers of a single type reference.
///
/// `NonNull` and `List` are kept as they are; only `SemanticNonNull` depends on
/// the mode. Directly nested non-null wrappers collapse into one, so the result
/// never holds `NonNull(NonNull(_))`.
pub fn convert_type(ty: &TypeRef, mode: Mode) -> TypeRef {
    match ty {
        TypeRef::SemanticNonNull(inner) => {
            let inner = convert_type(inner, mode);
            match mode {
                Mode::Strict => non_null_once(inner),
                Mode::Nullable => inner,
            }
        }
        TypeRef::NonNull(inner) => non_null_once(convert_type(inner, mode)),
        TypeRef::List(inner) => TypeRef::list(convert_type(inner, mode)),
        TypeRef::Named(_) => ty.clone(),
    }
}

fn non_null_once(inner: TypeRef) -> TypeRef {
    match inner {
        TypeRef::NonNull(_) => inner,
        _ => TypeRef::non_null(inner),
    }
}

// --- Internal implementation ---

/// Cache entry for one named type.
///
/// A type is reserved when it is first referenced, so a second reference
/// while it is still queued or being built hits the cache.
#[derive(Debug)]
enum Slot {
    Reserved,
    Filled(TypeDefinition),
}

/// Walks the type graph from a worklist of reserved names.
///
/// Types refer to each other by name, so visiting a reference only queues it;
/// long reference chains never deepen the call stack.
struct Rewriter<'a> {
    schema: &'a Schema,
    mode: Mode,
    cache: IndexMap<String, Slot>,
    pending: Vec<&'a str>,
}

impl<'a> Rewriter<'a> {
    fn new(schema: &'a Schema, mode: Mode) -> Self {
        Self {
            schema,
            mode,
            cache: IndexMap::new(),
            pending: Vec::new(),
        }
    }

    /// Reserve a referenced type and queue it for conversion.
    fn visit(&mut self, name: &str) {
        if is_introspection_name(name) {
            return;
        }
        if self.cache.contains_key(name) {
            tracing::trace!(type_name = %name, "type cache hit");
            return;
        }

        let schema = self.schema;
        let Some((key, _)) = schema.types.get_key_value(name) else {
            if !is_builtin_scalar(name) {
                tracing::warn!(type_name = %name, "referenced type has no definition");
            }
            return;
        };

        self.cache.insert(key.clone(), Slot::Reserved);
        self.pending.push(key);
    }

    /// Convert queued types until none are left.
    fn drain(&mut self) {
        let schema = self.schema;
        while let Some(name) = self.pending.pop() {
            let Some(definition) = schema.get_type(name) else {
                continue;
            };
            tracing::debug!(type_name = %name, kind = definition.kind().as_str(), "converting type");

            let converted = match definition {
                TypeDefinition::Object(t) => TypeDefinition::Object(self.convert_fielded(t)),
                TypeDefinition::Interface(t) => TypeDefinition::Interface(self.convert_fielded(t)),
                TypeDefinition::Union(t) => TypeDefinition::Union(self.convert_union(t)),
                TypeDefinition::Scalar(_)
                | TypeDefinition::Enum(_)
                | TypeDefinition::InputObject(_) => definition.clone(),
            };

            self.cache.insert(name.to_string(), Slot::Filled(converted));
        }
    }

    fn convert_fielded(&mut self, t: &FieldedType) -> FieldedType {
        let fields = t.fields.iter().map(|f| self.convert_field(f)).collect();
        for interface in &t.interfaces {
            self.visit(interface);
        }

        FieldedType {
            fields,
            ..t.clone()
        }
    }

    fn convert_union(&mut self, t: &UnionType) -> UnionType {
        for member in &t.members {
            self.visit(member);
        }
        t.clone()
    }

    fn convert_field(&mut self, field: &Field) -> Field {
        let field = apply_directive(field);
        let ty = convert_type(&field.ty, self.mode);
        self.visit(ty.base_name());
        Field { ty, ..field }
    }

    /// Converted definitions, keyed by name.
    fn finish(self) -> IndexMap<String, TypeDefinition> {
        self.cache
            .into_iter()
            .filter_map(|(name, slot)| match slot {
                Slot::Filled(definition) => Some((name, definition)),
                Slot::Reserved => None,
            })
            .collect()
    }
}
