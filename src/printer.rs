//! SDL output via the `graphql-parser` formatter.

use graphql_parser::schema::{self as ast, Definition, Document};
use graphql_parser::Pos;

use crate::error::PrintError;
use crate::schema::{Field, FieldedType, Schema, TypeDefinition};
use crate::types::TypeRef;

/// Print a schema as SDL text, terminated by a newline.
///
/// # Errors
///
/// Returns `PrintError::UnresolvedSemanticNonNull` if a field still carries a
/// semantic marker or annotation; SDL has no syntax for it.
pub fn print_schema(schema: &Schema) -> Result<String, PrintError> {
    let mut sdl = to_document(schema)?.to_string();
    if !sdl.ends_with('\n') {
        sdl.push('\n');
    }
    Ok(sdl)
}

/// Build the `graphql-parser` document for a schema.
///
/// The `schema { ... }` block is emitted only when the roots differ from the
/// conventional `Query`/`Mutation`/`Subscription` names or carry directives.
pub fn to_document(schema: &Schema) -> Result<Document<'static, String>, PrintError> {
    let mut definitions = Vec::with_capacity(schema.types.len() + 1);

    if needs_schema_block(schema) {
        definitions.push(Definition::SchemaDefinition(ast::SchemaDefinition {
            position: Pos::default(),
            directives: schema.directives.clone(),
            query: schema.query.clone(),
            mutation: schema.mutation.clone(),
            subscription: schema.subscription.clone(),
        }));
    }

    definitions.extend(
        schema
            .directive_definitions
            .values()
            .cloned()
            .map(Definition::DirectiveDefinition),
    );

    for definition in schema.types.values() {
        definitions.push(Definition::TypeDefinition(type_definition_to_ast(definition)?));
    }

    Ok(Document { definitions })
}

fn needs_schema_block(schema: &Schema) -> bool {
    if !schema.directives.is_empty() {
        return true;
    }
    [
        (schema.query.as_deref(), "Query"),
        (schema.mutation.as_deref(), "Mutation"),
        (schema.subscription.as_deref(), "Subscription"),
    ]
    .into_iter()
    .any(|(root, conventional)| match root {
        Some(name) => name != conventional,
        // An unused conventional name would be picked up as a root on reload.
        None => matches!(schema.get_type(conventional), Some(TypeDefinition::Object(_))),
    })
}

fn type_definition_to_ast(
    definition: &TypeDefinition,
) -> Result<ast::TypeDefinition<'static, String>, PrintError> {
    Ok(match definition {
        TypeDefinition::Object(t) => ast::TypeDefinition::Object(ast::ObjectType {
            position: Pos::default(),
            description: t.description.clone(),
            name: t.name.clone(),
            implements_interfaces: t.interfaces.clone(),
            directives: t.directives.clone(),
            fields: fields_to_ast(t)?,
        }),
        TypeDefinition::Interface(t) => ast::TypeDefinition::Interface(ast::InterfaceType {
            position: Pos::default(),
            description: t.description.clone(),
            name: t.name.clone(),
            implements_interfaces: t.interfaces.clone(),
            directives: t.directives.clone(),
            fields: fields_to_ast(t)?,
        }),
        TypeDefinition::Union(t) => ast::TypeDefinition::Union(ast::UnionType {
            position: Pos::default(),
            description: t.description.clone(),
            name: t.name.clone(),
            directives: t.directives.clone(),
            types: t.members.clone(),
        }),
        TypeDefinition::Scalar(t) => ast::TypeDefinition::Scalar(t.clone()),
        TypeDefinition::Enum(t) => ast::TypeDefinition::Enum(t.clone()),
        TypeDefinition::InputObject(t) => ast::TypeDefinition::InputObject(t.clone()),
    })
}

fn fields_to_ast(t: &FieldedType) -> Result<Vec<ast::Field<'static, String>>, PrintError> {
    t.fields
        .iter()
        .map(|field| field_to_ast(&t.name, field))
        .collect()
}

fn field_to_ast(owner: &str, field: &Field) -> Result<ast::Field<'static, String>, PrintError> {
    if field.semantic_non_null.is_some() || field.ty.has_semantic_marker() {
        return Err(PrintError::UnresolvedSemanticNonNull {
            path: format!("{}.{}", owner, field.name),
        });
    }

    Ok(ast::Field {
        position: Pos::default(),
        description: field.description.clone(),
        name: field.name.clone(),
        arguments: field.arguments.clone(),
        field_type: type_ref_to_ast(&field.ty),
        directives: field.directives.clone(),
    })
}

/// Semantic markers are rejected before this point.
fn type_ref_to_ast(ty: &TypeRef) -> ast::Type<'static, String> {
    match ty {
        TypeRef::Named(name) => ast::Type::NamedType(name.clone()),
        TypeRef::List(inner) => ast::Type::ListType(Box::new(type_ref_to_ast(inner))),
        TypeRef::NonNull(inner) | TypeRef::SemanticNonNull(inner) => {
            ast::Type::NonNullType(Box::new(type_ref_to_ast(inner)))
        }
    }
}
