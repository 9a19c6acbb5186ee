//! Schema loading from SDL files, strings and HTTP URLs.

use std::path::Path;

use graphql_parser::schema::{self as ast, Definition, Document};

use crate::directive::Levels;
use crate::error::LoadError;
use crate::schema::{Field, FieldedType, Schema, TypeDefinition, UnionType};
use crate::types::{TypeRef, SEMANTIC_NON_NULL};

#[cfg(feature = "remote")]
use std::time::Duration;

/// Default timeout for HTTP requests (10 seconds).
#[cfg(feature = "remote")]
const HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// Load a schema from an SDL file.
///
/// # Errors
///
/// Returns `LoadError::FileNotFound` if the file doesn't exist,
/// or `LoadError::Parse` if the file isn't valid SDL.
pub fn load_schema(path: &Path) -> Result<Schema, LoadError> {
    if !path.exists() {
        return Err(LoadError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = std::fs::read_to_string(path).map_err(|source| LoadError::ReadError {
        path: path.to_path_buf(),
        source,
    })?;

    load_schema_str(&content)
}

/// Load a schema from an SDL string.
///
/// # Errors
///
/// Returns `LoadError::Parse` if the string isn't valid SDL, or
/// `LoadError::DuplicateDefinition` if a name is defined twice.
pub fn load_schema_str(content: &str) -> Result<Schema, LoadError> {
    let document: Document<'_, String> =
        graphql_parser::parse_schema(content).map_err(|e| LoadError::Parse {
            message: e.to_string(),
        })?;

    let schema = build_schema(document.into_static())?;
    tracing::debug!(
        types = schema.types.len(),
        directives = schema.directive_definitions.len(),
        "loaded schema"
    );
    Ok(schema)
}

/// Load a schema from an HTTP/HTTPS URL.
///
/// Requires the `remote` feature (enabled by default).
///
/// # Errors
///
/// Returns `LoadError::NetworkError` if the request fails,
/// or `LoadError::Parse` if the response isn't valid SDL.
#[cfg(feature = "remote")]
pub fn load_schema_url(url: &str) -> Result<Schema, LoadError> {
    let network_error = |source: reqwest::Error| LoadError::NetworkError {
        url: url.to_string(),
        source,
    };

    let client = reqwest::blocking::Client::builder()
        .timeout(HTTP_TIMEOUT)
        .build()
        .map_err(network_error)?;

    // Check for HTTP errors before parsing
    let content = client
        .get(url)
        .send()
        .and_then(|response| response.error_for_status())
        .and_then(|response| response.text())
        .map_err(network_error)?;

    load_schema_str(&content)
}

/// Check if a string looks like a URL (starts with http:// or https://).
pub fn is_url(s: &str) -> bool {
    s.starts_with("http://") || s.starts_with("https://")
}

/// Load a schema from a file path or URL.
///
/// Automatically detects whether the source is a URL or file path.
/// URL loading requires the `remote` feature.
///
/// # Errors
///
/// Returns appropriate errors based on the source type.
pub fn load_schema_auto(source: &str) -> Result<Schema, LoadError> {
    if is_url(source) {
        #[cfg(feature = "remote")]
        {
            load_schema_url(source)
        }
        #[cfg(not(feature = "remote"))]
        {
            Err(LoadError::FileNotFound {
                path: std::path::PathBuf::from(source),
            })
        }
    } else {
        load_schema(Path::new(source))
    }
}

// --- Internal implementation ---

fn build_schema(document: Document<'static, String>) -> Result<Schema, LoadError> {
    let mut schema = Schema::new();
    let mut schema_definition: Option<ast::SchemaDefinition<'static, String>> = None;
    let mut extensions = Vec::new();

    for definition in document.definitions {
        match definition {
            Definition::SchemaDefinition(def) => {
                if schema_definition.replace(def).is_some() {
                    return Err(LoadError::DuplicateDefinition {
                        kind: "schema",
                        name: "schema".to_string(),
                    });
                }
            }
            Definition::TypeDefinition(def) => {
                let def = convert_type_definition(def);
                if schema.types.contains_key(def.name()) {
                    return Err(LoadError::DuplicateDefinition {
                        kind: "type",
                        name: def.name().to_string(),
                    });
                }
                schema.types.insert(def.name().to_string(), def);
            }
            Definition::DirectiveDefinition(def) => {
                if schema.directive_definitions.contains_key(&def.name) {
                    return Err(LoadError::DuplicateDefinition {
                        kind: "directive",
                        name: def.name,
                    });
                }
                schema.directive_definitions.insert(def.name.clone(), def);
            }
            Definition::TypeExtension(ext) => extensions.push(ext),
        }
    }

    // Extensions apply once every definition is known, wherever they appear.
    for ext in extensions {
        apply_extension(&mut schema, ext)?;
    }

    match schema_definition {
        Some(def) => {
            schema.query = def.query;
            schema.mutation = def.mutation;
            schema.subscription = def.subscription;
            schema.directives = def.directives;
        }
        None => {
            // Conventional root names apply when there is no schema block.
            let conventional = |name: &str| {
                matches!(schema.get_type(name), Some(TypeDefinition::Object(_)))
                    .then(|| name.to_string())
            };
            let (query, mutation, subscription) = (
                conventional("Query"),
                conventional("Mutation"),
                conventional("Subscription"),
            );
            schema.query = query;
            schema.mutation = mutation;
            schema.subscription = subscription;
        }
    }

    Ok(schema)
}

fn convert_type_definition(def: ast::TypeDefinition<'static, String>) -> TypeDefinition {
    match def {
        ast::TypeDefinition::Object(t) => TypeDefinition::Object(FieldedType {
            name: t.name,
            description: t.description,
            interfaces: t.implements_interfaces,
            directives: t.directives,
            fields: t.fields.into_iter().map(convert_field).collect(),
        }),
        ast::TypeDefinition::Interface(t) => TypeDefinition::Interface(FieldedType {
            name: t.name,
            description: t.description,
            interfaces: t.implements_interfaces,
            directives: t.directives,
            fields: t.fields.into_iter().map(convert_field).collect(),
        }),
        ast::TypeDefinition::Union(t) => TypeDefinition::Union(UnionType {
            name: t.name,
            description: t.description,
            directives: t.directives,
            members: t.types,
        }),
        ast::TypeDefinition::Scalar(t) => TypeDefinition::Scalar(t),
        ast::TypeDefinition::Enum(t) => TypeDefinition::Enum(t),
        ast::TypeDefinition::InputObject(t) => TypeDefinition::InputObject(t),
    }
}

/// Lift `@semanticNonNull` off the directive list into the field's annotation.
fn convert_field(field: ast::Field<'static, String>) -> Field {
    let (semantic, directives): (Vec<_>, Vec<_>) = field
        .directives
        .into_iter()
        .partition(|d| d.name == SEMANTIC_NON_NULL);

    Field {
        name: field.name,
        description: field.description,
        arguments: field.arguments,
        ty: type_ref_from_ast(&field.field_type),
        directives,
        semantic_non_null: semantic.first().map(Levels::from_directive),
    }
}

fn type_ref_from_ast(ty: &ast::Type<'static, String>) -> TypeRef {
    match ty {
        ast::Type::NamedType(name) => TypeRef::named(name.as_str()),
        ast::Type::ListType(inner) => TypeRef::list(type_ref_from_ast(inner)),
        ast::Type::NonNullType(inner) => TypeRef::non_null(type_ref_from_ast(inner)),
    }
}

fn apply_extension(
    schema: &mut Schema,
    ext: ast::TypeExtension<'static, String>,
) -> Result<(), LoadError> {
    let name = extension_name(&ext).to_string();
    let Some(definition) = schema.types.get_mut(&name) else {
        return Err(LoadError::InvalidExtension {
            name,
            reason: "type is not defined",
        });
    };
    tracing::debug!(type_name = %name, "applying type extension");

    match (definition, ext) {
        (TypeDefinition::Object(t), ast::TypeExtension::Object(e)) => {
            t.interfaces.extend(e.implements_interfaces);
            t.directives.extend(e.directives);
            t.fields.extend(e.fields.into_iter().map(convert_field));
        }
        (TypeDefinition::Interface(t), ast::TypeExtension::Interface(e)) => {
            t.interfaces.extend(e.implements_interfaces);
            t.directives.extend(e.directives);
            t.fields.extend(e.fields.into_iter().map(convert_field));
        }
        (TypeDefinition::Union(t), ast::TypeExtension::Union(e)) => {
            t.directives.extend(e.directives);
            t.members.extend(e.types);
        }
        (TypeDefinition::Enum(t), ast::TypeExtension::Enum(e)) => {
            t.directives.extend(e.directives);
            t.values.extend(e.values);
        }
        (TypeDefinition::InputObject(t), ast::TypeExtension::InputObject(e)) => {
            t.directives.extend(e.directives);
            t.fields.extend(e.fields);
        }
        (TypeDefinition::Scalar(t), ast::TypeExtension::Scalar(e)) => {
            t.directives.extend(e.directives);
        }
        _ => {
            return Err(LoadError::InvalidExtension {
                name,
                reason: "type is a different kind",
            });
        }
    }
    Ok(())
}

fn extension_name<'a>(ext: &'a ast::TypeExtension<'static, String>) -> &'a str {
    match ext {
        ast::TypeExtension::Scalar(e) => &e.name,
        ast::TypeExtension::Object(e) => &e.name,
        ast::TypeExtension::Interface(e) => &e.name,
        ast::TypeExtension::Union(e) => &e.name,
        ast::TypeExtension::Enum(e) => &e.name,
        ast::TypeExtension::InputObject(e) => &e.name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SDL: &str = r#"
directive @semanticNonNull(levels: [Int] = [0]) on FIELD_DEFINITION

type Query {
  "The viewer"
  me: User @semanticNonNull
  users(first: Int = 10): [User] @semanticNonNull(levels: [1]) @deprecated(reason: "use me")
}

type User {
  id: ID!
  friends: [User!]
}
"#;

    #[test]
    fn load_schema_valid_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{}", SDL).unwrap();

        let schema = load_schema(file.path()).unwrap();
        assert_eq!(schema.types.len(), 2);
    }

    #[test]
    fn load_schema_file_not_found() {
        let result = load_schema(Path::new("/nonexistent/schema.graphql"));
        assert!(matches!(result, Err(LoadError::FileNotFound { .. })));
    }

    #[test]
    fn load_schema_str_invalid() {
        let result = load_schema_str("type Query {");
        assert!(matches!(result, Err(LoadError::Parse { .. })));
    }

    #[test]
    fn conventional_roots_without_schema_block() {
        let schema = load_schema_str(SDL).unwrap();
        assert_eq!(schema.query.as_deref(), Some("Query"));
        assert_eq!(schema.mutation, None);
    }

    #[test]
    fn explicit_schema_block_sets_roots() {
        let schema = load_schema_str(
            "schema { query: Root mutation: Change }\n\
             type Root { a: Int }\n\
             type Change { b: Int }\n\
             type Query { c: Int }",
        )
        .unwrap();
        assert_eq!(schema.query.as_deref(), Some("Root"));
        assert_eq!(schema.mutation.as_deref(), Some("Change"));
        assert_eq!(schema.subscription, None);
    }

    #[test]
    fn semantic_directive_is_lifted_off_fields() {
        let schema = load_schema_str(SDL).unwrap();

        let me = schema.field("Query", "me").unwrap();
        assert_eq!(me.semantic_non_null, Some(Levels::outer()));
        assert!(me.directives.is_empty());
        assert_eq!(me.description.as_deref(), Some("The viewer"));

        let users = schema.field("Query", "users").unwrap();
        assert_eq!(users.semantic_non_null, Some(Levels::new([1])));
        assert_eq!(users.directives.len(), 1);
        assert_eq!(users.directives[0].name, "deprecated");
        assert_eq!(users.arguments.len(), 1);
    }

    #[test]
    fn wrapped_types_are_converted() {
        let schema = load_schema_str(SDL).unwrap();
        let friends = schema.field("User", "friends").unwrap();
        assert_eq!(
            friends.ty,
            TypeRef::list(TypeRef::non_null(TypeRef::named("User")))
        );
    }

    #[test]
    fn duplicate_type_is_rejected() {
        let result = load_schema_str("type Query { a: Int }\ntype Query { b: Int }");
        assert!(matches!(
            result,
            Err(LoadError::DuplicateDefinition { kind: "type", .. })
        ));
    }

    #[test]
    fn type_extensions_are_merged() {
        let schema = load_schema_str(
            r#"
extend type Query { b: String @semanticNonNull }
type Query { a: Int }
interface Node { id: ID! }
extend type Query implements Node { id: ID! }
enum Color { RED }
extend enum Color { BLUE }
union Thing = Query
type Other { c: Int }
extend union Thing = Other
input Filter { a: Int }
extend input Filter { b: Int }
"#,
        )
        .unwrap();

        let names: Vec<_> = schema.types["Query"]
            .fields()
            .iter()
            .map(|f| f.name.as_str())
            .collect();
        assert_eq!(names, vec!["a", "b", "id"]);

        let b = schema.field("Query", "b").unwrap();
        assert_eq!(b.semantic_non_null, Some(Levels::outer()));
        assert!(b.directives.is_empty());

        match schema.get_type("Query") {
            Some(TypeDefinition::Object(t)) => assert_eq!(t.interfaces, vec!["Node".to_string()]),
            other => panic!("expected object, got {:?}", other),
        }
        match schema.get_type("Color") {
            Some(TypeDefinition::Enum(t)) => assert_eq!(t.values.len(), 2),
            other => panic!("expected enum, got {:?}", other),
        }
        match schema.get_type("Thing") {
            Some(TypeDefinition::Union(t)) => assert_eq!(t.members, vec!["Query", "Other"]),
            other => panic!("expected union, got {:?}", other),
        }
        match schema.get_type("Filter") {
            Some(TypeDefinition::InputObject(t)) => assert_eq!(t.fields.len(), 2),
            other => panic!("expected input object, got {:?}", other),
        }
    }

    #[test]
    fn extension_of_undefined_type_is_rejected() {
        let result = load_schema_str("type Query { a: Int }\nextend type Missing { b: Int }");
        match result {
            Err(LoadError::InvalidExtension { name, reason }) => {
                assert_eq!(name, "Missing");
                assert_eq!(reason, "type is not defined");
            }
            other => panic!("expected InvalidExtension, got {:?}", other),
        }
    }

    #[test]
    fn extension_of_other_kind_is_rejected() {
        let result = load_schema_str("type Query { a: Int }\nextend interface Query { b: Int }");
        assert!(matches!(
            result,
            Err(LoadError::InvalidExtension { reason: "type is a different kind", .. })
        ));
    }

    #[test]
    fn is_url_detection() {
        assert!(is_url("https://example.com/schema.graphql"));
        assert!(is_url("http://example.com/schema.graphql"));
        assert!(!is_url("/path/to/schema.graphql"));
        assert!(!is_url("schema.graphql"));
    }

    #[test]
    fn load_schema_auto_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "type Query {{ a: Int }}").unwrap();

        let schema = load_schema_auto(file.path().to_str().unwrap()).unwrap();
        assert!(schema.get_type("Query").is_some());
    }

    #[cfg(feature = "remote")]
    mod remote {
        use super::*;

        #[test]
        fn load_schema_url_valid() {
            let mut server = mockito::Server::new();
            let mock = server
                .mock("GET", "/schema.graphql")
                .with_status(200)
                .with_body(SDL)
                .create();

            let schema = load_schema_url(&format!("{}/schema.graphql", server.url())).unwrap();
            assert!(schema.get_type("User").is_some());
            mock.assert();
        }

        #[test]
        fn load_schema_url_404() {
            let mut server = mockito::Server::new();
            let _mock = server.mock("GET", "/missing.graphql").with_status(404).create();

            let result = load_schema_url(&format!("{}/missing.graphql", server.url()));
            assert!(matches!(result, Err(LoadError::NetworkError { .. })));
        }

        #[test]
        fn load_schema_auto_url() {
            let mut server = mockito::Server::new();
            let _mock = server
                .mock("GET", "/schema.graphql")
                .with_body("type Query { a: Int }")
                .create();

            let result = load_schema_auto(&format!("{}/schema.graphql", server.url()));
            assert!(result.is_ok());
        }
    }
}
