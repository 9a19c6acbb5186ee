//! Structural checks run before conversion.
//!
//! This covers the problems that would make a converted schema meaningless:
//! dangling type references, roots that are not object types, empty types and
//! undefined directives. It is not a full GraphQL schema validator.

use crate::error::{SchemaError, ValidateError};
use crate::schema::{FieldedType, InputValue, Schema, TypeDefinition, TypeKind};
use crate::types::{is_builtin_scalar, is_introspection_name, SEMANTIC_NON_NULL};

/// Field directives every schema may use without defining them.
///
/// `@specifiedBy` is built in too, but only on scalars.
const BUILTIN_FIELD_DIRECTIVES: &[&str] = &["deprecated"];

/// Validate a schema.
///
/// # Errors
///
/// Returns `ValidateError::Invalid` listing every problem found.
pub fn validate(schema: &Schema) -> Result<(), ValidateError> {
    let mut checker = Checker {
        schema,
        errors: Vec::new(),
    };
    checker.check_roots();
    for definition in schema.types.values() {
        checker.check_definition(definition);
    }

    if checker.errors.is_empty() {
        Ok(())
    } else {
        tracing::debug!(errors = checker.errors.len(), "schema failed validation");
        Err(ValidateError::Invalid {
            errors: checker.errors,
        })
    }
}

struct Checker<'a> {
    schema: &'a Schema,
    errors: Vec<SchemaError>,
}

impl Checker<'_> {
    fn error(&mut self, path: impl Into<String>, message: impl Into<String>) {
        self.errors.push(SchemaError {
            path: path.into(),
            message: message.into(),
        });
    }

    /// Kind of a referenced type; built-in scalars need no definition.
    fn kind_of(&self, name: &str) -> Option<TypeKind> {
        match self.schema.get_type(name) {
            Some(definition) => Some(definition.kind()),
            None if is_builtin_scalar(name) => Some(TypeKind::Scalar),
            None => None,
        }
    }

    fn check_roots(&mut self) {
        if self.schema.query.is_none() {
            self.error("schema", "query root type must be provided");
        }
        let schema = self.schema;
        for (op, name) in schema.roots() {
            match self.kind_of(name) {
                Some(TypeKind::Object) => {}
                Some(kind) => self.error(
                    format!("schema.{}", op),
                    format!("{} root type must be an object type, {} is {}", op, name, kind.as_str()),
                ),
                None => self.error(format!("schema.{}", op), format!("unknown type {}", name)),
            }
        }
    }

    fn check_definition(&mut self, definition: &TypeDefinition) {
        let name = definition.name();
        if is_introspection_name(name) {
            self.error(name, "names beginning with \"__\" are reserved for introspection");
        }

        match definition {
            TypeDefinition::Object(t) | TypeDefinition::Interface(t) => self.check_fielded(t),
            TypeDefinition::Union(t) => {
                if t.members.is_empty() {
                    self.error(name, "union must have at least one member type");
                }
                for member in &t.members {
                    match self.kind_of(member) {
                        Some(TypeKind::Object) => {}
                        Some(kind) => self.error(
                            name,
                            format!("union member {} must be an object type, not {}", member, kind.as_str()),
                        ),
                        None => self.error(name, format!("unknown type {}", member)),
                    }
                }
            }
            TypeDefinition::InputObject(t) => {
                if t.fields.is_empty() {
                    self.error(name, "input object must define one or more fields");
                }
                for field in &t.fields {
                    self.check_input_value(&format!("{}.{}", name, field.name), field);
                }
            }
            TypeDefinition::Scalar(_) | TypeDefinition::Enum(_) => {}
        }
    }

    fn check_fielded(&mut self, t: &FieldedType) {
        if t.fields.is_empty() {
            self.error(&t.name, "type must define one or more fields");
        }

        for interface in &t.interfaces {
            match self.kind_of(interface) {
                Some(TypeKind::Interface) => {}
                Some(kind) => self.error(
                    &t.name,
                    format!("can only implement interfaces, {} is {}", interface, kind.as_str()),
                ),
                None => self.error(&t.name, format!("unknown interface {}", interface)),
            }
        }

        for field in &t.fields {
            let path = format!("{}.{}", t.name, field.name);

            let base = field.ty.base_name();
            match self.kind_of(base) {
                Some(kind) if kind.is_output() => {}
                Some(kind) => self.error(
                    &path,
                    format!("field type must be an output type, {} is {}", base, kind.as_str()),
                ),
                None => self.error(&path, format!("unknown type {}", base)),
            }

            for argument in &field.arguments {
                self.check_input_value(&format!("{}({}:)", path, argument.name), argument);
            }

            if field.semantic_non_null.is_some()
                && !self.schema.directive_definitions.contains_key(SEMANTIC_NON_NULL)
            {
                self.error(&path, format!("unknown directive @{}", SEMANTIC_NON_NULL));
            }
            for directive in &field.directives {
                let known = BUILTIN_FIELD_DIRECTIVES.contains(&directive.name.as_str())
                    || self.schema.directive_definitions.contains_key(&directive.name);
                if !known {
                    self.error(&path, format!("unknown directive @{}", directive.name));
                }
            }
        }
    }

    fn check_input_value(&mut self, path: &str, value: &InputValue) {
        let base = input_base_name(&value.value_type);
        match self.kind_of(base) {
            Some(kind) if kind.is_input() => {}
            Some(kind) => self.error(
                path,
                format!("input type expected, {} is {}", base, kind.as_str()),
            ),
            None => self.error(path, format!("unknown type {}", base)),
        }
    }
}

fn input_base_name<'a>(ty: &'a graphql_parser::schema::Type<'static, String>) -> &'a str {
    use graphql_parser::schema::Type;
    match ty {
        Type::NamedType(name) => name.as_str(),
        Type::ListType(inner) | Type::NonNullType(inner) => input_base_name(inner),
    }
}
