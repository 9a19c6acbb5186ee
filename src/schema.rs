//! In-memory type graph.
//!
//! Named types reference each other by name, so cycles are ordinary entries in
//! [`Schema::types`]. Definitions the conversion never touches (scalars, enums,
//! input objects, arguments, non-semantic directives) are carried as
//! `graphql-parser` AST nodes so they print back unchanged.

use graphql_parser::schema as ast;
use indexmap::IndexMap;

use crate::directive::Levels;
use crate::types::TypeRef;

pub type Directive = ast::Directive<'static, String>;
pub type InputValue = ast::InputValue<'static, String>;
pub type DirectiveDefinition = ast::DirectiveDefinition<'static, String>;
pub type ScalarType = ast::ScalarType<'static, String>;
pub type EnumType = ast::EnumType<'static, String>;
pub type InputObjectType = ast::InputObjectType<'static, String>;

/// A schema: named-type registry, root operation types and directive definitions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schema {
    pub query: Option<String>,
    pub mutation: Option<String>,
    pub subscription: Option<String>,
    /// Directives applied to the `schema` definition itself.
    pub directives: Vec<Directive>,
    pub types: IndexMap<String, TypeDefinition>,
    pub directive_definitions: IndexMap<String, DirectiveDefinition>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a type definition, replacing any existing one of the same name.
    pub fn with_type(mut self, definition: TypeDefinition) -> Self {
        self.types.insert(definition.name().to_string(), definition);
        self
    }

    pub fn with_query(mut self, name: impl Into<String>) -> Self {
        self.query = Some(name.into());
        self
    }

    pub fn with_subscription(mut self, name: impl Into<String>) -> Self {
        self.subscription = Some(name.into());
        self
    }

    pub fn get_type(&self, name: &str) -> Option<&TypeDefinition> {
        self.types.get(name)
    }

    /// Root operation types as `(operation, type name)` pairs, in
    /// query, mutation, subscription order.
    pub fn roots(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            ("query", self.query.as_deref()),
            ("mutation", self.mutation.as_deref()),
            ("subscription", self.subscription.as_deref()),
        ]
        .into_iter()
        .filter_map(|(op, name)| name.map(|n| (op, n)))
    }

    /// Look up a field by `Type.field` coordinates.
    pub fn field(&self, type_name: &str, field_name: &str) -> Option<&Field> {
        self.get_type(type_name)?
            .fields()
            .iter()
            .find(|f| f.name == field_name)
    }
}

/// Kind of a named type definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    Object,
    Interface,
    Union,
    Scalar,
    Enum,
    InputObject,
}

impl TypeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TypeKind::Object => "object",
            TypeKind::Interface => "interface",
            TypeKind::Union => "union",
            TypeKind::Scalar => "scalar",
            TypeKind::Enum => "enum",
            TypeKind::InputObject => "input object",
        }
    }

    /// Output types may appear as field types.
    pub fn is_output(&self) -> bool {
        !matches!(self, TypeKind::InputObject)
    }

    /// Input types may appear as argument types.
    pub fn is_input(&self) -> bool {
        matches!(self, TypeKind::Scalar | TypeKind::Enum | TypeKind::InputObject)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TypeDefinition {
    Object(FieldedType),
    Interface(FieldedType),
    Union(UnionType),
    Scalar(ScalarType),
    Enum(EnumType),
    InputObject(InputObjectType),
}

impl TypeDefinition {
    pub fn name(&self) -> &str {
        match self {
            TypeDefinition::Object(t) | TypeDefinition::Interface(t) => &t.name,
            TypeDefinition::Union(t) => &t.name,
            TypeDefinition::Scalar(t) => &t.name,
            TypeDefinition::Enum(t) => &t.name,
            TypeDefinition::InputObject(t) => &t.name,
        }
    }

    pub fn kind(&self) -> TypeKind {
        match self {
            TypeDefinition::Object(_) => TypeKind::Object,
            TypeDefinition::Interface(_) => TypeKind::Interface,
            TypeDefinition::Union(_) => TypeKind::Union,
            TypeDefinition::Scalar(_) => TypeKind::Scalar,
            TypeDefinition::Enum(_) => TypeKind::Enum,
            TypeDefinition::InputObject(_) => TypeKind::InputObject,
        }
    }

    /// Output fields; empty for types without them.
    pub fn fields(&self) -> &[Field] {
        match self {
            TypeDefinition::Object(t) | TypeDefinition::Interface(t) => &t.fields,
            _ => &[],
        }
    }
}

/// Object or interface type: the definitions that own output fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldedType {
    pub name: String,
    pub description: Option<String>,
    pub interfaces: Vec<String>,
    pub directives: Vec<Directive>,
    pub fields: Vec<Field>,
}

impl FieldedType {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UnionType {
    pub name: String,
    pub description: Option<String>,
    pub directives: Vec<Directive>,
    pub members: Vec<String>,
}

impl UnionType {
    pub fn new(name: impl Into<String>, members: &[&str]) -> Self {
        Self {
            name: name.into(),
            members: members.iter().map(|m| m.to_string()).collect(),
            ..Self::default()
        }
    }
}

/// An output field.
///
/// The `@semanticNonNull` application, if any, lives in `semantic_non_null`
/// rather than in `directives`.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub name: String,
    pub description: Option<String>,
    pub arguments: Vec<InputValue>,
    pub ty: TypeRef,
    pub directives: Vec<Directive>,
    pub semantic_non_null: Option<Levels>,
}

impl Field {
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            description: None,
            arguments: Vec::new(),
            ty,
            directives: Vec::new(),
            semantic_non_null: None,
        }
    }

    /// Attach a `@semanticNonNull` annotation.
    pub fn with_semantic_non_null(mut self, levels: Levels) -> Self {
        self.semantic_non_null = Some(levels);
        self
    }
}
