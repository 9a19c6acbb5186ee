//! Error types for schema loading, validation and printing.

use std::path::PathBuf;
use thiserror::Error;

/// Errors while reading SDL and building the type graph.
#[derive(Debug, Error)]
pub enum LoadError {
    // IO errors (exit code 3)
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("cannot read {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[cfg(feature = "remote")]
    #[error("failed to fetch {url}: {source}")]
    NetworkError {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    // Parse errors (exit code 2)
    #[error("invalid SDL: {message}")]
    Parse { message: String },

    #[error("duplicate {kind} definition: {name}")]
    DuplicateDefinition { kind: &'static str, name: String },

    #[error("cannot extend {name}: {reason}")]
    InvalidExtension { name: String, reason: &'static str },
}

impl LoadError {
    /// Returns the exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            LoadError::FileNotFound { .. } | LoadError::ReadError { .. } => 3,
            #[cfg(feature = "remote")]
            LoadError::NetworkError { .. } => 3,
            _ => 2,
        }
    }
}

/// Errors during validation.
#[derive(Debug, Error)]
pub enum ValidateError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error("invalid schema: {} error(s)", errors.len())]
    Invalid { errors: Vec<SchemaError> },
}

impl ValidateError {
    /// Returns the exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        match self {
            ValidateError::Load(e) => e.exit_code(),
            ValidateError::Invalid { .. } => 1,
        }
    }
}

/// Single validation problem with schema coordinates.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct SchemaError {
    /// Schema coordinate of the offending element, e.g. `Query.user(id:)`.
    pub path: String,
    /// Human-readable error message.
    pub message: String,
}

impl std::fmt::Display for SchemaError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Errors while turning a type graph back into SDL.
#[derive(Debug, Error)]
pub enum PrintError {
    #[error("semantic non-null marker cannot be printed at {path}; convert the schema first")]
    UnresolvedSemanticNonNull { path: String },
}

impl PrintError {
    /// Returns the exit code for this error type.
    pub fn exit_code(&self) -> i32 {
        2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_error_exit_codes() {
        let err = LoadError::FileNotFound {
            path: PathBuf::from("schema.graphql"),
        };
        assert_eq!(err.exit_code(), 3);

        let err = LoadError::Parse {
            message: "unexpected end of input".into(),
        };
        assert_eq!(err.exit_code(), 2);

        let err = LoadError::DuplicateDefinition {
            kind: "type",
            name: "Query".into(),
        };
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn validate_error_exit_codes() {
        let err = ValidateError::Invalid {
            errors: vec![SchemaError {
                path: "Query.user".into(),
                message: "unknown type User".into(),
            }],
        };
        assert_eq!(err.exit_code(), 1);

        let err = ValidateError::from(LoadError::ReadError {
            path: PathBuf::from("schema.graphql"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        });
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn schema_error_display() {
        let err = SchemaError {
            path: "Query.user".into(),
            message: "unknown type User".into(),
        };
        assert_eq!(err.to_string(), "Query.user: unknown type User");
    }

    #[test]
    fn duplicate_definition_message() {
        let err = LoadError::DuplicateDefinition {
            kind: "directive",
            name: "semanticNonNull".into(),
        };
        assert_eq!(err.to_string(), "duplicate directive definition: semanticNonNull");
    }

    #[test]
    fn invalid_extension_message() {
        let err = LoadError::InvalidExtension {
            name: "Query".into(),
            reason: "type is not defined",
        };
        assert_eq!(err.to_string(), "cannot extend Query: type is not defined");
        assert_eq!(err.exit_code(), 2);
    }
}
