//! Error types for meta-model extraction and code generation

use thiserror::Error;

/// Result type alias for meta-model operations
pub type MetaModelResult<T> = Result<T, MetaModelError>;

/// Error type for meta-model operations
///
/// Every variant describes a defect in the schema or in the invocation.
/// None of them is transient, so callers abort the run on the first one.
#[derive(Error, Debug)]
pub enum MetaModelError {
    /// The input text is not valid JSON
    ///
    /// `message` is the parser's own text, which already ends with the
    /// line/column position.
    #[error("JSON parse error: {message}")]
    Json {
        line: usize,
        column: usize,
        message: String,
    },

    /// A mandatory field is absent from a JSON node
    #[error("missing field '{field}' in {context}")]
    MissingField { field: String, context: String },

    /// A field holds a JSON value of the wrong type
    #[error("field '{field}' must be {expected}")]
    InvalidField {
        field: String,
        expected: &'static str,
    },

    /// A type node carries a `kind` outside the fixed vocabulary
    #[error("'{0}' is not a valid type kind")]
    UnknownTypeKind(String),

    /// A base type node names an unknown primitive
    #[error("'{0}' is not a valid base type")]
    UnknownBaseType(String),

    /// A message carries an unknown `messageDirection`
    #[error("invalid message direction: {0}")]
    InvalidMessageDirection(String),

    /// A union has no alternatives left after merging
    #[error("union type must not be empty")]
    EmptyUnion,

    /// Two enumerations, structures or aliases share a name, or two
    /// generated declarations share a Rust identifier
    #[error("duplicate type '{0}'")]
    DuplicateTypeName(String),

    /// Two messages of the same kind share a method
    #[error("duplicate {kind} method: {method}")]
    DuplicateMethod { kind: &'static str, method: String },

    /// A mixin entry does not resolve to a structure
    #[error("mixin type for '{structure}' must be a structure reference")]
    MixinNotStructure { structure: String },

    /// An extends entry does not resolve to a structure
    #[error("base type for '{structure}' must be a structure reference")]
    ExtendsNotStructure { structure: String },

    /// An enumeration's value type is not a base type
    #[error("enumeration value type for '{0}' must be a base type")]
    EnumerationBaseNotPrimitive(String),

    /// A reference names an entity the registry does not know
    #[error("type with name '{0}' does not exist")]
    NameNotFound(String),
}

impl MetaModelError {
    pub(crate) fn missing(field: &str, context: &str) -> Self {
        MetaModelError::MissingField {
            field: field.to_string(),
            context: context.to_string(),
        }
    }

    pub(crate) fn invalid(field: &str, expected: &'static str) -> Self {
        MetaModelError::InvalidField {
            field: field.to_string(),
            expected,
        }
    }
}

impl From<serde_json::Error> for MetaModelError {
    fn from(err: serde_json::Error) -> Self {
        MetaModelError::Json {
            line: err.line(),
            column: err.column(),
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
#[path = "error/error_tests.rs"]
mod error_tests;
