//! lspgen-core - Meta-model ingestion for the lspgen schema compiler
//!
//! This crate turns protocol meta-model JSON into typed entities:
//! - [`Type`] the closed type algebra every type expression parses into
//! - [`Enumeration`], [`Structure`], [`TypeAlias`], [`Message`] schema entities
//! - [`Registry`] the name-indexed owner of all entities
//! - [`MetaModelError`] for error handling
//!
//! The registry is filled once, from one or more documents, and then only
//! read. Code generation lives in `lspgen-cli`.

mod error;
mod node;

pub mod entities;
pub mod registry;
pub mod types;

pub use entities::{
    Enumeration, EnumerationValue, Message, MessageDirection, MessageKind, MessageRole, Structure,
    TypeAlias,
};
pub use error::{MetaModelError, MetaModelResult};
pub use registry::{EntityKind, NamedType, Registry};
pub use types::{BaseType, StructureLiteral, StructureProperty, Type, TypeCategory};

/// Names the generated code treats as builtin JSON carriers.
pub const BUILTIN_TYPE_NAMES: [&str; 3] = ["LSPArray", "LSPObject", "LSPAny"];

/// The reference name of an untyped JSON value.
pub const ANY_TYPE_NAME: &str = "LSPAny";

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        BaseType, EntityKind, Enumeration, Message, MessageDirection, MessageKind, MessageRole,
        MetaModelError, MetaModelResult, NamedType, Registry, Structure, StructureLiteral,
        StructureProperty, Type, TypeAlias, TypeCategory,
    };
}
