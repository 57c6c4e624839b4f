//! Code generation from a meta-model registry.
//!
//! The generator walks every named type of a [`Registry`] in registration
//! order and emits Rust source text into three artifacts:
//!
//! - **types**: enumerations, structures and aliases
//! - **serialization**: `StructureFields`/`ToJson`/`FromJson` impls and
//!   enumeration value tables
//! - **messages**: one contract type per request and notification
//!
//! # Architecture
//!
//! ```text
//! metaModel.json ...
//!     ↓
//!  [Registry::extract]
//!     ↓
//!  Registry (read-only)
//!     ↓
//!  [Generator]  processed / being-processed sets
//!     ├─→ types.rs
//!     ├─→ serialization.rs
//!     └─→ messages.rs
//! ```
//!
//! A named type is emitted at most once. Before a type is written, every
//! type it uses is generated, so declarations appear in dependency order.
//! The one exception is an optional property that points back at a type
//! still being emitted; it is boxed to break the cycle.
//!
//! Inline structure literals have no schema name. They are named after
//! where they occur (see [`literal_scope`]) and the same scope string is
//! recomputed when the literal is referenced, so no name table is kept.
//!
//! The emitted code targets a hand-written runtime crate whose path is
//! configurable through [`GeneratorOptions::runtime_crate`].

mod enumeration;
mod messages;
pub mod naming;
mod rust_types;
mod structure;
mod type_alias;

use lspgen_core::{MessageKind, MetaModelError, MetaModelResult, NamedType, Registry, Type};
use std::collections::HashSet;
use tracing::debug;

use naming::capitalize;

/// Default path of the runtime crate referenced by generated code.
pub const DEFAULT_RUNTIME_CRATE: &str = "lsp_runtime";

/// Options that shape the generated text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorOptions {
    /// Path used in `use <runtime>::prelude::*;` lines.
    pub runtime_crate: String,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            runtime_crate: DEFAULT_RUNTIME_CRATE.to_string(),
        }
    }
}

/// The three generated artifacts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneratedFiles {
    pub types: String,
    pub serialization: String,
    pub messages: String,
}

/// Generate all artifacts for a registry.
///
/// Fails on the first schema defect (unknown reference, mixin or base that
/// is not a structure, unsupported enumeration value). Nothing is returned
/// on failure.
pub fn generate(registry: &Registry, options: &GeneratorOptions) -> MetaModelResult<GeneratedFiles> {
    let mut generator = Generator::new(registry);

    generator.generate_types()?;
    generator.generate_messages()?;

    Ok(generator.finish(options))
}

/// State of one generation pass.
///
/// Lives only for the duration of [`generate`]; the sets start out holding
/// the builtin JSON carriers, which the preamble declares.
pub(crate) struct Generator<'a> {
    registry: &'a Registry,
    processed: HashSet<&'a str>,
    being_processed: HashSet<&'a str>,
    /// Rust identifiers declared so far.
    declared: HashSet<String>,
    types: String,
    serialization: String,
    messages: String,
}

impl<'a> Generator<'a> {
    pub(crate) fn new(registry: &'a Registry) -> Self {
        Self {
            registry,
            processed: lspgen_core::BUILTIN_TYPE_NAMES.into_iter().collect(),
            being_processed: HashSet::new(),
            declared: HashSet::new(),
            types: String::new(),
            serialization: String::new(),
            messages: String::new(),
        }
    }

    fn generate_types(&mut self) -> MetaModelResult<()> {
        let registry = self.registry;

        for name in registry.type_names() {
            self.generate_named_type(name)?;
        }

        Ok(())
    }

    /// Emit a named type unless it was emitted before.
    pub(crate) fn generate_named_type(&mut self, name: &'a str) -> MetaModelResult<()> {
        if self.processed.contains(name) {
            return Ok(());
        }

        self.processed.insert(name);

        let registry = self.registry;
        let named = registry.type_for_name(name)?;
        let canonical = named.name();
        debug!(name = canonical, kind = ?named.kind(), "Generating named type");

        self.being_processed.insert(canonical);
        let result = match named {
            NamedType::Enumeration(enumeration) => self.emit_enumeration(enumeration),
            NamedType::Structure(structure) => self.emit_structure(&structure.name, structure.into()),
            NamedType::TypeAlias(alias) => self.emit_type_alias(alias),
        };
        self.being_processed.remove(canonical);

        result
    }

    /// Generate everything `ty` depends on.
    ///
    /// `scope` is the name an inline structure literal at this position
    /// receives. `alias` is set only for the top-level type of an alias,
    /// where tuple and intersection members get an extra scope suffix.
    pub(crate) fn declare_type(&mut self, ty: &'a Type, scope: &str, alias: bool) -> MetaModelResult<()> {
        match ty {
            Type::Reference(name) => self.generate_named_type(name),
            Type::Array(element) => self.declare_type(element, scope, false),
            Type::Map { key, value } => {
                self.declare_type(key, scope, false)?;
                self.declare_type(value, scope, false)
            }
            Type::Intersection(items) => self.declare_members(items, &aggregate_scope(scope, "_Base", alias)),
            Type::Union(items) => self.declare_members(items, scope),
            Type::Tuple(items) => {
                self.declare_members(items, &aggregate_scope(scope, "_Element", alias))
            }
            Type::StructureLiteral(literal) => {
                self.emit_structure(scope, structure::StructureView::literal(&literal.properties))
            }
            Type::Base(_) | Type::StringLiteral(_) | Type::IntegerLiteral(_) | Type::BooleanLiteral(_) => {
                Ok(())
            }
        }
    }

    fn declare_members(&mut self, items: &'a [Type], scope: &str) -> MetaModelResult<()> {
        for item in items {
            self.declare_type(item, &literal_scope(scope, item), false)?;
        }
        Ok(())
    }

    fn generate_messages(&mut self) -> MetaModelResult<()> {
        let registry = self.registry;

        for (kind, title, module) in [
            (MessageKind::Request, "Request", "requests"),
            (MessageKind::Notification, "Notification", "notifications"),
        ] {
            if kind == MessageKind::Notification {
                self.messages.push('\n');
            }
            self.messages.push_str(&format!(
                "/// {title} messages\npub mod {module} {{\n    use super::*;\n"
            ));
            for message in registry.messages(kind).values() {
                self.emit_message(message, kind)?;
            }
            self.messages.push_str("}\n");
        }

        Ok(())
    }

    /// Record a declared identifier; two declarations under one name fail.
    pub(crate) fn claim_identifier(&mut self, ident: &str) -> MetaModelResult<()> {
        if !self.declared.insert(ident.to_string()) {
            return Err(MetaModelError::DuplicateTypeName(ident.to_string()));
        }
        Ok(())
    }

    fn finish(self, options: &GeneratorOptions) -> GeneratedFiles {
        let runtime = &options.runtime_crate;
        let version = self.registry.version();

        let mut types = banner(version);
        types.push_str(&format!(
            "use {runtime}::prelude::*;\nuse std::collections::HashMap;\n\n\
             /// Protocol version of the meta-model these types were generated from.\n\
             pub const VERSION: &str = {version:?};\n\n\
             /// Any JSON value.\n\
             pub type LSPAny = json::Value;\n\
             /// A JSON object.\n\
             pub type LSPObject = json::Object;\n\
             /// A JSON array.\n\
             pub type LSPArray = json::Array;\n\n"
        ));
        types.push_str(&self.types);

        let mut serialization = banner(version);
        serialization.push_str(&format!("use super::types::*;\nuse {runtime}::prelude::*;\n\n"));
        serialization.push_str(&self.serialization);

        let mut messages = banner(version);
        messages.push_str(&format!("use super::types::*;\nuse {runtime}::prelude::*;\n\n"));
        messages.push_str(&self.messages);

        GeneratedFiles {
            types,
            serialization,
            messages,
        }
    }
}

/// Scope of an aggregate's members; the suffix applies only at alias top level.
fn aggregate_scope(scope: &str, suffix: &str, alias: bool) -> String {
    if alias {
        format!("{scope}{suffix}")
    } else {
        scope.to_string()
    }
}

/// Scope of one aggregate member.
///
/// A structure literal member appends `_<Property>` for each of its
/// required properties, so differently shaped literals in the same
/// aggregate get different names. Other members keep the scope.
pub(crate) fn literal_scope(scope: &str, member: &Type) -> String {
    match member {
        Type::StructureLiteral(literal) => {
            let mut name = scope.to_string();
            for property in literal.required_names() {
                name.push('_');
                name.push_str(&capitalize(property));
            }
            name
        }
        _ => scope.to_string(),
    }
}

/// Scope of a structure property's type.
pub(crate) fn property_scope(structure: &str, property: &str) -> String {
    format!("{structure}{}", capitalize(property))
}

fn banner(version: &str) -> String {
    format!(
        "// Generated by lspgen from meta-model version {version}. Do not modify.\n\n\
         #![allow(non_camel_case_types, non_snake_case, dead_code, unused_imports, unused_mut, unused_variables)]\n\n"
    )
}
