//! Rust type text for meta-model type expressions

use super::naming::upper_case_identifier;
use super::{Generator, aggregate_scope, literal_scope};
use lspgen_core::{ANY_TYPE_NAME, BUILTIN_TYPE_NAMES, BaseType, MetaModelResult, NamedType, Type};

/// Rust spelling of a primitive.
pub(crate) fn base_type_name(base: BaseType) -> &'static str {
    match base {
        BaseType::Boolean => "bool",
        BaseType::String => "String",
        BaseType::Integer => "i32",
        BaseType::UInteger => "u32",
        BaseType::Decimal => "f64",
        BaseType::Uri => "Uri",
        BaseType::DocumentUri => "DocumentUri",
        BaseType::RegExp => "String",
        BaseType::Null => "Null",
    }
}

/// Field type of a structure property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PropertyType {
    pub text: String,
    /// `Option<Box<T>>` instead of `Option<T>`.
    pub boxed: bool,
}

impl<'a> Generator<'a> {
    /// Rust type text for `ty`.
    ///
    /// `scope` and `alias` must match what [`Generator::declare_type`] was
    /// given for the same position, so that structure literals resolve to
    /// the names they were emitted under.
    pub(crate) fn rust_type(&self, ty: &Type, scope: &str, alias: bool) -> MetaModelResult<String> {
        Ok(match ty {
            Type::Base(base) => base_type_name(*base).to_string(),
            Type::Reference(name) => self.reference_name(name)?,
            Type::Array(element) => match element.as_ref() {
                Type::Reference(name) if name == ANY_TYPE_NAME => "LSPArray".to_string(),
                element => format!("Vec<{}>", self.rust_type(element, scope, false)?),
            },
            Type::Map { key, value } => {
                let map = if self.is_string_type(key)? {
                    "StrMap"
                } else {
                    "HashMap"
                };
                format!(
                    "{map}<{}, {}>",
                    self.rust_type(key, scope, false)?,
                    self.rust_type(value, scope, false)?
                )
            }
            // No meta-model so far uses a real intersection.
            Type::Intersection(_) => "LSPObject".to_string(),
            Type::Union(items) => self.union_type(items, scope)?,
            Type::Tuple(items) => {
                let scope = aggregate_scope(scope, "_Element", alias);
                let members = items
                    .iter()
                    .map(|item| self.rust_type(item, &literal_scope(&scope, item), false))
                    .collect::<MetaModelResult<Vec<_>>>()?;

                match members.as_slice() {
                    [single] => format!("({single},)"),
                    _ => format!("({})", members.join(", ")),
                }
            }
            Type::StructureLiteral(_) => upper_case_identifier(scope),
            Type::StringLiteral(_) => "String".to_string(),
            Type::IntegerLiteral(_) => "i32".to_string(),
            Type::BooleanLiteral(_) => "bool".to_string(),
        })
    }

    /// Unions collapse to their only member, or wrap the members in
    /// `NullOr`, `NullOrOneOfN` or `OneOfN`. The first `null` member
    /// selects the nullable wrapper and is not listed.
    fn union_type(&self, items: &[Type], scope: &str) -> MetaModelResult<String> {
        if let [single] = items {
            return self.rust_type(single, &literal_scope(scope, single), false);
        }

        let null = items.iter().position(Type::is_null);
        let members = items
            .iter()
            .enumerate()
            .filter(|(i, _)| Some(*i) != null)
            .map(|(_, item)| self.rust_type(item, &literal_scope(scope, item), false))
            .collect::<MetaModelResult<Vec<_>>>()?;

        let wrapper = match null {
            None => format!("OneOf{}", members.len()),
            Some(_) if items.len() > 2 => format!("NullOrOneOf{}", members.len()),
            Some(_) => "NullOr".to_string(),
        };

        Ok(format!("{wrapper}<{}>", members.join(", ")))
    }

    /// Field type of a property, optional properties wrapped in `Option`.
    ///
    /// An optional direct reference to a type that is still being emitted
    /// closes a cycle and is boxed.
    pub(crate) fn property_type(
        &self,
        ty: &Type,
        scope: &str,
        optional: bool,
    ) -> MetaModelResult<PropertyType> {
        let text = self.rust_type(ty, scope, false)?;

        if !optional {
            return Ok(PropertyType { text, boxed: false });
        }

        let boxed = ty
            .as_reference()
            .is_some_and(|name| self.being_processed.contains(name));

        Ok(if boxed {
            PropertyType {
                text: format!("Option<Box<{text}>>"),
                boxed,
            }
        } else {
            PropertyType {
                text: format!("Option<{text}>"),
                boxed,
            }
        })
    }

    /// Identifier for a referenced name, `Enum`-suffixed for enumerations.
    pub(crate) fn reference_name(&self, name: &str) -> MetaModelResult<String> {
        if BUILTIN_TYPE_NAMES.contains(&name) {
            return Ok(name.to_string());
        }

        let ident = upper_case_identifier(name);
        Ok(match self.registry.type_for_name(name)? {
            NamedType::Enumeration(_) => format!("{ident}Enum"),
            NamedType::Structure(_) | NamedType::TypeAlias(_) => ident,
        })
    }

    /// Whether values of `ty` are JSON strings, looking through aliases.
    pub(crate) fn is_string_type(&self, ty: &Type) -> MetaModelResult<bool> {
        match ty {
            Type::Base(base) => Ok(base.is_string_like()),
            Type::Reference(name) if BUILTIN_TYPE_NAMES.contains(&name.as_str()) => Ok(false),
            Type::Reference(name) => match self.registry.type_for_name(name)? {
                NamedType::TypeAlias(alias) => self.is_string_type(&alias.ty),
                NamedType::Enumeration(_) | NamedType::Structure(_) => Ok(false),
            },
            _ => Ok(false),
        }
    }
}

#[cfg(test)]
#[path = "rust_types/rust_types_tests.rs"]
mod rust_types_tests;
