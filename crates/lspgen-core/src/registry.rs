//! Meta-model registry
//!
//! The [`Registry`] owns every extracted entity, indexes enumerations,
//! structures and aliases in one name space, and keeps requests and
//! notifications in two method-keyed maps. It is filled by one or more
//! [`Registry::extract`] calls and read-only afterwards.

use crate::entities::{Enumeration, Message, MessageKind, MessageRole, Structure, TypeAlias};
use crate::error::{MetaModelError, MetaModelResult};
use crate::node;
use crate::types::Type;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};

/// The three kinds of named types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Enumeration,
    Structure,
    TypeAlias,
}

#[derive(Debug, Clone, Copy)]
struct TypeIndex {
    kind: EntityKind,
    index: usize,
}

/// A resolved named type.
#[derive(Debug, Clone, Copy)]
pub enum NamedType<'a> {
    Enumeration(&'a Enumeration),
    Structure(&'a Structure),
    TypeAlias(&'a TypeAlias),
}

impl<'a> NamedType<'a> {
    pub fn name(&self) -> &'a str {
        match self {
            NamedType::Enumeration(e) => &e.name,
            NamedType::Structure(s) => &s.name,
            NamedType::TypeAlias(a) => &a.name,
        }
    }

    pub fn kind(&self) -> EntityKind {
        match self {
            NamedType::Enumeration(_) => EntityKind::Enumeration,
            NamedType::Structure(_) => EntityKind::Structure,
            NamedType::TypeAlias(_) => EntityKind::TypeAlias,
        }
    }
}

/// Owner of all entities extracted from one or more meta-model documents.
#[derive(Debug, Default)]
pub struct Registry {
    version: String,
    type_names: Vec<String>,
    types_by_name: HashMap<String, TypeIndex>,
    enumerations: Vec<Enumeration>,
    structures: Vec<Structure>,
    type_aliases: Vec<TypeAlias>,
    requests: BTreeMap<String, Message>,
    notifications: BTreeMap<String, Message>,
}

impl Registry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from a single document.
    pub fn from_json(json: &Value) -> MetaModelResult<Self> {
        let mut registry = Self::new();
        registry.extract(json)?;
        Ok(registry)
    }

    /// Parse JSON text and extract it into this registry.
    pub fn extract_str(&mut self, text: &str) -> MetaModelResult<()> {
        let json: Value = serde_json::from_str(text)?;
        self.extract(&json)
    }

    /// Extract one meta-model document, appending to what is already here.
    ///
    /// Order matters: enumerations, structures and explicit aliases claim
    /// their names first, then the aliases synthesized for inline message
    /// payloads, then the messages themselves.
    pub fn extract(&mut self, json: &Value) -> MetaModelResult<()> {
        let object = node::as_object(json, "meta-model")?;

        let meta_data = node::object(object, "metaData", "meta-model")?;
        self.version = node::string(meta_data, "version", "metaData")?.to_string();

        for value in node::optional_array(object, "enumerations")? {
            let enumeration = Enumeration::extract(value)?;
            self.insert_type(&enumeration.name, EntityKind::Enumeration, self.enumerations.len())?;
            self.enumerations.push(enumeration);
        }

        for value in node::optional_array(object, "structures")? {
            let structure = Structure::extract(value)?;
            self.insert_type(&structure.name, EntityKind::Structure, self.structures.len())?;
            self.structures.push(structure);
        }

        for value in node::optional_array(object, "typeAliases")? {
            self.add_type_alias(TypeAlias::extract(value)?)?;
        }

        let requests = node::optional_array(object, "requests")?;
        let notifications = node::optional_array(object, "notifications")?;

        for message in requests.iter().chain(notifications) {
            self.synthesize_role_aliases(message)?;
        }

        for value in requests {
            self.insert_message(MessageKind::Request, Message::extract(value)?)?;
        }

        for value in notifications {
            self.insert_message(MessageKind::Notification, Message::extract(value)?)?;
        }

        Ok(())
    }

    /// Look up an enumeration, structure or alias by schema name.
    pub fn type_for_name(&self, name: &str) -> MetaModelResult<NamedType<'_>> {
        let entry = self
            .types_by_name
            .get(name)
            .ok_or_else(|| MetaModelError::NameNotFound(name.to_string()))?;

        Ok(match entry.kind {
            EntityKind::Enumeration => NamedType::Enumeration(&self.enumerations[entry.index]),
            EntityKind::Structure => NamedType::Structure(&self.structures[entry.index]),
            EntityKind::TypeAlias => NamedType::TypeAlias(&self.type_aliases[entry.index]),
        })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.types_by_name.contains_key(name)
    }

    /// The `metaData.version` of the last extracted document.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Every registered type name, in insertion order.
    pub fn type_names(&self) -> &[String] {
        &self.type_names
    }

    pub fn enumerations(&self) -> &[Enumeration] {
        &self.enumerations
    }

    pub fn structures(&self) -> &[Structure] {
        &self.structures
    }

    /// Explicit and synthesized aliases.
    pub fn type_aliases(&self) -> &[TypeAlias] {
        &self.type_aliases
    }

    pub fn requests(&self) -> &BTreeMap<String, Message> {
        &self.requests
    }

    pub fn notifications(&self) -> &BTreeMap<String, Message> {
        &self.notifications
    }

    /// Messages of one kind, ordered by method.
    pub fn messages(&self, kind: MessageKind) -> &BTreeMap<String, Message> {
        match kind {
            MessageKind::Request => &self.requests,
            MessageKind::Notification => &self.notifications,
        }
    }

    fn insert_type(&mut self, name: &str, kind: EntityKind, index: usize) -> MetaModelResult<()> {
        if self.types_by_name.contains_key(name) {
            return Err(MetaModelError::DuplicateTypeName(name.to_string()));
        }

        self.types_by_name
            .insert(name.to_string(), TypeIndex { kind, index });
        self.type_names.push(name.to_string());
        Ok(())
    }

    fn add_type_alias(&mut self, alias: TypeAlias) -> MetaModelResult<()> {
        self.insert_type(&alias.name, EntityKind::TypeAlias, self.type_aliases.len())?;
        self.type_aliases.push(alias);
        Ok(())
    }

    /// Add an alias for every inline (non-reference) role type of a message.
    fn synthesize_role_aliases(&mut self, message: &Value) -> MetaModelResult<()> {
        let object = node::as_object(message, "message")?;
        let method = node::string(object, "method", "message")?;

        for role in MessageRole::ALL {
            if let Some(ty) = role.inline_type(object)? {
                let documentation = node::documentation(node::as_object(ty, role.key())?)?;
                self.add_type_alias(TypeAlias {
                    name: role.alias_name(method),
                    ty: Type::from_json(ty)?,
                    documentation,
                })?;
            }
        }

        Ok(())
    }

    fn insert_message(&mut self, kind: MessageKind, message: Message) -> MetaModelResult<()> {
        let messages = match kind {
            MessageKind::Request => &mut self.requests,
            MessageKind::Notification => &mut self.notifications,
        };

        if messages.contains_key(&message.method) {
            return Err(MetaModelError::DuplicateMethod {
                kind: kind.as_str(),
                method: message.method,
            });
        }

        messages.insert(message.method.clone(), message);
        Ok(())
    }
}
