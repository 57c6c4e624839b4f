//! Named schema entities: enumerations, structures, type aliases, messages

use crate::error::{MetaModelError, MetaModelResult};
use crate::node;
use crate::types::{BaseType, StructureProperty, Type, extract_properties};
use serde_json::Value;

/// One named value of an enumeration.
#[derive(Debug, Clone, PartialEq)]
pub struct EnumerationValue {
    pub name: String,
    /// The literal wire value, kept as JSON.
    pub value: Value,
    pub documentation: String,
}

/// A named set of literal values over a primitive type.
#[derive(Debug, Clone, PartialEq)]
pub struct Enumeration {
    pub name: String,
    pub base: BaseType,
    pub values: Vec<EnumerationValue>,
    pub documentation: String,
    /// Whether values outside the declared set are acceptable at runtime.
    pub supports_custom_values: bool,
}

/// A named record type.
#[derive(Debug, Clone, PartialEq)]
pub struct Structure {
    pub name: String,
    /// Required properties first, see [`extract_properties`].
    pub properties: Vec<StructureProperty>,
    /// Base contracts; each must reference a structure.
    pub extends: Vec<Type>,
    /// Structures whose properties are copied in as if declared locally.
    pub mixins: Vec<Type>,
    pub documentation: String,
}

/// A named alias for a type expression.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeAlias {
    pub name: String,
    pub ty: Type,
    pub documentation: String,
}

/// Which side may send a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageDirection {
    ClientToServer,
    ServerToClient,
    Both,
}

impl MessageDirection {
    pub fn from_name(name: &str) -> MetaModelResult<Self> {
        match name {
            "clientToServer" => Ok(MessageDirection::ClientToServer),
            "serverToClient" => Ok(MessageDirection::ServerToClient),
            "both" => Ok(MessageDirection::Both),
            other => Err(MetaModelError::InvalidMessageDirection(other.to_string())),
        }
    }
}

/// Requests expect a response, notifications do not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKind {
    Request,
    Notification,
}

impl MessageKind {
    pub fn as_str(self) -> &'static str {
        match self {
            MessageKind::Request => "request",
            MessageKind::Notification => "notification",
        }
    }
}

impl std::fmt::Display for MessageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A payload role a message may bind a type to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageRole {
    Result,
    Params,
    PartialResult,
    ErrorData,
    RegistrationOptions,
}

impl MessageRole {
    /// All roles, in the order their aliases are synthesized.
    pub const ALL: [MessageRole; 5] = [
        MessageRole::Result,
        MessageRole::Params,
        MessageRole::PartialResult,
        MessageRole::ErrorData,
        MessageRole::RegistrationOptions,
    ];

    /// The message field holding the role's type node.
    pub fn key(self) -> &'static str {
        match self {
            MessageRole::Result => "result",
            MessageRole::Params => "params",
            MessageRole::PartialResult => "partialResult",
            MessageRole::ErrorData => "errorData",
            MessageRole::RegistrationOptions => "registrationOptions",
        }
    }

    /// Capitalized role name, used as alias suffix and in generated code.
    pub fn title(self) -> &'static str {
        match self {
            MessageRole::Result => "Result",
            MessageRole::Params => "Params",
            MessageRole::PartialResult => "PartialResult",
            MessageRole::ErrorData => "ErrorData",
            MessageRole::RegistrationOptions => "RegistrationOptions",
        }
    }

    /// Name of the alias synthesized for an inline role type.
    pub fn alias_name(self, method: &str) -> String {
        format!("{method}{}", self.title())
    }

    /// The role's type node in a message, unless it is a bare reference.
    ///
    /// These are the nodes the registry turns into synthesized aliases.
    pub(crate) fn inline_type<'a>(self, message: &'a node::Object) -> MetaModelResult<Option<&'a Value>> {
        let Some(value) = message.get(self.key()) else {
            return Ok(None);
        };
        if is_reference(value, self.key())? {
            Ok(None)
        } else {
            Ok(Some(value))
        }
    }
}

/// A request or notification.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub method: String,
    pub documentation: String,
    pub direction: MessageDirection,
    pub params: Option<String>,
    pub result: Option<String>,
    pub partial_result: Option<String>,
    pub error_data: Option<String>,
    pub registration_options: Option<String>,
}

impl Message {
    /// The type name bound to `role`, if any.
    pub fn role(&self, role: MessageRole) -> Option<&str> {
        match role {
            MessageRole::Result => self.result.as_deref(),
            MessageRole::Params => self.params.as_deref(),
            MessageRole::PartialResult => self.partial_result.as_deref(),
            MessageRole::ErrorData => self.error_data.as_deref(),
            MessageRole::RegistrationOptions => self.registration_options.as_deref(),
        }
    }
}

impl Enumeration {
    pub fn extract(value: &Value) -> MetaModelResult<Enumeration> {
        let object = node::as_object(value, "enumeration")?;
        let name = node::string(object, "name", "enumeration")?.to_string();

        let base = match Type::from_json(node::field(object, "type", "enumeration")?)? {
            Type::Base(base) => base,
            _ => return Err(MetaModelError::EnumerationBaseNotPrimitive(name)),
        };

        let values = node::array(object, "values", "enumeration")?
            .iter()
            .map(|v| {
                let entry = node::as_object(v, "enumeration value")?;
                Ok(EnumerationValue {
                    name: node::string(entry, "name", "enumeration value")?.to_string(),
                    value: node::field(entry, "value", "enumeration value")?.clone(),
                    documentation: node::documentation(entry)?,
                })
            })
            .collect::<MetaModelResult<Vec<_>>>()?;

        Ok(Enumeration {
            name,
            base,
            values,
            documentation: node::documentation(object)?,
            supports_custom_values: node::optional_bool(object, "supportsCustomValues")?,
        })
    }
}

impl Structure {
    pub fn extract(value: &Value) -> MetaModelResult<Structure> {
        let object = node::as_object(value, "structure")?;

        let parse_list = |field: &str| -> MetaModelResult<Vec<Type>> {
            node::optional_array(object, field)?
                .iter()
                .map(Type::from_json)
                .collect()
        };

        Ok(Structure {
            name: node::string(object, "name", "structure")?.to_string(),
            properties: extract_properties(node::array(object, "properties", "structure")?)?,
            extends: parse_list("extends")?,
            mixins: parse_list("mixins")?,
            documentation: node::documentation(object)?,
        })
    }
}

impl TypeAlias {
    pub fn extract(value: &Value) -> MetaModelResult<TypeAlias> {
        let object = node::as_object(value, "type alias")?;

        Ok(TypeAlias {
            name: node::string(object, "name", "type alias")?.to_string(),
            ty: Type::from_json(node::field(object, "type", "type alias")?)?,
            documentation: node::documentation(object)?,
        })
    }
}

impl Message {
    /// Extract a message and bind each present role to a type name.
    ///
    /// A role given as a bare reference binds to the referenced name; any
    /// other role binds to the alias the registry synthesizes for it.
    pub fn extract(value: &Value) -> MetaModelResult<Message> {
        let object = node::as_object(value, "message")?;
        let method = node::string(object, "method", "message")?.to_string();
        let direction =
            MessageDirection::from_name(node::string(object, "messageDirection", "message")?)?;

        let bind = |role: MessageRole| -> MetaModelResult<Option<String>> {
            let Some(ty) = object.get(role.key()) else {
                return Ok(None);
            };
            if is_reference(ty, role.key())? {
                Ok(Some(node::string(node::as_object(ty, role.key())?, "name", role.key())?.to_string()))
            } else {
                Ok(Some(role.alias_name(&method)))
            }
        };

        Ok(Message {
            params: bind(MessageRole::Params)?,
            result: bind(MessageRole::Result)?,
            partial_result: bind(MessageRole::PartialResult)?,
            error_data: bind(MessageRole::ErrorData)?,
            registration_options: bind(MessageRole::RegistrationOptions)?,
            documentation: node::documentation(object)?,
            direction,
            method,
        })
    }
}

fn is_reference(ty: &Value, context: &str) -> MetaModelResult<bool> {
    let object = node::as_object(ty, context)?;
    Ok(node::string(object, "kind", context)? == "reference")
}
