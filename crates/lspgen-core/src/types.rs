//! Type algebra of the meta-model
//!
//! Every type expression in the schema is a JSON node tagged with a `kind`.
//! [`Type::from_json`] maps that node onto one of the eleven [`Type`]
//! variants. References stay unresolved here; the registry resolves them
//! lazily when the generator asks for a name.

use crate::error::{MetaModelError, MetaModelResult};
use crate::node;
use serde_json::Value;

/// The closed set of type categories, in the order of their `kind` tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeCategory {
    Base,
    Reference,
    Array,
    Map,
    Intersection,
    Union,
    Tuple,
    StructureLiteral,
    StringLiteral,
    IntegerLiteral,
    BooleanLiteral,
}

impl TypeCategory {
    pub const ALL: [TypeCategory; 11] = [
        TypeCategory::Base,
        TypeCategory::Reference,
        TypeCategory::Array,
        TypeCategory::Map,
        TypeCategory::Intersection,
        TypeCategory::Union,
        TypeCategory::Tuple,
        TypeCategory::StructureLiteral,
        TypeCategory::StringLiteral,
        TypeCategory::IntegerLiteral,
        TypeCategory::BooleanLiteral,
    ];

    /// The `kind` tag that selects this category.
    pub fn kind(self) -> &'static str {
        match self {
            TypeCategory::Base => "base",
            TypeCategory::Reference => "reference",
            TypeCategory::Array => "array",
            TypeCategory::Map => "map",
            TypeCategory::Intersection => "and",
            TypeCategory::Union => "or",
            TypeCategory::Tuple => "tuple",
            TypeCategory::StructureLiteral => "literal",
            TypeCategory::StringLiteral => "stringLiteral",
            TypeCategory::IntegerLiteral => "integerLiteral",
            TypeCategory::BooleanLiteral => "booleanLiteral",
        }
    }

    pub fn from_kind(kind: &str) -> MetaModelResult<Self> {
        Self::ALL
            .into_iter()
            .find(|category| category.kind() == kind)
            .ok_or_else(|| MetaModelError::UnknownTypeKind(kind.to_string()))
    }
}

/// Primitive types of the meta-model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BaseType {
    Boolean,
    String,
    Integer,
    UInteger,
    Decimal,
    Uri,
    DocumentUri,
    RegExp,
    Null,
}

impl BaseType {
    pub const ALL: [BaseType; 9] = [
        BaseType::Boolean,
        BaseType::String,
        BaseType::Integer,
        BaseType::UInteger,
        BaseType::Decimal,
        BaseType::Uri,
        BaseType::DocumentUri,
        BaseType::RegExp,
        BaseType::Null,
    ];

    /// The schema spelling of this primitive.
    pub fn name(self) -> &'static str {
        match self {
            BaseType::Boolean => "boolean",
            BaseType::String => "string",
            BaseType::Integer => "integer",
            BaseType::UInteger => "uinteger",
            BaseType::Decimal => "decimal",
            BaseType::Uri => "URI",
            BaseType::DocumentUri => "DocumentUri",
            BaseType::RegExp => "RegExp",
            BaseType::Null => "null",
        }
    }

    pub fn from_name(name: &str) -> MetaModelResult<Self> {
        Self::ALL
            .into_iter()
            .find(|base| base.name() == name)
            .ok_or_else(|| MetaModelError::UnknownBaseType(name.to_string()))
    }

    /// Whether values of this type are carried as JSON strings.
    pub fn is_string_like(self) -> bool {
        matches!(
            self,
            BaseType::String | BaseType::Uri | BaseType::DocumentUri | BaseType::RegExp
        )
    }
}

/// A type expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Type {
    Base(BaseType),
    /// Name of an enumeration, structure or alias.
    Reference(String),
    Array(Box<Type>),
    Map { key: Box<Type>, value: Box<Type> },
    Intersection(Vec<Type>),
    /// Alternatives after the structure-literal merge; never empty.
    Union(Vec<Type>),
    Tuple(Vec<Type>),
    StructureLiteral(StructureLiteral),
    StringLiteral(String),
    IntegerLiteral(i64),
    BooleanLiteral(bool),
}

/// An anonymous, inline record type.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StructureLiteral {
    pub properties: Vec<StructureProperty>,
}

/// A named, typed property of a structure or structure literal.
#[derive(Debug, Clone, PartialEq)]
pub struct StructureProperty {
    pub name: String,
    pub ty: Type,
    pub optional: bool,
    pub documentation: String,
}

impl Type {
    /// Parse a kind-tagged type node.
    pub fn from_json(value: &Value) -> MetaModelResult<Type> {
        let object = node::as_object(value, "type")?;
        let category = TypeCategory::from_kind(node::string(object, "kind", "type")?)?;

        let ty = match category {
            TypeCategory::Base => {
                Type::Base(BaseType::from_name(node::string(object, "name", "base type")?)?)
            }
            TypeCategory::Reference => {
                Type::Reference(node::string(object, "name", "reference type")?.to_string())
            }
            TypeCategory::Array => Type::Array(Box::new(Type::from_json(node::field(
                object,
                "element",
                "array type",
            )?)?)),
            TypeCategory::Map => Type::Map {
                key: Box::new(Type::from_json(node::field(object, "key", "map type")?)?),
                value: Box::new(Type::from_json(node::field(object, "value", "map type")?)?),
            },
            TypeCategory::Intersection => Type::Intersection(parse_items(object, "and type")?),
            TypeCategory::Union => Type::Union(merge_union(parse_items(object, "or type")?)?),
            TypeCategory::Tuple => Type::Tuple(parse_items(object, "tuple type")?),
            TypeCategory::StructureLiteral => {
                let value = node::object(object, "value", "literal type")?;
                Type::StructureLiteral(StructureLiteral {
                    properties: extract_properties(node::array(
                        value,
                        "properties",
                        "literal type",
                    )?)?,
                })
            }
            TypeCategory::StringLiteral => Type::StringLiteral(
                node::string(object, "value", "string literal type")?.to_string(),
            ),
            TypeCategory::IntegerLiteral => {
                let value = node::field(object, "value", "integer literal type")?;
                Type::IntegerLiteral(
                    value
                        .as_i64()
                        .ok_or_else(|| MetaModelError::invalid("value", "an integer"))?,
                )
            }
            TypeCategory::BooleanLiteral => {
                let value = node::field(object, "value", "boolean literal type")?;
                Type::BooleanLiteral(
                    value
                        .as_bool()
                        .ok_or_else(|| MetaModelError::invalid("value", "a boolean"))?,
                )
            }
        };

        debug_assert_eq!(ty.category(), category);
        Ok(ty)
    }

    pub fn category(&self) -> TypeCategory {
        match self {
            Type::Base(_) => TypeCategory::Base,
            Type::Reference(_) => TypeCategory::Reference,
            Type::Array(_) => TypeCategory::Array,
            Type::Map { .. } => TypeCategory::Map,
            Type::Intersection(_) => TypeCategory::Intersection,
            Type::Union(_) => TypeCategory::Union,
            Type::Tuple(_) => TypeCategory::Tuple,
            Type::StructureLiteral(_) => TypeCategory::StructureLiteral,
            Type::StringLiteral(_) => TypeCategory::StringLiteral,
            Type::IntegerLiteral(_) => TypeCategory::IntegerLiteral,
            Type::BooleanLiteral(_) => TypeCategory::BooleanLiteral,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Type::Base(BaseType::Null))
    }

    /// The referenced name, if this is a reference.
    pub fn as_reference(&self) -> Option<&str> {
        match self {
            Type::Reference(name) => Some(name),
            _ => None,
        }
    }
}

impl StructureLiteral {
    /// Same property count and the same property name at every position.
    pub fn same_shape(&self, other: &StructureLiteral) -> bool {
        self.properties.len() == other.properties.len()
            && self
                .properties
                .iter()
                .zip(&other.properties)
                .all(|(a, b)| a.name == b.name)
    }

    /// Names of the non-optional properties, in declaration order.
    pub fn required_names(&self) -> impl Iterator<Item = &str> {
        self.properties
            .iter()
            .filter(|p| !p.optional)
            .map(|p| p.name.as_str())
    }
}

impl StructureProperty {
    pub fn from_json(value: &Value) -> MetaModelResult<StructureProperty> {
        let object = node::as_object(value, "property")?;

        Ok(StructureProperty {
            name: node::string(object, "name", "property")?.to_string(),
            ty: Type::from_json(node::field(object, "type", "property")?)?,
            optional: node::optional_bool(object, "optional")?,
            documentation: node::documentation(object)?,
        })
    }
}

/// Parse a property list and move optional properties behind the required
/// ones, keeping declaration order within each group.
pub fn extract_properties(values: &[Value]) -> MetaModelResult<Vec<StructureProperty>> {
    let mut properties = values
        .iter()
        .map(StructureProperty::from_json)
        .collect::<MetaModelResult<Vec<_>>>()?;

    // sort_by_key is stable
    properties.sort_by_key(|p| p.optional);

    Ok(properties)
}

fn parse_items(object: &node::Object, context: &str) -> MetaModelResult<Vec<Type>> {
    node::array(object, "items", context)?
        .iter()
        .map(Type::from_json)
        .collect()
}

/// Apply the union merge rule.
///
/// Structure literals are moved behind all other alternatives. Adjacent
/// literals with the same shape collapse into one whose properties are
/// optional wherever either side was optional.
pub fn merge_union(alternatives: Vec<Type>) -> MetaModelResult<Vec<Type>> {
    let mut others = Vec::with_capacity(alternatives.len());
    let mut literals: Vec<StructureLiteral> = Vec::new();

    for alternative in alternatives {
        match alternative {
            Type::StructureLiteral(literal) => literals.push(literal),
            other => others.push(other),
        }
    }

    let mut i = 1;
    while i < literals.len() {
        if literals[i - 1].same_shape(&literals[i]) {
            let second = literals.remove(i);
            for (kept, merged) in literals[i - 1].properties.iter_mut().zip(second.properties) {
                kept.optional |= merged.optional;
            }
        } else {
            i += 1;
        }
    }

    // A merge can turn a leading property optional; restore the partition.
    for literal in &mut literals {
        literal.properties.sort_by_key(|p| p.optional);
    }

    others.extend(literals.into_iter().map(Type::StructureLiteral));

    if others.is_empty() {
        return Err(MetaModelError::EmptyUnion);
    }

    Ok(others)
}
