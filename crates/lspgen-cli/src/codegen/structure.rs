//! Structure and structure-literal emission
//!
//! Named structures and inline literals share one emitter working on a
//! borrowed [`StructureView`]. A structure becomes:
//!
//! - one field per `extends` base, the first one reachable through `Deref`
//! - the properties of every mixin, flattened
//! - its own properties
//!
//! A string, integer or boolean literal property whose name also exists
//! on the first base is not redeclared. `Default` assigns the literal
//! through the base field instead.

use super::naming::{doc_comment, field_name, upper_case_identifier};
use super::{Generator, property_scope};
use lspgen_core::{MetaModelError, MetaModelResult, NamedType, Structure, StructureProperty, Type};
use tracing::debug;

/// What the emitter needs to know about a structure besides its name.
#[derive(Debug, Clone, Copy)]
pub(crate) struct StructureView<'a> {
    pub properties: &'a [StructureProperty],
    pub extends: &'a [Type],
    pub mixins: &'a [Type],
    pub documentation: &'a str,
}

impl<'a> StructureView<'a> {
    pub(crate) fn literal(properties: &'a [StructureProperty]) -> Self {
        Self {
            properties,
            extends: &[],
            mixins: &[],
            documentation: "",
        }
    }
}

impl<'a> From<&'a Structure> for StructureView<'a> {
    fn from(structure: &'a Structure) -> Self {
        Self {
            properties: &structure.properties,
            extends: &structure.extends,
            mixins: &structure.mixins,
            documentation: &structure.documentation,
        }
    }
}

/// A string, integer or boolean literal property value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum LiteralValue<'t> {
    String(&'t str),
    Integer(i64),
    Boolean(bool),
}

impl<'t> LiteralValue<'t> {
    pub(crate) fn of(ty: &'t Type) -> Option<Self> {
        match ty {
            Type::StringLiteral(value) => Some(LiteralValue::String(value)),
            Type::IntegerLiteral(value) => Some(LiteralValue::Integer(*value)),
            Type::BooleanLiteral(value) => Some(LiteralValue::Boolean(*value)),
            _ => None,
        }
    }

    /// Entry of a `LITERAL_PROPERTIES` table.
    pub(crate) fn table_entry(self) -> String {
        match self {
            LiteralValue::String(value) => format!("Literal::String({value:?})"),
            LiteralValue::Integer(value) => format!("Literal::Integer({value})"),
            LiteralValue::Boolean(value) => format!("Literal::Boolean({value})"),
        }
    }

    /// Expression initializing a field to this literal.
    pub(crate) fn init(self, optional: bool) -> String {
        let value = match self {
            LiteralValue::String(value) => format!("{value:?}.to_string()"),
            LiteralValue::Integer(value) => value.to_string(),
            LiteralValue::Boolean(value) => value.to_string(),
        };

        if optional {
            format!("Some({value})")
        } else {
            value
        }
    }

    /// Condition that holds when `target` does not carry this literal.
    pub(crate) fn differs(self, target: &str, optional: bool) -> String {
        match (self, optional) {
            (LiteralValue::String(value), false) => format!("{target} != {value:?}"),
            (LiteralValue::String(value), true) => format!("{target}.as_deref() != Some({value:?})"),
            (LiteralValue::Integer(value), false) => format!("{target} != {value}"),
            (LiteralValue::Integer(value), true) => format!("{target} != Some({value})"),
            (LiteralValue::Boolean(value), false) => format!("{target} != {value}"),
            (LiteralValue::Boolean(value), true) => format!("{target} != Some({value})"),
        }
    }
}

/// The first base: its field name and definition.
type FirstBase<'a> = Option<(String, &'a Structure)>;

/// Text accumulated while walking a structure's fields.
#[derive(Debug, Default)]
struct StructureBody {
    fields: String,
    defaults: Vec<(String, String)>,
    has_literal_fields: bool,
    inherited_literals: String,
    write: String,
    read: String,
    required: Vec<String>,
    literals: Vec<String>,
}

impl<'a> Generator<'a> {
    /// Emit a structure declaration and its serialization impls.
    ///
    /// `name` is the schema name, or the scope name of a literal. Everything
    /// the structure uses is generated first.
    pub(crate) fn emit_structure(&mut self, name: &str, view: StructureView<'a>) -> MetaModelResult<()> {
        let ident = upper_case_identifier(name);
        self.claim_identifier(&ident)?;

        for base in view.extends {
            self.declare_type(base, "", false)?;
        }
        for mixin in view.mixins {
            self.declare_type(mixin, "", false)?;
        }
        for property in view.properties {
            self.declare_type(&property.ty, &property_scope(&ident, &property.name), false)?;
        }

        let mut body = StructureBody::default();
        let mut first_base: FirstBase<'a> = None;

        for base_type in view.extends {
            let base = self.resolve_structure(base_type)?.ok_or_else(|| {
                MetaModelError::ExtendsNotStructure {
                    structure: name.to_string(),
                }
            })?;
            let base_ident = upper_case_identifier(&base.name);
            let base_field = field_name(&base.name);

            body.fields
                .push_str(&format!("    pub {base_field}: {base_ident},\n"));
            body.defaults
                .push((base_field.clone(), "Default::default()".to_string()));
            body.write
                .push_str(&format!("        self.{base_field}.write_fields(object);\n"));
            body.read.push_str(&format!(
                "        {base_ident}::read_fields(object, &mut value.{base_field})?;\n"
            ));
            body.required.extend(
                base.properties
                    .iter()
                    .filter(|p| !p.optional)
                    .map(|p| p.name.clone()),
            );

            if first_base.is_none() {
                first_base = Some((base_field, base));
            }
        }

        for mixin_type in view.mixins {
            let mixin = self.resolve_structure(mixin_type)?.ok_or_else(|| {
                MetaModelError::MixinNotStructure {
                    structure: name.to_string(),
                }
            })?;
            let scope = upper_case_identifier(&mixin.name);
            self.add_properties(&mut body, &mixin.properties, &scope, &first_base)?;
        }

        self.add_properties(&mut body, view.properties, &ident, &first_base)?;

        self.write_declaration(&ident, view.documentation, &body, &first_base);
        self.write_serialization(&ident, &body);

        debug!(structure = %ident, "Emitted structure");
        Ok(())
    }

    /// The structure `ty` refers to, or `None` if it is not a structure reference.
    fn resolve_structure(&self, ty: &Type) -> MetaModelResult<Option<&'a Structure>> {
        let registry = self.registry;

        let Some(name) = ty.as_reference() else {
            return Ok(None);
        };

        match registry.type_for_name(name)? {
            NamedType::Structure(structure) => Ok(Some(structure)),
            NamedType::Enumeration(_) | NamedType::TypeAlias(_) => Ok(None),
        }
    }

    fn add_properties(
        &self,
        body: &mut StructureBody,
        properties: &[StructureProperty],
        scope: &str,
        first_base: &FirstBase<'a>,
    ) -> MetaModelResult<()> {
        for property in properties {
            let key = format!("{:?}", property.name);
            let field = field_name(&property.name);
            let literal = LiteralValue::of(&property.ty);

            let inherited = literal.and(first_base.as_ref()).and_then(|(base_field, base)| {
                base.properties
                    .iter()
                    .find(|p| p.name == property.name)
                    .map(|p| (base_field.as_str(), p.optional))
            });

            if inherited.is_none() {
                let ty = self.property_type(
                    &property.ty,
                    &property_scope(scope, &property.name),
                    property.optional,
                )?;

                body.fields
                    .push_str(&doc_comment("", &property.documentation, "    "));
                body.fields
                    .push_str(&format!("    pub {field}: {},\n", ty.text));

                let default = match literal {
                    Some(literal) => {
                        body.has_literal_fields = true;
                        literal.init(property.optional)
                    }
                    None => "Default::default()".to_string(),
                };
                body.defaults.push((field.clone(), default));

                if property.optional {
                    body.write.push_str(&format!(
                        "        if let Some(field) = &self.{field} {{\n            \
                         object.insert({key}.to_string(), field.to_json());\n        }}\n"
                    ));

                    let read = if ty.boxed {
                        "Some(Box::new(FromJson::from_json(field)?))"
                    } else {
                        "Some(FromJson::from_json(field)?)"
                    };
                    body.read.push_str(&format!(
                        "        if let Some(field) = object.remove({key}) {{\n            \
                         value.{field} = {read};\n        }}\n"
                    ));
                } else {
                    body.write.push_str(&format!(
                        "        object.insert({key}.to_string(), self.{field}.to_json());\n"
                    ));
                    body.read.push_str(&format!(
                        "        value.{field} = FromJson::from_json(\n            object\n                \
                         .remove({key})\n                \
                         .ok_or_else(|| json::TypeError::missing_property({key}))?,\n        )?;\n"
                    ));
                }
            }

            if !property.optional && literal.is_none() {
                body.required.push(property.name.clone());
            }

            if let Some(literal) = literal {
                body.literals
                    .push(format!("({key}, {})", literal.table_entry()));

                let (target, optional) = match inherited {
                    Some((base_field, base_optional)) => {
                        let target = format!("value.{base_field}.{field}");
                        body.inherited_literals.push_str(&format!(
                            "        {target} = {};\n",
                            literal.init(base_optional)
                        ));
                        (target, base_optional)
                    }
                    None => (format!("value.{field}"), property.optional),
                };

                body.read.push_str(&format!(
                    "        if {} {{\n            \
                     return Err(json::TypeError::unexpected_literal({key}));\n        }}\n",
                    literal.differs(&target, optional)
                ));
            }
        }

        Ok(())
    }

    fn write_declaration(
        &mut self,
        ident: &str,
        documentation: &str,
        body: &StructureBody,
        first_base: &FirstBase<'a>,
    ) {
        let manual_default = body.has_literal_fields || !body.inherited_literals.is_empty();
        let derives = if manual_default {
            "Debug, Clone, PartialEq"
        } else {
            "Debug, Clone, PartialEq, Default"
        };

        let code = &mut self.types;
        code.push_str(&doc_comment("", documentation, ""));
        code.push_str(&format!("#[derive({derives})]\npub struct {ident} {{\n"));
        code.push_str(&body.fields);
        code.push_str("}\n\n");

        if let Some((base_field, base)) = first_base {
            let base_ident = upper_case_identifier(&base.name);
            code.push_str(&format!(
                "impl std::ops::Deref for {ident} {{\n    \
                 type Target = {base_ident};\n\n    \
                 fn deref(&self) -> &{base_ident} {{\n        &self.{base_field}\n    }}\n}}\n\n\
                 impl std::ops::DerefMut for {ident} {{\n    \
                 fn deref_mut(&mut self) -> &mut {base_ident} {{\n        &mut self.{base_field}\n    }}\n}}\n\n"
            ));
        }

        if manual_default {
            let fields: String = body
                .defaults
                .iter()
                .map(|(field, value)| format!("            {field}: {value},\n"))
                .collect();

            code.push_str(&format!(
                "impl Default for {ident} {{\n    fn default() -> Self {{\n"
            ));
            if body.inherited_literals.is_empty() {
                code.push_str(&format!("        Self {{\n{fields}        }}\n"));
            } else {
                code.push_str(&format!("        let mut value = Self {{\n{fields}        }};\n"));
                code.push_str(&body.inherited_literals);
                code.push_str("        value\n");
            }
            code.push_str("    }\n}\n\n");
        }
    }

    fn write_serialization(&mut self, ident: &str, body: &StructureBody) {
        let required = body
            .required
            .iter()
            .map(|name| format!("{name:?}"))
            .collect::<Vec<_>>()
            .join(", ");
        let literals = body.literals.join(", ");

        let code = &mut self.serialization;
        code.push_str(&format!(
            "impl StructureFields for {ident} {{\n    \
             const REQUIRED_PROPERTIES: &'static [&'static str] = &[{required}];\n    \
             const LITERAL_PROPERTIES: &'static [(&'static str, Literal)] = &[{literals}];\n\n"
        ));

        code.push_str("    fn write_fields(&self, object: &mut json::Object) {\n");
        code.push_str(&body.write);
        code.push_str("    }\n\n");

        code.push_str(
            "    fn read_fields(object: &mut json::Object, value: &mut Self) -> Result<(), json::TypeError> {\n",
        );
        code.push_str(&body.read);
        code.push_str("        Ok(())\n    }\n}\n\n");

        code.push_str(&format!(
            "impl ToJson for {ident} {{\n    \
             fn to_json(&self) -> json::Value {{\n        \
             let mut object = json::Object::new();\n        \
             self.write_fields(&mut object);\n        \
             json::Value::from(object)\n    }}\n}}\n\n\
             impl FromJson for {ident} {{\n    \
             fn from_json(json: json::Value) -> Result<Self, json::TypeError> {{\n        \
             let mut object = json::into_object(json)?;\n        \
             let mut value = Self::default();\n        \
             Self::read_fields(&mut object, &mut value)?;\n        \
             Ok(value)\n    }}\n}}\n\n"
        ));
    }
}
