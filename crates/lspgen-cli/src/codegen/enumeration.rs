//! Enumeration emission

use super::Generator;
use super::naming::{doc_comment, upper_case_identifier, variant_name};
use super::rust_types::base_type_name;
use lspgen_core::{Enumeration, MetaModelError, MetaModelResult};
use serde_json::Value;
use tracing::debug;

/// `Literal` table entry for an enumeration value.
fn value_literal(enumeration: &Enumeration, value: &Value) -> MetaModelResult<String> {
    match value {
        Value::String(text) => Ok(format!("Literal::String({text:?})")),
        Value::Bool(flag) => Ok(format!("Literal::Boolean({flag})")),
        Value::Number(number) => number
            .as_i64()
            .map(|n| format!("Literal::Integer({n})"))
            .ok_or_else(|| MetaModelError::InvalidField {
                field: format!("{}.values", enumeration.name),
                expected: "string, integer or boolean values",
            }),
        _ => Err(MetaModelError::InvalidField {
            field: format!("{}.values", enumeration.name),
            expected: "string, integer or boolean values",
        }),
    }
}

impl<'a> Generator<'a> {
    /// Emit the value tag enum, its `Enum` wrapper alias and the value table.
    ///
    /// The tag enum ends with a `MaxValue` sentinel counting the values.
    pub(crate) fn emit_enumeration(&mut self, enumeration: &'a Enumeration) -> MetaModelResult<()> {
        let ident = upper_case_identifier(&enumeration.name);
        let base = base_type_name(enumeration.base);
        self.claim_identifier(&ident)?;
        self.claim_identifier(&format!("{ident}Enum"))?;

        let mut variants = String::new();
        let mut table = String::new();

        for value in &enumeration.values {
            let variant = variant_name(&value.name);

            variants.push_str(&doc_comment("", &value.documentation, "    "));
            variants.push_str(&format!("    {variant},\n"));

            table.push_str(&format!(
                "        ({ident}::{variant}, {}),\n",
                value_literal(enumeration, &value.value)?
            ));
        }

        self.types
            .push_str(&doc_comment("", &enumeration.documentation, ""));
        self.types.push_str(&format!(
            "#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]\n\
             pub enum {ident} {{\n{variants}    MaxValue,\n}}\n\n\
             pub type {ident}Enum = Enumeration<{ident}, {base}>;\n\n"
        ));

        self.serialization.push_str(&format!(
            "impl EnumerationValues for {ident} {{\n    \
             const SUPPORTS_CUSTOM_VALUES: bool = {};\n    \
             const VALUES: &'static [(Self, Literal)] = &[\n{table}    ];\n}}\n\n",
            enumeration.supports_custom_values
        ));

        debug!(enumeration = %ident, values = enumeration.values.len(), "Emitted enumeration");
        Ok(())
    }
}
