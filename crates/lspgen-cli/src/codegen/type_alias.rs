//! Type alias emission

use super::Generator;
use super::naming::{doc_comment, upper_case_identifier};
use lspgen_core::{MetaModelResult, TypeAlias};

impl<'a> Generator<'a> {
    /// Emit `pub type A = T;` after everything `T` uses.
    ///
    /// An alias of an inline structure literal names the literal itself, in
    /// which case the alias line would be `pub type A = A;` and is skipped.
    pub(crate) fn emit_type_alias(&mut self, alias: &'a TypeAlias) -> MetaModelResult<()> {
        let ident = upper_case_identifier(&alias.name);

        self.declare_type(&alias.ty, &ident, true)?;

        let ty = self.rust_type(&alias.ty, &ident, true)?;
        if ty == ident {
            return Ok(());
        }
        self.claim_identifier(&ident)?;

        self.types
            .push_str(&doc_comment("", &alias.documentation, ""));
        self.types.push_str(&format!("pub type {ident} = {ty};\n\n"));

        Ok(())
    }
}
