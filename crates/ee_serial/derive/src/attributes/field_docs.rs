use syn::{Attribute, Expr, Lit, Meta, spanned::Spanned};

/// The doc comment of a field, recorded as its description.
#[derive(Default, Debug)]
pub(crate) struct FieldDocs {
    lines: Vec<String>,
}

impl FieldDocs {
    /// Parse `#[doc = "..."]`, including the `/// ...` form.
    ///
    /// This function does **not** check that the attribute is `doc`,
    /// it is guaranteed by the caller.
    pub fn parse_doc(&mut self, attr: &Attribute) -> syn::Result<()> {
        let Meta::NameValue(pair) = &attr.meta else {
            return Err(syn::Error::new(attr.span(), "expected `#[doc = \"...\"]`"));
        };

        match &pair.value {
            Expr::Lit(expr_lit) => match &expr_lit.lit {
                Lit::Str(lit_str) => {
                    self.lines.push(lit_str.value().trim().to_owned());
                    Ok(())
                }
                _ => Err(syn::Error::new(
                    expr_lit.span(),
                    "`#[doc = ...]` expected a string literal value",
                )),
            },
            // `#[doc = include_str!(...)]` and friends
            _ => Ok(()),
        }
    }

    /// Lines joined with `\n`, or `None` if there is no content.
    pub fn description(&self) -> Option<String> {
        let text = self.lines.join("\n");
        let text = text.trim();
        (!text.is_empty()).then(|| text.to_owned())
    }
}
