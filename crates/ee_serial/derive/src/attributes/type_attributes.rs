use proc_macro2::Span;
use syn::ext::IdentExt;
use syn::parse::ParseStream;
use syn::{Attribute, Ident, LitStr, Token};

use crate::SERIAL_ATTRIBUTE_NAME;

/// Attributes placed on the type itself.
///
/// Examples:
/// - `#[serial(type_name = "Image")]`
/// - `#[serial(empty_array_is_unset, auto_register)]`
#[derive(Default, Debug)]
pub(crate) struct TypeAttributes {
    pub type_name: Option<LitStr>,
    pub empty_array_is_unset: Option<Span>,
    pub auto_register: Option<Span>,
}

impl TypeAttributes {
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut this = Self::default();

        for attr in attrs {
            if attr.path().is_ident(SERIAL_ATTRIBUTE_NAME) {
                attr.parse_args_with(|input: ParseStream| this.parse_stream(input))?;
            }
        }

        Ok(this)
    }

    /// Parse the content of one `#[serial(...)]`.
    pub fn parse_stream(&mut self, input: ParseStream) -> syn::Result<()> {
        while !input.is_empty() {
            let ident = input.call(Ident::parse_any)?;

            match ident.to_string().as_str() {
                "type_name" => {
                    if self.type_name.is_some() {
                        return Err(syn::Error::new(ident.span(), "duplicate `type_name`"));
                    }
                    input.parse::<Token![=]>()?;
                    let lit: LitStr = input.parse()?;
                    if lit.value().is_empty() {
                        return Err(syn::Error::new(lit.span(), "`type_name` must not be empty"));
                    }
                    self.type_name = Some(lit);
                }
                "empty_array_is_unset" => set_flag(&mut self.empty_array_is_unset, &ident)?,
                "auto_register" => set_flag(&mut self.auto_register, &ident)?,
                _ => {
                    return Err(syn::Error::new(
                        ident.span(),
                        "unknown type attribute, expected one of \
                         `type_name`, `empty_array_is_unset`, `auto_register`",
                    ));
                }
            }

            if input.is_empty() {
                break;
            }
            input.parse::<Token![,]>()?;
        }

        Ok(())
    }
}

fn set_flag(flag: &mut Option<Span>, ident: &Ident) -> syn::Result<()> {
    if flag.is_some() {
        return Err(syn::Error::new(ident.span(), format!("duplicate `{ident}`")));
    }
    *flag = Some(ident.span());
    Ok(())
}
