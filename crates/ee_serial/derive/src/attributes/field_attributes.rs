use proc_macro2::Span;
use syn::ext::IdentExt;
use syn::parse::ParseStream;
use syn::punctuated::Punctuated;
use syn::token::Paren;
use syn::{Attribute, Ident, LitStr, Token, parenthesized};

use super::FieldDocs;
use crate::SERIAL_ATTRIBUTE_NAME;

/// Flags of a `#[serial(map(...))]` field.
#[derive(Default, Clone, Copy, Debug)]
pub(crate) struct MapFlags {
    /// Entries are plain values, not domain objects.
    pub scalar: bool,
    /// Each entry is an array.
    pub value_array: bool,
    /// The field is an array of maps.
    pub property_array: bool,
}

/// How a field is copied.
#[derive(Default, Clone, Copy, Debug)]
pub(crate) enum FieldKind {
    #[default]
    Plain,
    Object,
    Array,
    Map(MapFlags),
}

impl FieldKind {
    /// Whether the field holds domain objects and needs an element type.
    pub fn has_element(self) -> bool {
        match self {
            FieldKind::Plain => false,
            FieldKind::Object | FieldKind::Array => true,
            FieldKind::Map(flags) => !flags.scalar,
        }
    }
}

/// Attributes placed on a field.
///
/// Examples:
/// - `#[serial(rename = "crs")]`
/// - `#[serial(object)]`, `#[serial(array)]`
/// - `#[serial(map)]`, `#[serial(map(scalar, value_array))]`
/// - `#[serial(values("Float", "Int"))]`
#[derive(Default, Debug)]
pub(crate) struct FieldAttributes {
    pub rename: Option<LitStr>,
    pub kind: FieldKind,
    kind_span: Option<Span>,
    pub values: Vec<LitStr>,
    pub docs: FieldDocs,
}

impl FieldAttributes {
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut this = Self::default();

        for attr in attrs {
            if attr.path().is_ident(SERIAL_ATTRIBUTE_NAME) {
                attr.parse_args_with(|input: ParseStream| this.parse_stream(input))?;
            } else if attr.path().is_ident("doc") {
                this.docs.parse_doc(attr)?;
            }
        }

        Ok(this)
    }

    /// Parse the content of one `#[serial(...)]`.
    pub fn parse_stream(&mut self, input: ParseStream) -> syn::Result<()> {
        while !input.is_empty() {
            let ident = input.call(Ident::parse_any)?;

            match ident.to_string().as_str() {
                "rename" => {
                    if self.rename.is_some() {
                        return Err(syn::Error::new(ident.span(), "duplicate `rename`"));
                    }
                    input.parse::<Token![=]>()?;
                    let lit: LitStr = input.parse()?;
                    if lit.value().is_empty() {
                        return Err(syn::Error::new(lit.span(), "`rename` must not be empty"));
                    }
                    self.rename = Some(lit);
                }
                "object" => self.set_kind(FieldKind::Object, &ident)?,
                "array" => self.set_kind(FieldKind::Array, &ident)?,
                "map" => {
                    let flags = parse_map_flags(input)?;
                    self.set_kind(FieldKind::Map(flags), &ident)?;
                }
                "values" => {
                    let content;
                    parenthesized!(content in input);
                    let list = Punctuated::<LitStr, Token![,]>::parse_terminated(&content)?;
                    self.values.extend(list);
                }
                _ => {
                    return Err(syn::Error::new(
                        ident.span(),
                        "unknown field attribute, expected one of \
                         `rename`, `object`, `array`, `map`, `values`",
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

    fn set_kind(&mut self, kind: FieldKind, ident: &Ident) -> syn::Result<()> {
        if let Some(span) = self.kind_span {
            let mut err = syn::Error::new(
                ident.span(),
                "a field can only be one of `object`, `array` or `map`",
            );
            err.combine(syn::Error::new(span, "first declared here"));
            return Err(err);
        }
        self.kind = kind;
        self.kind_span = Some(ident.span());
        Ok(())
    }
}

/// Format: `(scalar, value_array, property_array)`, all optional.
fn parse_map_flags(input: ParseStream) -> syn::Result<MapFlags> {
    let mut flags = MapFlags::default();
    if !input.peek(Paren) {
        return Ok(flags);
    }

    let content;
    parenthesized!(content in input);
    for ident in Punctuated::<Ident, Token![,]>::parse_terminated(&content)? {
        let flag = match ident.to_string().as_str() {
            "scalar" => &mut flags.scalar,
            "value_array" => &mut flags.value_array,
            "property_array" => &mut flags.property_array,
            _ => {
                return Err(syn::Error::new(
                    ident.span(),
                    "unknown map flag, expected one of \
                     `scalar`, `value_array`, `property_array`",
                ));
            }
        };
        *flag = true;
    }

    Ok(flags)
}
