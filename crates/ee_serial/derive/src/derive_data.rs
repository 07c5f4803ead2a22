//! The parsed form of a `#[derive(Serializable)]` input.

use std::collections::BTreeMap;

use convert_case::{Case, Casing};
use proc_macro2::Span;
use syn::ext::IdentExt;
use syn::spanned::Spanned;
use syn::{Data, DeriveInput, Fields, GenericArgument, Ident, PathArguments, Type, TypePath};

use crate::attributes::{FieldAttributes, FieldKind, TypeAttributes};

// -----------------------------------------------------------------------------
// SerialField

/// A field of the derived struct.
pub(crate) struct SerialField<'a> {
    pub ident: &'a Ident,
    pub attrs: FieldAttributes,
    /// The name used on the wire and by the accessors.
    pub wire_name: String,
    /// `T` of the field's `Option<T>`.
    pub value_ty: &'a Type,
    /// The domain type held by an object, array or map field.
    pub element: Option<&'a Type>,
}

impl<'a> SerialField<'a> {
    fn new(field: &'a syn::Field) -> syn::Result<Self> {
        let Some(ident) = &field.ident else {
            return Err(syn::Error::new(field.span(), "expected a named field"));
        };

        let attrs = FieldAttributes::parse_attrs(&field.attrs)?;

        let value_ty = generic_argument(&field.ty, &["Option"]).ok_or_else(|| {
            syn::Error::new(
                field.ty.span(),
                "fields of a `Serializable` type must be `Option<_>`, \
                 `None` being an absent field",
            )
        })?;

        let wire_name = match &attrs.rename {
            Some(lit) => lit.value(),
            None => ident.unraw().to_string().to_case(Case::Camel),
        };

        let element = attrs.kind.has_element().then(|| element_type(value_ty));

        Ok(Self {
            ident,
            attrs,
            wire_name,
            value_ty,
            element,
        })
    }

    #[inline]
    pub fn kind(&self) -> FieldKind {
        self.attrs.kind
    }
}

// -----------------------------------------------------------------------------
// SerialStruct

/// A struct with named fields, ready for code generation.
pub(crate) struct SerialStruct<'a> {
    pub ident: &'a Ident,
    pub attrs: TypeAttributes,
    pub fields: Vec<SerialField<'a>>,
    ee_serial_path: syn::Path,
}

impl<'a> SerialStruct<'a> {
    pub fn new(ast: &'a DeriveInput) -> syn::Result<Self> {
        if !ast.generics.params.is_empty() {
            return Err(syn::Error::new(
                ast.generics.span(),
                "`Serializable` cannot be derived for generic types",
            ));
        }

        let named = match &ast.data {
            Data::Struct(data) => match &data.fields {
                Fields::Named(named) => named,
                _ => {
                    return Err(syn::Error::new(
                        ast.ident.span(),
                        "`Serializable` can only be derived for structs with named fields",
                    ));
                }
            },
            Data::Enum(data) => {
                return Err(syn::Error::new(
                    data.enum_token.span(),
                    "`Serializable` cannot be derived for enums",
                ));
            }
            Data::Union(data) => {
                return Err(syn::Error::new(
                    data.union_token.span(),
                    "`Serializable` cannot be derived for unions",
                ));
            }
        };

        let attrs = TypeAttributes::parse_attrs(&ast.attrs)?;

        let fields = named
            .named
            .iter()
            .map(SerialField::new)
            .collect::<syn::Result<Vec<_>>>()?;

        let mut seen: BTreeMap<&str, Span> = BTreeMap::new();
        for field in &fields {
            if let Some(first) = seen.insert(&field.wire_name, field.ident.span()) {
                let mut err = syn::Error::new(
                    field.ident.span(),
                    format!("duplicate wire name `{}`", field.wire_name),
                );
                err.combine(syn::Error::new(first, "first used here"));
                return Err(err);
            }
        }

        Ok(Self {
            ident: &ast.ident,
            attrs,
            fields,
            ee_serial_path: crate::path::ee_serial(),
        })
    }

    #[inline]
    pub fn ee_serial_path(&self) -> &syn::Path {
        &self.ee_serial_path
    }

    /// The type name recorded in the metadata.
    pub fn type_name(&self) -> String {
        match &self.attrs.type_name {
            Some(lit) => lit.value(),
            None => self.ident.unraw().to_string(),
        }
    }
}

// -----------------------------------------------------------------------------
// Type helpers

/// The last type argument of `ty` if its last path segment is one of `names`.
fn generic_argument<'a>(ty: &'a Type, names: &[&str]) -> Option<&'a Type> {
    let Type::Path(TypePath { qself: None, path }) = ty else {
        return None;
    };
    let segment = path.segments.last()?;
    if !names.iter().any(|name| segment.ident == *name) {
        return None;
    }
    let PathArguments::AngleBracketed(args) = &segment.arguments else {
        return None;
    };

    args.args.iter().rev().find_map(|arg| match arg {
        GenericArgument::Type(ty) => Some(ty),
        _ => None,
    })
}

/// Looks through the containers the engine understands.
///
/// `Vec<Box<Band>>`, `Nullable<Band>` and `BTreeMap<String, Vec<Band>>` all
/// give `Band`.
fn element_type(mut ty: &Type) -> &Type {
    while let Some(inner) = generic_argument(ty, &["Box", "Nullable", "Vec", "BTreeMap", "Option"]) {
        ty = inner;
    }
    ty
}

#[cfg(test)]
mod tests {
    use syn::{DeriveInput, Type, parse_quote};

    use super::{SerialStruct, element_type};
    use crate::attributes::FieldKind;

    #[test]
    fn element_looks_through_containers() {
        let cases: [(Type, Type); 4] = [
            (parse_quote!(Vec<Box<Band>>), parse_quote!(Band)),
            (parse_quote!(Nullable<PixelGrid>), parse_quote!(PixelGrid)),
            (parse_quote!(BTreeMap<String, Vec<ValueNode>>), parse_quote!(ValueNode)),
            (parse_quote!(Vec<BTreeMap<String, ValueNode>>), parse_quote!(ValueNode)),
        ];

        for (ty, expected) in &cases {
            assert_eq!(element_type(ty), expected);
        }
    }

    #[test]
    fn wire_names_and_kinds() {
        let ast: DeriveInput = parse_quote! {
            #[serial(type_name = "Grid")]
            struct PixelGrid {
                crs_code: Option<String>,
                #[serial(object)]
                affine_transform: Option<Nullable<AffineTransform>>,
                #[serial(rename = "kind")]
                r#type: Option<String>,
            }
        };
        let data = SerialStruct::new(&ast).unwrap();

        assert_eq!(data.type_name(), "Grid");
        let names: Vec<_> = data.fields.iter().map(|f| f.wire_name.as_str()).collect();
        assert_eq!(names, ["crsCode", "affineTransform", "kind"]);
        assert!(matches!(data.fields[1].kind(), FieldKind::Object));
        let element: Type = parse_quote!(AffineTransform);
        assert_eq!(data.fields[1].element, Some(&element));
    }

    #[test]
    fn rejects_bad_input() {
        let not_optional: DeriveInput = parse_quote! { struct A { id: String } };
        let generic: DeriveInput = parse_quote! { struct A<T> { id: Option<T> } };
        let tuple: DeriveInput = parse_quote! { struct A(Option<String>); };
        let duplicate: DeriveInput = parse_quote! {
            struct A {
                a_b: Option<String>,
                #[serial(rename = "aB")]
                other: Option<String>,
            }
        };
        let two_kinds: DeriveInput = parse_quote! {
            struct A {
                #[serial(object, array)]
                a: Option<Vec<B>>,
            }
        };

        for ast in [&not_optional, &generic, &tuple, &duplicate, &two_kinds] {
            assert!(SerialStruct::new(ast).is_err());
        }
    }
}
