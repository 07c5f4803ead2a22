use proc_macro2::TokenStream;
use quote::quote;

use crate::attributes::FieldKind;
use crate::derive_data::SerialStruct;

/// Generate the statics backing the type's `Metadata`.
///
/// ```ignore
/// static __FIELDS: [&str; N] = [ ... ];
/// static __ARRAYS: [(&str, Constructor); _] = [ ... ];
/// // objects, maps, enums, descriptions
/// static __METADATA: Metadata = Metadata::from_partial("Name", PartialMetadata { ... });
/// ```
pub(crate) fn get_metadata_statics(data: &SerialStruct) -> TokenStream {
    let exports_ = crate::path::macro_exports_(data.ee_serial_path());
    let type_name = data.type_name();
    let empty_array_is_unset = data.attrs.empty_array_is_unset.is_some();

    let constructor =
        |ty: &syn::Type| quote! { #exports_::construct::<#ty> as #exports_::Constructor };

    let names: Vec<_> = data.fields.iter().map(|f| &f.wire_name).collect();

    let mut arrays = Vec::new();
    let mut objects = Vec::new();
    let mut maps = Vec::new();
    let mut enums = Vec::new();
    let mut descriptions = Vec::new();

    for field in &data.fields {
        let name = &field.wire_name;

        match (field.kind(), field.element) {
            (FieldKind::Array, Some(ty)) => {
                let ctor = constructor(ty);
                arrays.push(quote! { (#name, #ctor) });
            }
            (FieldKind::Object, Some(ty)) => {
                let ctor = constructor(ty);
                objects.push(quote! { (#name, #ctor) });
            }
            (FieldKind::Map(flags), element) => {
                let base = match element {
                    Some(ty) if !flags.scalar => {
                        let ctor = constructor(ty);
                        quote! { #exports_::MapField::of_objects(#ctor) }
                    }
                    _ => quote! { #exports_::MapField::of_scalars() },
                };
                let value_array = flags.value_array.then(|| quote! { .value_array() });
                let property_array = flags.property_array.then(|| quote! { .property_array() });
                maps.push(quote! { (#name, #base #value_array #property_array) });
            }
            _ => {}
        }

        if !field.attrs.values.is_empty() {
            let values = &field.attrs.values;
            enums.push(quote! { (#name, &[#(#values),*]) });
        }

        if let Some(text) = field.attrs.docs.description() {
            descriptions.push(quote! { (#name, #text) });
        }
    }

    let (n_fields, n_arrays, n_objects) = (names.len(), arrays.len(), objects.len());
    let (n_maps, n_enums, n_descriptions) = (maps.len(), enums.len(), descriptions.len());

    quote! {
        static __FIELDS: [&str; #n_fields] = [#(#names),*];
        static __ARRAYS: [(&str, #exports_::Constructor); #n_arrays] = [#(#arrays),*];
        static __OBJECTS: [(&str, #exports_::Constructor); #n_objects] = [#(#objects),*];
        static __MAPS: [(&str, #exports_::MapField); #n_maps] = [#(#maps),*];
        static __ENUMS: [(&str, &[&str]); #n_enums] = [#(#enums),*];
        static __DESCRIPTIONS: [(&str, &str); #n_descriptions] = [#(#descriptions),*];

        static __METADATA: #exports_::Metadata = #exports_::Metadata::from_partial(
            #type_name,
            #exports_::PartialMetadata {
                keys: &__FIELDS,
                arrays: &__ARRAYS,
                objects: &__OBJECTS,
                object_maps: &__MAPS,
                enums: &__ENUMS,
                descriptions: &__DESCRIPTIONS,
                empty_array_is_unset: #empty_array_is_unset,
            },
        );
    }
}

/// Generate `Typed` implementation
pub(crate) fn get_typed_impl(data: &SerialStruct) -> TokenStream {
    let exports_ = crate::path::macro_exports_(data.ee_serial_path());
    let ident = data.ident;

    quote! {
        impl #exports_::Typed for #ident {
            #[inline]
            fn class_metadata() -> &'static #exports_::Metadata {
                &__METADATA
            }
        }
    }
}
