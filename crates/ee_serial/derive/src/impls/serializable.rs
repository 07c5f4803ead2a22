use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::SerialStruct;

/// Generate `Serializable` implementation.
///
/// Accessors match on the wire name. Setting a field to null stores what
/// `FieldType::from_null` gives for its type, which clears the field unless
/// the type can hold null.
pub(crate) fn get_serializable_impl(data: &SerialStruct) -> TokenStream {
    let exports_ = crate::path::macro_exports_(data.ee_serial_path());
    let ident = data.ident;
    let type_name = data.type_name();

    let names: Vec<_> = data.fields.iter().map(|f| &f.wire_name).collect();
    let members: Vec<_> = data.fields.iter().map(|f| f.ident).collect();

    let set_arms = data.fields.iter().map(|field| {
        let name = &field.wire_name;
        let member = field.ident;
        let ty = field.value_ty;

        quote! {
            #name => {
                self.#member = match value {
                    #exports_::None => #exports_::None,
                    #exports_::Some(#exports_::Value::Null)
                    | #exports_::Some(#exports_::Value::Plain(#exports_::Json::Null)) => {
                        <#ty as #exports_::FieldType>::from_null()
                    }
                    #exports_::Some(value) => #exports_::Some(
                        <#ty as #exports_::FieldType>::from_value(value).map_err(|source| {
                            #exports_::SerialError::InvalidValue {
                                type_name: #type_name,
                                field: #name,
                                source,
                            }
                        })?,
                    ),
                };
                #exports_::Ok(())
            }
        }
    });

    // a type without fields never reads `value`
    let allow_unused = data
        .fields
        .is_empty()
        .then(|| quote! { #[allow(unused_variables)] });

    quote! {
        impl #exports_::Serializable for #ident {
            #[inline]
            fn metadata(&self) -> &'static #exports_::Metadata {
                &__METADATA
            }

            #[inline]
            fn constructor(&self) -> #exports_::Constructor {
                #exports_::construct::<Self>
            }

            fn get(&self, name: &str) -> #exports_::Option<#exports_::Value> {
                match name {
                    #(#names => self.#members.as_ref().map(#exports_::FieldType::to_value),)*
                    _ => #exports_::None,
                }
            }

            fn take(&mut self, name: &str) -> #exports_::Option<#exports_::Value> {
                match name {
                    #(#names => self.#members.take().map(#exports_::FieldType::into_value),)*
                    _ => #exports_::None,
                }
            }

            #allow_unused
            fn set(
                &mut self,
                name: &str,
                value: #exports_::Option<#exports_::Value>,
            ) -> #exports_::Result<(), #exports_::SerialError> {
                match name {
                    #(#set_arms)*
                    _ => #exports_::Err(#exports_::SerialError::UnknownField {
                        type_name: #type_name,
                        field: #exports_::ToString::to_string(name),
                    }),
                }
            }

            fn has(&self, name: &str) -> bool {
                match name {
                    #(#names => self.#members.is_some(),)*
                    _ => false,
                }
            }

            #[inline]
            fn clone_boxed(&self) -> #exports_::Box<dyn #exports_::Serializable> {
                #exports_::Box::new(::core::clone::Clone::clone(self))
            }

            #[inline]
            fn as_any(&self) -> &dyn #exports_::Any {
                self
            }

            #[inline]
            fn as_any_mut(&mut self) -> &mut dyn #exports_::Any {
                self
            }

            #[inline]
            fn into_any(self: #exports_::Box<Self>) -> #exports_::Box<dyn #exports_::Any> {
                self
            }
        }
    }
}
