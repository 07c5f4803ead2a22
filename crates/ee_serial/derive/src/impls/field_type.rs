use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::SerialStruct;

/// Generate `FieldType` implementation, so the type can sit in other
/// domain objects' fields.
pub(crate) fn get_field_type_impl(data: &SerialStruct) -> TokenStream {
    let exports_ = crate::path::macro_exports_(data.ee_serial_path());
    let ident = data.ident;

    quote! {
        impl #exports_::FieldType for #ident {
            #[inline]
            fn to_value(&self) -> #exports_::Value {
                #exports_::Value::Object(#exports_::Box::new(::core::clone::Clone::clone(self)))
            }

            #[inline]
            fn into_value(self) -> #exports_::Value {
                #exports_::Value::Object(#exports_::Box::new(self))
            }

            #[inline]
            fn from_value(
                value: #exports_::Value,
            ) -> #exports_::Result<Self, #exports_::ValueError> {
                #exports_::downcast_object::<Self>(value)
            }
        }
    }
}
