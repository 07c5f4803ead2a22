//! Code generation for `#[derive(Serializable)]`.

// -----------------------------------------------------------------------------
// Modules

mod auto_register;
mod field_type;
mod metadata;
mod serializable;

// -----------------------------------------------------------------------------
// Entry

use proc_macro::TokenStream;
use quote::quote;
use syn::DeriveInput;

use crate::derive_data::SerialStruct;

pub(crate) fn match_serial_impls(ast: DeriveInput) -> TokenStream {
    let data = match SerialStruct::new(&ast) {
        Ok(data) => data,
        Err(err) => return err.into_compile_error().into(),
    };

    let metadata_statics = metadata::get_metadata_statics(&data);
    let typed_impl = metadata::get_typed_impl(&data);
    let serializable_impl = serializable::get_serializable_impl(&data);
    let field_type_impl = field_type::get_field_type_impl(&data);
    let auto_register_impl = auto_register::get_auto_register_impl(&data);

    quote! {
        const _: () = {
            #metadata_statics

            #typed_impl

            #serializable_impl

            #field_type_impl
        };

        #auto_register_impl
    }
    .into()
}
