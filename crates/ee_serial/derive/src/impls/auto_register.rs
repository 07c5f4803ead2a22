use crate::derive_data::SerialStruct;

/// Generate `auto_register` implementation
#[cfg(feature = "auto_register")]
pub(crate) fn get_auto_register_impl(data: &SerialStruct) -> proc_macro2::TokenStream {
    use quote::quote_spanned;

    let Some(span) = data.attrs.auto_register else {
        return proc_macro2::TokenStream::new();
    };

    let auto_register_ = crate::path::auto_register_(data.ee_serial_path());
    let ident = data.ident;

    quote_spanned! { span =>
        #auto_register_::inventory::submit! {
            #auto_register_::AutoRegistration::of::<#ident>()
        }
    }
}

/// Generate `auto_register` implementation
#[cfg(not(feature = "auto_register"))]
pub(crate) fn get_auto_register_impl(_: &SerialStruct) -> proc_macro2::TokenStream {
    proc_macro2::TokenStream::new()
}
