//! Paths of the `ee_serial` items referenced by generated code.

use proc_macro2::TokenStream;
use quote::quote;

/// Get the correct access path to the `ee_serial` crate.
///
/// 1. For crates that depend on `ee_serial`, `::ee_serial` is returned.
/// 2. For crates that depend on `ee_core` or `ee`, `::ee_core::serial` or
///    `::ee::serial` is returned.
/// 3. Otherwise `::ee_serial` is returned, which may be incorrect.
///
/// Reading the manifest is not free, so the path is resolved once per
/// derive and passed around.
pub(crate) fn ee_serial() -> syn::Path {
    ee_macro_utils::Manifest::shared(|manifest| manifest.get_crate_path("ee_serial"))
}

#[inline]
pub(crate) fn macro_exports_(ee_serial_path: &syn::Path) -> TokenStream {
    quote! { #ee_serial_path::__macro_exports }
}

#[cfg(feature = "auto_register")]
#[inline]
pub(crate) fn auto_register_(ee_serial_path: &syn::Path) -> TokenStream {
    quote! { #ee_serial_path::__macro_exports::auto_register }
}
