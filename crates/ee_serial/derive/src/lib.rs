//! See following macros:
//!
//! - [`Serializable`]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(clippy::std_instead_of_core, reason = "proc-macro lib")]
#![allow(clippy::std_instead_of_alloc, reason = "proc-macro lib")]

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

static SERIAL_ATTRIBUTE_NAME: &str = "serial";

// -----------------------------------------------------------------------------
// Modules

mod attributes;
mod derive_data;
mod impls;
mod path;

// -----------------------------------------------------------------------------
// Macros

/// # Serializable Derivation
///
/// `#[derive(Serializable)]` implements the following for a struct with named
/// fields:
///
/// - `Serializable`, with accessors keyed by wire name
/// - `Typed`, returning the static `Metadata`
/// - `FieldType`, so the type can be nested in other domain objects
///
/// The type must also implement `Default`, `Clone` and `Debug`.
///
/// Every field must be an `Option<_>`: `None` is an absent field. Use
/// `Option<Nullable<_>>` for a field that may be explicitly null.
///
/// ## Wire Names
///
/// A field's wire name is its identifier in `camelCase`. Override it with
/// `rename`:
///
/// ```rust, ignore
/// #[derive(Serializable, Clone, Default, Debug)]
/// struct Band {
///     #[serial(rename = "band_id")]
///     id: Option<String>,
/// }
/// ```
///
/// ## Field Classification
///
/// Fields holding domain objects must say so, since their type alone is not
/// enough to tell them apart from plain values:
///
/// ```rust, ignore
/// #[derive(Serializable, Clone, Default, Debug)]
/// struct Image {
///     #[serial(array)]
///     bands: Option<Vec<Band>>,
///     #[serial(object)]
///     grid: Option<Nullable<PixelGrid>>,
///     #[serial(map)]
///     nodes: Option<BTreeMap<String, ValueNode>>,
///     #[serial(map(scalar))]
///     properties: Option<BTreeMap<String, Json>>,
/// }
/// ```
///
/// `map` accepts the flags `scalar` (plain values), `value_array` (each entry
/// is an array) and `property_array` (the field is an array of maps).
///
/// The element type is found by looking through `Box`, `Nullable`, `Vec` and
/// `BTreeMap`.
///
/// ## Other Field Attributes
///
/// - `#[serial(values("A", "B"))]` records the allowed values of an enum-like
///   string field.
/// - Doc comments become the field's description.
///
/// ## Type Attributes
///
/// - `#[serial(type_name = "...")]` overrides the type name, which defaults to
///   the identifier.
/// - `#[serial(empty_array_is_unset)]` treats empty arrays as absent.
/// - `#[serial(auto_register)]` submits the type for
///   `TypeRegistry::auto_register`. Only effective with the `auto_register`
///   feature.
///
/// ## Limitations
///
/// Generic types, enums, unions and tuple structs are rejected.
#[proc_macro_derive(Serializable, attributes(serial))]
pub fn derive_serializable(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);

    impls::match_serial_impls(ast)
}
