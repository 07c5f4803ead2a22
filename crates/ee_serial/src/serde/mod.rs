//! Conversion between domain objects and the wire format.
//!
//! ## Menu
//!
//! - [`serialize`]: domain object to a wire object. Only set fields appear;
//!   nested objects are flattened the same way.
//! - [`deserialize`], [`deserialize_with`]: wire object to a domain object.
//!   Unknown keys are dropped; `null` input gives an empty object.
//! - [`strict_deserialize`]: [`deserialize`] accepting only a [`WireObject`]
//!   tagged with the target type.
//! - [`clone`], [`clone_dyn`]: a copy sharing nothing with its source.
//! - [`is_empty`]: whether an object serializes to no keys at all.
//! - [`Wire`], [`to_string`], [`from_str`]: bridges to `serde` and JSON text.
//!
//! Both directions are instances of the generic [`deep_copy`]:
//! [`ToWire`] and [`FromWire`].
//!
//! [`deep_copy`]: crate::ops::deep_copy

// -----------------------------------------------------------------------------
// Modules

mod de;
mod derived;
mod ser;
mod wire_object;

// -----------------------------------------------------------------------------
// Exports

pub use de::{FromWire, deserialize, deserialize_with, from_str, strict_deserialize};
pub use derived::{clone, clone_dyn, is_empty};
pub use ser::{ToWire, Wire, serialize, serialize_typed, to_string};
pub use wire_object::WireObject;
