#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

// -----------------------------------------------------------------------------
// Extern Self

// The derive macro emits `::ee_serial::...` paths; this alias lets the crate
// derive on its own test fixtures.
extern crate self as ee_serial;

// -----------------------------------------------------------------------------
// no_std support

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod object;

pub mod info;
pub mod ops;
pub mod registry;
pub mod serde;
pub mod value;

#[cfg(test)]
mod fixtures;

// -----------------------------------------------------------------------------
// Top-Level exports

#[doc(hidden)]
pub mod __macro_exports;

pub use ee_serial_derive as derive;
pub use ee_serial_derive::Serializable;

pub use object::{Constructor, Serializable, Typed, construct};
pub use ops::{SerialError, deep_copy, deep_equals, try_deep_equals};
pub use crate::serde::{
    Wire, WireObject, clone, clone_dyn, deserialize, deserialize_with, from_str, is_empty,
    serialize, serialize_typed, strict_deserialize, to_string,
};
pub use value::{Json, JsonMap, Nullable, Value};
