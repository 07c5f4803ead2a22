//! Parsing of `#[serial(...)]` and doc attributes.

// -----------------------------------------------------------------------------
// Modules

mod field_attributes;
mod field_docs;
mod type_attributes;

// -----------------------------------------------------------------------------
// Internal API

use field_docs::FieldDocs;

pub(crate) use field_attributes::{FieldAttributes, FieldKind};
pub(crate) use type_attributes::TypeAttributes;
