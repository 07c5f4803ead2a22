use crate::info::MapField;
use crate::object::Constructor;

/// The part of a type's [`Metadata`](crate::info::Metadata) its author supplies.
///
/// Anything left out is filled from [`PartialMetadata::EMPTY`]: no fields, no
/// nested types, empty arrays are kept.
#[derive(Clone, Copy, Debug)]
pub struct PartialMetadata {
    /// Wire names of every declared field, in declaration order.
    pub keys: &'static [&'static str],
    /// Fields holding an array of nested domain objects.
    pub arrays: &'static [(&'static str, Constructor)],
    /// Fields holding a single nested domain object.
    pub objects: &'static [(&'static str, Constructor)],
    /// Fields holding a string-keyed map.
    pub object_maps: &'static [(&'static str, MapField)],
    /// Allowed values of enum-like string fields.
    pub enums: &'static [(&'static str, &'static [&'static str])],
    /// Human readable field descriptions.
    pub descriptions: &'static [(&'static str, &'static str)],
    /// Treat a zero-length array exactly like an absent field.
    pub empty_array_is_unset: bool,
}

impl PartialMetadata {
    /// A description with nothing declared.
    pub const EMPTY: Self = Self {
        keys: &[],
        arrays: &[],
        objects: &[],
        object_maps: &[],
        enums: &[],
        descriptions: &[],
        empty_array_is_unset: false,
    };
}

impl Default for PartialMetadata {
    #[inline]
    fn default() -> Self {
        Self::EMPTY
    }
}
