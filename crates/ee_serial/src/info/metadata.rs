use alloc::collections::BTreeSet;

use crate::info::{MapField, PartialMetadata};
use crate::object::Constructor;
use crate::ops::SerialError;

// -----------------------------------------------------------------------------
// FieldClass

/// How a declared field is copied and compared.
///
/// Returned by [`Metadata::classify`]. The precedence is fixed: a field listed
/// as an array is never looked up as an object or a map.
#[derive(Clone, Copy, Debug)]
pub enum FieldClass<'a> {
    /// An array of nested domain objects.
    Array(Constructor),
    /// A single nested domain object.
    Object(Constructor),
    /// A string-keyed map, see [`MapField`].
    Map(&'a MapField),
    /// Anything else: scalars, plain JSON, and arrays of those.
    Plain,
}

// -----------------------------------------------------------------------------
// Metadata

/// The static description of a domain type.
///
/// Only the fields listed in [`fields`](Self::fields) are ever copied or
/// compared; everything else on the wire is dropped.
///
/// # Examples
///
/// ```
/// use ee_serial::info::{FieldClass, Metadata, PartialMetadata};
///
/// static METADATA: Metadata = Metadata::from_partial(
///     "Expression",
///     PartialMetadata {
///         keys: &["values", "result"],
///         ..PartialMetadata::EMPTY
///     },
/// );
///
/// assert_eq!(METADATA.type_name(), "Expression");
/// assert!(matches!(METADATA.classify("result"), FieldClass::Plain));
/// ```
#[derive(Clone, Copy, Debug)]
pub struct Metadata {
    type_name: &'static str,
    fields: &'static [&'static str],
    arrays: &'static [(&'static str, Constructor)],
    objects: &'static [(&'static str, Constructor)],
    maps: &'static [(&'static str, MapField)],
    enums: &'static [(&'static str, &'static [&'static str])],
    descriptions: &'static [(&'static str, &'static str)],
    empty_array_is_unset: bool,
}

#[inline]
fn lookup<T>(entries: &'static [(&'static str, T)], name: &str) -> Option<&'static T> {
    entries
        .iter()
        .find_map(|(key, value)| (*key == name).then_some(value))
}

#[inline]
fn key_set<T>(entries: &[(&'static str, T)]) -> BTreeSet<&'static str> {
    entries.iter().map(|(key, _)| *key).collect()
}

impl Metadata {
    /// Creates metadata for `type_name` declaring `fields` as plain values.
    #[inline]
    pub const fn new(type_name: &'static str, fields: &'static [&'static str]) -> Self {
        Self {
            type_name,
            fields,
            arrays: &[],
            objects: &[],
            maps: &[],
            enums: &[],
            descriptions: &[],
            empty_array_is_unset: false,
        }
    }

    /// Completes a [`PartialMetadata`] into full metadata.
    #[inline]
    pub const fn from_partial(type_name: &'static str, partial: PartialMetadata) -> Self {
        Self {
            type_name,
            fields: partial.keys,
            arrays: partial.arrays,
            objects: partial.objects,
            maps: partial.object_maps,
            enums: partial.enums,
            descriptions: partial.descriptions,
            empty_array_is_unset: partial.empty_array_is_unset,
        }
    }

    #[inline]
    pub const fn with_arrays(mut self, arrays: &'static [(&'static str, Constructor)]) -> Self {
        self.arrays = arrays;
        self
    }

    #[inline]
    pub const fn with_objects(mut self, objects: &'static [(&'static str, Constructor)]) -> Self {
        self.objects = objects;
        self
    }

    #[inline]
    pub const fn with_maps(mut self, maps: &'static [(&'static str, MapField)]) -> Self {
        self.maps = maps;
        self
    }

    #[inline]
    pub const fn with_enums(
        mut self,
        enums: &'static [(&'static str, &'static [&'static str])],
    ) -> Self {
        self.enums = enums;
        self
    }

    #[inline]
    pub const fn with_descriptions(
        mut self,
        descriptions: &'static [(&'static str, &'static str)],
    ) -> Self {
        self.descriptions = descriptions;
        self
    }

    #[inline]
    pub const fn with_empty_array_is_unset(mut self, value: bool) -> Self {
        self.empty_array_is_unset = value;
        self
    }

    /// Name of the described type, used in error messages and the registry.
    #[inline]
    pub const fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Wire names of every declared field, in declaration order.
    #[inline]
    pub const fn fields(&self) -> &'static [&'static str] {
        self.fields
    }

    /// Returns `true` if `name` is a declared field.
    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains(&name)
    }

    #[inline]
    pub const fn empty_array_is_unset(&self) -> bool {
        self.empty_array_is_unset
    }

    /// Element constructor of an array-of-objects field.
    #[inline]
    pub fn array_element(&self, name: &str) -> Option<Constructor> {
        lookup(self.arrays, name).copied()
    }

    /// Constructor of a nested-object field.
    #[inline]
    pub fn object_type(&self, name: &str) -> Option<Constructor> {
        lookup(self.objects, name).copied()
    }

    /// Descriptor of a map field.
    #[inline]
    pub fn map_field(&self, name: &str) -> Option<&'static MapField> {
        lookup(self.maps, name)
    }

    /// Allowed values of an enum-like field. Informational only.
    #[inline]
    pub fn enum_values(&self, name: &str) -> Option<&'static [&'static str]> {
        lookup(self.enums, name).copied()
    }

    /// Description of a field. Informational only.
    #[inline]
    pub fn description(&self, name: &str) -> Option<&'static str> {
        lookup(self.descriptions, name).copied()
    }

    /// Classifies a field for copying and comparison.
    ///
    /// Undeclared names classify as [`FieldClass::Plain`]; callers only ever
    /// ask about names taken from [`fields`](Self::fields).
    pub fn classify(&self, name: &str) -> FieldClass<'static> {
        if let Some(element) = self.array_element(name) {
            FieldClass::Array(element)
        } else if let Some(ty) = self.object_type(name) {
            FieldClass::Object(ty)
        } else if let Some(map) = self.map_field(name) {
            FieldClass::Map(map)
        } else {
            FieldClass::Plain
        }
    }

    /// Returns `true` if both descriptions declare the same field names and
    /// the same array, object and map fields, ignoring order.
    ///
    /// Type names and element constructors are not compared: two types with
    /// identical declarations are comparable.
    pub fn same_shape(&self, other: &Metadata) -> bool {
        let fields = |m: &Metadata| m.fields.iter().copied().collect::<BTreeSet<_>>();

        fields(self) == fields(other)
            && key_set(self.arrays) == key_set(other.arrays)
            && key_set(self.objects) == key_set(other.objects)
            && key_set(self.maps) == key_set(other.maps)
    }

    /// Checks that every classified field is declared, that no field is
    /// declared twice, and that no field has more than one classification.
    pub fn validate(&self) -> Result<(), SerialError> {
        let invalid = |field: &'static str, reason: &'static str| SerialError::InvalidMetadata {
            type_name: self.type_name,
            field,
            reason,
        };

        let mut seen = BTreeSet::new();
        for &field in self.fields {
            if !seen.insert(field) {
                return Err(invalid(field, "declared more than once"));
            }
        }

        let classified = self
            .arrays
            .iter()
            .map(|(key, _)| *key)
            .chain(self.objects.iter().map(|(key, _)| *key))
            .chain(self.maps.iter().map(|(key, _)| *key));

        let mut classes = BTreeSet::new();
        for field in classified {
            if !seen.contains(field) {
                return Err(invalid(field, "classified but not declared"));
            }
            if !classes.insert(field) {
                return Err(invalid(field, "has more than one classification"));
            }
        }

        Ok(())
    }
}
