use crate::object::Constructor;

/// Descriptor of a string-keyed map field.
///
/// A map field holds `{ key: element }` where each element is either a plain
/// JSON value or a nested domain object, optionally wrapped in an array.
/// The field itself may also be an array of such maps.
///
/// | shape on the wire                 | builder                                  |
/// |-----------------------------------|------------------------------------------|
/// | `{ k: Object }`                   | `MapField::of_objects(ctor)`             |
/// | `{ k: [Object] }`                 | `MapField::of_objects(ctor).value_array()` |
/// | `{ k: scalar }`                   | `MapField::of_scalars()`                 |
/// | `[{ k: Object }]`                 | `MapField::of_objects(ctor).property_array()` |
#[derive(Clone, Copy, Debug)]
pub struct MapField {
    element: Option<Constructor>,
    is_value_array: bool,
    is_serializable: bool,
    is_property_array: bool,
}

impl MapField {
    /// Creates a descriptor from its raw parts.
    ///
    /// `is_serializable` without an `element` constructor is representable on
    /// purpose; copying such a field fails with
    /// [`SerialError::MissingConstructor`](crate::SerialError::MissingConstructor).
    #[inline]
    pub const fn new(
        element: Option<Constructor>,
        is_value_array: bool,
        is_serializable: bool,
    ) -> Self {
        Self {
            element,
            is_value_array,
            is_serializable,
            is_property_array: false,
        }
    }

    /// A map whose values are domain objects built by `element`.
    #[inline]
    pub const fn of_objects(element: Constructor) -> Self {
        Self::new(Some(element), false, true)
    }

    /// A map whose values are plain JSON values.
    #[inline]
    pub const fn of_scalars() -> Self {
        Self::new(None, false, false)
    }

    /// Every map value is an array of elements.
    #[inline]
    pub const fn value_array(mut self) -> Self {
        self.is_value_array = true;
        self
    }

    /// The field is an array of maps rather than a single map.
    #[inline]
    pub const fn property_array(mut self) -> Self {
        self.is_property_array = true;
        self
    }

    /// Constructor of the element type, if the elements are domain objects.
    #[inline]
    pub const fn element(&self) -> Option<Constructor> {
        self.element
    }

    #[inline]
    pub const fn is_value_array(&self) -> bool {
        self.is_value_array
    }

    #[inline]
    pub const fn is_serializable(&self) -> bool {
        self.is_serializable
    }

    #[inline]
    pub const fn is_property_array(&self) -> bool {
        self.is_property_array
    }
}
