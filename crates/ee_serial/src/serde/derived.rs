use alloc::boxed::Box;

use crate::object::{Serializable, Typed};
use crate::ops::SerialError;
use crate::serde::de::{deserialize, deserialize_with};
use crate::serde::ser::{serialize, serialize_map};

/// Copies `obj` through its wire form.
///
/// The copy shares no nested value with `obj`, and only carries what
/// [`serialize`] keeps: empty arrays on types that treat them as unset are
/// dropped.
///
/// ```
/// use ee_serial::{Serializable, clone, deep_equals};
///
/// #[derive(Serializable, Clone, Default, Debug)]
/// struct Band {
///     id: Option<String>,
/// }
///
/// let band = Band { id: Some("B1".into()) };
/// let copy = clone(&band).unwrap();
/// assert!(deep_equals(&copy, &band));
/// ```
pub fn clone<T: Typed>(obj: &T) -> Result<T, SerialError> {
    deserialize(serialize(obj)?)
}

/// [`clone`] for an object of unknown type, built with its own constructor.
pub fn clone_dyn(obj: &dyn Serializable) -> Result<Box<dyn Serializable>, SerialError> {
    deserialize_with(obj.constructor(), serialize(obj)?)
}

/// Returns `true` if `obj` serializes to an object with no keys.
pub fn is_empty(obj: &dyn Serializable) -> Result<bool, SerialError> {
    serialize_map(obj).map(|map| map.is_empty())
}
