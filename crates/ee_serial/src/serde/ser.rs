use alloc::boxed::Box;
use alloc::string::{String, ToString};

use ::serde::{Serialize, Serializer, ser};
use log::trace;

use crate::object::{Constructor, Serializable, Typed};
use crate::ops::{Direction, SerialError, deep_copy};
use crate::serde::WireObject;
use crate::value::{Json, JsonMap, Value};

// -----------------------------------------------------------------------------
// ToWire

/// The serializing [`Direction`]: domain objects in, wire objects out.
///
/// Fields are moved out of the source, so callers hand it a copy.
#[derive(Clone, Copy, Debug, Default)]
pub struct ToWire;

impl Direction for ToWire {
    type Source = Value;
    type Target = Json;

    #[inline]
    fn get(&self, name: &'static str, node: &mut Box<dyn Serializable>) -> Option<Value> {
        node.take(name)
    }

    #[inline]
    fn set(&self, name: &'static str, node: &mut JsonMap, value: Json) -> Result<(), SerialError> {
        node.insert(name.to_string(), value);
        Ok(())
    }

    #[inline]
    fn make(&self, _: Constructor) -> JsonMap {
        JsonMap::new()
    }
}

pub(super) fn serialize_map(obj: &dyn Serializable) -> Result<JsonMap, SerialError> {
    trace!("serialize `{}`", obj.metadata().type_name());
    deep_copy(&ToWire, obj.clone_boxed(), JsonMap::new())
}

// -----------------------------------------------------------------------------
// Entry points

/// Converts a domain object into its wire form.
///
/// The result is always a JSON object holding only the fields that are set.
/// It contains no domain objects and can be encoded directly. The Null
/// Sentinel becomes `null`.
///
/// # Examples
///
/// ```
/// use ee_serial::{Nullable, Serializable, serialize};
/// use serde_json::json;
///
/// #[derive(Serializable, Clone, Default, Debug)]
/// struct AffineTransform {
///     scale_x: Option<f64>,
/// }
///
/// #[derive(Serializable, Clone, Default, Debug)]
/// struct PixelGrid {
///     crs_code: Option<String>,
///     #[serial(object)]
///     affine_transform: Option<Nullable<AffineTransform>>,
/// }
///
/// let grid = PixelGrid {
///     crs_code: Some("EPSG:4326".into()),
///     affine_transform: Some(Nullable::Null),
/// };
///
/// assert_eq!(
///     serialize(&grid).unwrap(),
///     json!({ "crsCode": "EPSG:4326", "affineTransform": null }),
/// );
/// ```
pub fn serialize(obj: &dyn Serializable) -> Result<Json, SerialError> {
    serialize_map(obj).map(Json::Object)
}

/// Like [`serialize`], tagging the result with the source type.
pub fn serialize_typed<T: Typed>(obj: &T) -> Result<WireObject<T>, SerialError> {
    serialize_map(obj).map(WireObject::new)
}

/// Serializes a domain object to JSON text.
pub fn to_string(obj: &dyn Serializable) -> Result<String, SerialError> {
    Ok(::serde_json::to_string(&serialize_map(obj)?)?)
}

// -----------------------------------------------------------------------------
// Wire

/// Serializes a domain object through any `serde` serializer.
///
/// ```
/// use ee_serial::{Serializable, Wire};
///
/// #[derive(Serializable, Clone, Default, Debug)]
/// struct Band {
///     id: Option<String>,
///     data_type: Option<String>,
/// }
///
/// let band = Band { id: Some("B1".into()), data_type: None };
/// let text = serde_json::to_string(&Wire(&band)).unwrap();
/// assert_eq!(text, r#"{"id":"B1"}"#);
/// ```
#[derive(Clone, Copy)]
pub struct Wire<'a>(pub &'a dyn Serializable);

impl Serialize for Wire<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serialize_map(self.0)
            .map_err(<S::Error as ser::Error>::custom)?
            .serialize(serializer)
    }
}
