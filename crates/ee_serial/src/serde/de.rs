use alloc::boxed::Box;
use alloc::vec::Vec;

use log::{debug, trace};

use crate::info::Metadata;
use crate::object::{Constructor, Serializable, Typed, construct};
use crate::ops::{Direction, SerialError, deep_copy};
use crate::serde::WireObject;
use crate::value::{Json, JsonMap, Value, json_kind};

// -----------------------------------------------------------------------------
// FromWire

/// The deserializing [`Direction`]: wire objects in, domain objects out.
///
/// Keys left over after every declared field was read are unknown to the
/// type and dropped.
#[derive(Clone, Copy, Debug, Default)]
pub struct FromWire;

impl Direction for FromWire {
    type Source = Json;
    type Target = Value;

    #[inline]
    fn get(&self, name: &'static str, node: &mut JsonMap) -> Option<Json> {
        node.remove(name)
    }

    #[inline]
    fn set(
        &self,
        name: &'static str,
        node: &mut Box<dyn Serializable>,
        value: Value,
    ) -> Result<(), SerialError> {
        node.set(name, Some(value))
    }

    #[inline]
    fn make(&self, ctor: Constructor) -> Box<dyn Serializable> {
        ctor()
    }

    fn finish(&self, metadata: &'static Metadata, node: JsonMap) {
        if !node.is_empty() {
            let unknown: Vec<&str> = node.keys().map(|key| key.as_str()).collect();
            debug!("`{}` drops unknown keys {unknown:?}", metadata.type_name());
        }
    }
}

// -----------------------------------------------------------------------------
// Entry points

/// Builds a domain object with `ctor` and fills it from `raw`.
///
/// `null` gives the empty object. Keys `raw` has but the type does not
/// declare are ignored. A wire `null` sets a field to null if its type can
/// hold null, and leaves it absent otherwise.
///
/// # Errors
///
/// - [`SerialError::NotAnObject`] if `raw` is neither an object nor `null`.
/// - Any error of [`deep_copy`], including values the fields cannot hold.
pub fn deserialize_with(
    ctor: Constructor,
    raw: Json,
) -> Result<Box<dyn Serializable>, SerialError> {
    match raw {
        Json::Null => Ok(ctor()),
        Json::Object(map) => {
            let target = ctor();
            trace!("deserialize `{}`", target.metadata().type_name());
            deep_copy(&FromWire, map, target)
        }
        other => Err(SerialError::NotAnObject {
            found: json_kind(&other),
        }),
    }
}

/// Converts a wire value into a `T`.
///
/// See [`deserialize_with`].
///
/// # Examples
///
/// ```
/// use ee_serial::{Serializable, deserialize};
/// use serde_json::json;
///
/// #[derive(Serializable, Clone, Default, Debug, PartialEq)]
/// struct PixelGrid {
///     crs_code: Option<String>,
/// }
///
/// let grid: PixelGrid = deserialize(json!({ "crsCode": "EPSG:4326", "extra": 1 })).unwrap();
/// assert_eq!(grid.crs_code.as_deref(), Some("EPSG:4326"));
///
/// let empty: PixelGrid = deserialize(json!(null)).unwrap();
/// assert_eq!(empty, PixelGrid::default());
/// ```
pub fn deserialize<T: Typed>(raw: Json) -> Result<T, SerialError> {
    deserialize_with(construct::<T>, raw)?
        .downcast::<T>()
        .map(|obj| *obj)
        .map_err(|obj| SerialError::ShapeMismatch {
            left: T::class_metadata().type_name(),
            right: obj.metadata().type_name(),
        })
}

/// [`deserialize`] restricted to wire objects tagged with `T`.
///
/// Behaves exactly like [`deserialize`]; the tag only keeps unrelated wire
/// objects from being passed by mistake.
pub fn strict_deserialize<T: Typed>(raw: WireObject<T>) -> Result<T, SerialError> {
    deserialize(Json::Object(raw.into_inner()))
}

/// Parses JSON text into a `T`.
pub fn from_str<T: Typed>(text: &str) -> Result<T, SerialError> {
    deserialize(::serde_json::from_str(text)?)
}

#[cfg(test)]
mod tests {
    use alloc::collections::BTreeMap;
    use alloc::string::ToString;
    use alloc::vec;
    use alloc::vec::Vec;
    use serde_json::json;

    use super::{deserialize, deserialize_with, from_str, strict_deserialize};
    use crate::fixtures::{
        Algorithm, AlgorithmArgument, Band, Expression, Image, PixelGrid, ValueNode,
    };
    use crate::object::construct;
    use crate::value::{Json, Nullable};
    use crate::{SerialError, WireObject, deep_equals, serialize, serialize_typed};

    fn expression() -> Expression {
        let node = |value: &str| ValueNode {
            integer_value: Some(value.to_string()),
            ..Default::default()
        };

        let mut values = BTreeMap::new();
        values.insert("a".to_string(), node("1"));
        values.insert("b".to_string(), node("2"));

        Expression {
            values: Some(values),
            result: Some("b".to_string()),
        }
    }

    fn algorithm() -> Algorithm {
        let arg = |name: &str, ty: &str| AlgorithmArgument {
            argument_name: Some(name.to_string()),
            r#type: Some(ty.to_string()),
            ..Default::default()
        };

        Algorithm {
            name: Some("Image.add".to_string()),
            arguments: Some(vec![arg("image1", "Image"), arg("image2", "Image")]),
        }
    }

    #[test]
    fn round_trip() {
        let expr = expression();
        let back: Expression = deserialize(serialize(&expr).unwrap()).unwrap();
        assert!(deep_equals(&back, &expr));
        assert_eq!(back, expr);

        let grid = PixelGrid {
            crs_code: Some("EPSG:4326".to_string()),
            affine_transform: Some(Nullable::Null),
        };
        let back: PixelGrid = deserialize(serialize(&grid).unwrap()).unwrap();
        assert!(deep_equals(&back, &grid));
    }

    #[test]
    fn array_of_objects_keeps_order() {
        let algorithm = algorithm();
        let back: Algorithm = deserialize(serialize(&algorithm).unwrap()).unwrap();

        let names: Vec<_> = back
            .arguments
            .iter()
            .flatten()
            .map(|arg| arg.argument_name.as_deref())
            .collect();
        assert_eq!(names, [Some("image1"), Some("image2")]);
        assert_eq!(back, algorithm);
    }

    #[test]
    fn unknown_keys_are_dropped() {
        let valid = json!({ "id": "B1", "missingValues": [0.0] });
        let mut extra = valid.clone();
        extra["extraUnknownKey"] = json!("x");

        let a: Band = deserialize(valid).unwrap();
        let b: Band = deserialize(extra).unwrap();
        assert!(deep_equals(&a, &b));
    }

    #[test]
    fn null_and_non_objects() {
        let empty: Image = deserialize(Json::Null).unwrap();
        assert_eq!(empty, Image::default());

        let err = deserialize::<Image>(json!([1])).unwrap_err();
        assert!(matches!(err, SerialError::NotAnObject { found: "array" }));

        // null clears fields that cannot hold it
        let band: Band = deserialize(json!({ "id": null })).unwrap();
        assert!(band.id.is_none());
    }

    #[test]
    fn ill_typed_field_names_path() {
        let err = deserialize::<Image>(json!({ "bands": [{ "id": 7 }] })).unwrap_err();
        assert!(matches!(
            err.root_cause(),
            SerialError::InvalidValue { type_name: "Band", field: "id", .. }
        ));

        let err = deserialize::<Image>(json!({ "grid": "EPSG:4326" })).unwrap_err();
        assert!(matches!(
            err.root_cause(),
            SerialError::Mismatch { field: "grid", expected: "object", found: "string" }
        ));
    }

    #[test]
    fn strict_and_dynamic() {
        let wire: WireObject<Algorithm> = serialize_typed(&algorithm()).unwrap();
        let strict = strict_deserialize(wire).unwrap();
        assert_eq!(strict, algorithm());

        let raw = serialize(&expression()).unwrap();
        let dynamic = deserialize_with(construct::<Expression>, raw).unwrap();
        assert!(deep_equals(&*dynamic, &expression()));

        let text = r#"{"crsCode":"EPSG:3857"}"#;
        let grid: PixelGrid = from_str(text).unwrap();
        assert_eq!(grid.crs_code.as_deref(), Some("EPSG:3857"));
    }
}
