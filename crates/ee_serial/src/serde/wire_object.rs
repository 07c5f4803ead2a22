use core::fmt;
use core::marker::PhantomData;

use ::serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::ops::SerialError;
use crate::value::{Json, JsonMap, json_kind};

/// A wire object tagged with the domain type it describes.
///
/// Produced by [`serialize_typed`](crate::serialize_typed) and accepted by
/// [`strict_deserialize`](crate::strict_deserialize). The tag carries no
/// runtime check; it only narrows what callers can pass.
///
/// Serializes and deserializes as the plain JSON object.
pub struct WireObject<T> {
    map: JsonMap,
    _marker: PhantomData<fn() -> T>,
}

impl<T> WireObject<T> {
    #[inline]
    pub const fn new(map: JsonMap) -> Self {
        Self {
            map,
            _marker: PhantomData,
        }
    }

    /// Tags a wire value, which must be a JSON object.
    pub fn from_json(json: Json) -> Result<Self, SerialError> {
        match json {
            Json::Object(map) => Ok(Self::new(map)),
            other => Err(SerialError::NotAnObject {
                found: json_kind(&other),
            }),
        }
    }

    #[inline]
    pub fn as_map(&self) -> &JsonMap {
        &self.map
    }

    #[inline]
    pub fn as_map_mut(&mut self) -> &mut JsonMap {
        &mut self.map
    }

    #[inline]
    pub fn into_inner(self) -> JsonMap {
        self.map
    }
}

impl<T> Clone for WireObject<T> {
    #[inline]
    fn clone(&self) -> Self {
        Self::new(self.map.clone())
    }
}

impl<T> PartialEq for WireObject<T> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.map == other.map
    }
}

impl<T> fmt::Debug for WireObject<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("WireObject").field(&self.map).finish()
    }
}

impl<T> From<WireObject<T>> for Json {
    #[inline]
    fn from(wire: WireObject<T>) -> Self {
        Json::Object(wire.map)
    }
}

impl<T> Serialize for WireObject<T> {
    #[inline]
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.map.serialize(serializer)
    }
}

impl<'de, T> Deserialize<'de> for WireObject<T> {
    #[inline]
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        JsonMap::deserialize(deserializer).map(Self::new)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::WireObject;
    use crate::SerialError;
    use crate::fixtures::PixelGrid;
    use crate::strict_deserialize;

    #[test]
    fn tags_objects_only() {
        assert!(matches!(
            WireObject::<PixelGrid>::from_json(json!("EPSG:4326")),
            Err(SerialError::NotAnObject { found: "string" })
        ));

        let wire: WireObject<PixelGrid> =
            serde_json::from_str(r#"{"crsCode":"EPSG:4326"}"#).unwrap();
        assert_eq!(serde_json::to_value(&wire).unwrap(), json!({"crsCode": "EPSG:4326"}));

        let grid = strict_deserialize(wire).unwrap();
        assert_eq!(grid.crs_code.as_deref(), Some("EPSG:4326"));
    }
}
