//! Dynamic field values exchanged between domain objects and the engine.
//!
//! ## Menu
//!
//! - [`Value`]: a single field value as seen by the copy and equality engines.
//! - [`Nullable`]: the typed Null Sentinel used inside struct fields.
//! - [`FieldType`]: conversion between a typed Rust field and a [`Value`].
//! - [`ValueError`]: failure of such a conversion.
//! - [`Json`], [`JsonMap`]: the wire representation.

// -----------------------------------------------------------------------------
// Modules

mod error;
mod field_type;
mod nullable;

// -----------------------------------------------------------------------------
// Exports

pub use error::ValueError;
pub use field_type::{FieldType, downcast_object};
pub use nullable::Nullable;

/// A wire-format value.
pub type Json = ::serde_json::Value;

/// A wire-format object.
pub type JsonMap = ::serde_json::Map<String, Json>;

// -----------------------------------------------------------------------------
// Value

use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use crate::Serializable;

/// A single field value held by a domain object.
///
/// Domain objects hand out and accept fields as `Value`s, so the engine can
/// walk any type through its [`Metadata`](crate::info::Metadata) alone.
///
/// `Value::Null` is the Null Sentinel: a field explicitly set to null, as
/// opposed to a field that is absent. Absence is expressed by the accessors
/// returning `None`, never by a `Value`.
///
/// # Examples
///
/// ```
/// use ee_serial::{Json, Value};
///
/// let v = Value::Array(vec![Value::from(Json::from(1)), Value::Null]);
/// assert_eq!(v.kind_name(), "array");
/// assert_eq!(v.into_plain().unwrap(), serde_json::json!([1, null]));
/// ```
pub enum Value {
    /// The Null Sentinel.
    Null,
    /// A scalar or plain JSON structure, including plain arrays.
    Plain(Json),
    /// A nested domain object.
    Object(Box<dyn Serializable>),
    /// An array built from typed elements.
    Array(Vec<Value>),
    /// A string-keyed map built from typed elements.
    Map(BTreeMap<String, Value>),
}

impl Value {
    /// A short name of the value's kind, used in mismatch errors.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Value::Null => "null sentinel",
            Value::Plain(json) => json_kind(json),
            Value::Object(_) => "domain object",
            Value::Array(_) => "array",
            Value::Map(_) => "map",
        }
    }

    /// Returns `true` for the Null Sentinel.
    #[inline]
    pub fn is_sentinel(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns `true` if the value is an array of length zero, whichever
    /// representation it uses.
    pub fn is_empty_array(&self) -> bool {
        match self {
            Value::Array(items) => items.is_empty(),
            Value::Plain(Json::Array(items)) => items.is_empty(),
            _ => false,
        }
    }

    /// Converts the value into plain JSON.
    ///
    /// The Null Sentinel becomes `null`. Fails if a domain object is found
    /// anywhere inside; those must go through the copy engine.
    pub fn into_plain(self) -> Result<Json, ValueError> {
        match self {
            Value::Null => Ok(Json::Null),
            Value::Plain(json) => Ok(json),
            Value::Object(_) => Err(ValueError::mismatch("plain value", "domain object")),
            Value::Array(items) => items
                .into_iter()
                .map(Value::into_plain)
                .collect::<Result<Vec<_>, _>>()
                .map(Json::Array),
            Value::Map(entries) => entries
                .into_iter()
                .map(|(key, value)| Ok((key, value.into_plain()?)))
                .collect::<Result<JsonMap, ValueError>>()
                .map(Json::Object),
        }
    }
}

pub(crate) fn json_kind(json: &Json) -> &'static str {
    match json {
        Json::Null => "null",
        Json::Bool(_) => "boolean",
        Json::Number(_) => "number",
        Json::String(_) => "string",
        Json::Array(_) => "array",
        Json::Object(_) => "object",
    }
}

impl Clone for Value {
    fn clone(&self) -> Self {
        match self {
            Value::Null => Value::Null,
            Value::Plain(json) => Value::Plain(json.clone()),
            Value::Object(obj) => Value::Object(obj.clone_boxed()),
            Value::Array(items) => Value::Array(items.clone()),
            Value::Map(entries) => Value::Map(entries.clone()),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("Null"),
            Value::Plain(json) => f.debug_tuple("Plain").field(json).finish(),
            Value::Object(obj) => f.debug_tuple("Object").field(obj).finish(),
            Value::Array(items) => f.debug_list().entries(items).finish(),
            Value::Map(entries) => f.debug_map().entries(entries).finish(),
        }
    }
}

impl From<Json> for Value {
    #[inline]
    fn from(json: Json) -> Self {
        Value::Plain(json)
    }
}

impl From<Box<dyn Serializable>> for Value {
    #[inline]
    fn from(obj: Box<dyn Serializable>) -> Self {
        Value::Object(obj)
    }
}

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::collections::BTreeMap;
    use alloc::string::ToString;
    use alloc::vec;
    use serde_json::json;

    use super::{Json, Value, ValueError};
    use crate::fixtures::ValueNode;

    #[test]
    fn into_plain_flattens_containers() {
        let mut entries = BTreeMap::new();
        entries.insert("a".to_string(), Value::Array(vec![Value::Null]));
        entries.insert("b".to_string(), Value::from(json!({"x": 1})));

        assert_eq!(
            Value::Map(entries).into_plain().unwrap(),
            json!({"a": [null], "b": {"x": 1}}),
        );
    }

    #[test]
    fn into_plain_rejects_objects() {
        let nested = Value::Array(vec![Value::Object(Box::new(ValueNode::default()))]);

        assert!(matches!(
            nested.into_plain(),
            Err(ValueError::Mismatch { found: "domain object", .. })
        ));
    }

    #[test]
    fn empty_array_in_both_forms() {
        assert!(Value::Array(vec![]).is_empty_array());
        assert!(Value::Plain(json!([])).is_empty_array());
        assert!(!Value::Plain(json!([1])).is_empty_array());
        assert!(!Value::Plain(Json::Null).is_empty_array());
        assert!(!Value::Null.is_empty_array());
    }
}
