use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;

use crate::Serializable;
use crate::info::Metadata;
use crate::value::{Json, JsonMap, Value, json_kind};

/// One side of a copy: the value representation a [`Direction`] reads from
/// or writes to.
///
/// The `into_*` conversions hand back a short name of the value's kind on
/// failure, so the engine can report what it found.
///
/// [`Direction`]: crate::ops::Direction
pub trait Shape: Sized {
    /// The object representation: a domain object, or a wire object.
    type Node;

    /// Metadata carried by a node, if it is a domain object.
    fn node_metadata(node: &Self::Node) -> Option<&'static Metadata>;

    /// Returns `true` for null, including the Null Sentinel.
    fn is_null(&self) -> bool;

    /// Length of the value if it is an array.
    fn array_len(&self) -> Option<usize>;

    fn into_array(self) -> Result<Vec<Self>, &'static str>;

    fn into_entries(self) -> Result<Vec<(String, Self)>, &'static str>;

    fn into_node(self) -> Result<Self::Node, &'static str>;

    fn into_plain(self) -> Result<Json, &'static str>;

    fn null() -> Self;

    fn from_array(items: Vec<Self>) -> Self;

    fn from_entries(entries: Vec<(String, Self)>) -> Self;

    fn from_node(node: Self::Node) -> Self;

    fn from_plain(json: Json) -> Self;
}

// -----------------------------------------------------------------------------
// Value

impl Shape for Value {
    type Node = Box<dyn Serializable>;

    #[inline]
    fn node_metadata(node: &Self::Node) -> Option<&'static Metadata> {
        Some(node.metadata())
    }

    #[inline]
    fn is_null(&self) -> bool {
        matches!(self, Value::Null | Value::Plain(Json::Null))
    }

    fn array_len(&self) -> Option<usize> {
        match self {
            Value::Array(items) => Some(items.len()),
            Value::Plain(Json::Array(items)) => Some(items.len()),
            _ => None,
        }
    }

    fn into_array(self) -> Result<Vec<Self>, &'static str> {
        match self {
            Value::Array(items) => Ok(items),
            Value::Plain(Json::Array(items)) => Ok(items.into_iter().map(Value::Plain).collect()),
            other => Err(other.kind_name()),
        }
    }

    fn into_entries(self) -> Result<Vec<(String, Self)>, &'static str> {
        match self {
            Value::Map(entries) => Ok(entries.into_iter().collect()),
            Value::Plain(Json::Object(entries)) => Ok(entries
                .into_iter()
                .map(|(key, value)| (key, Value::Plain(value)))
                .collect()),
            other => Err(other.kind_name()),
        }
    }

    fn into_node(self) -> Result<Self::Node, &'static str> {
        match self {
            Value::Object(obj) => Ok(obj),
            other => Err(other.kind_name()),
        }
    }

    #[inline]
    fn into_plain(self) -> Result<Json, &'static str> {
        Value::into_plain(self).map_err(|_| "domain object")
    }

    #[inline]
    fn null() -> Self {
        Value::Null
    }

    #[inline]
    fn from_array(items: Vec<Self>) -> Self {
        Value::Array(items)
    }

    #[inline]
    fn from_entries(entries: Vec<(String, Self)>) -> Self {
        Value::Map(entries.into_iter().collect())
    }

    #[inline]
    fn from_node(node: Self::Node) -> Self {
        Value::Object(node)
    }

    #[inline]
    fn from_plain(json: Json) -> Self {
        Value::Plain(json)
    }
}

// -----------------------------------------------------------------------------
// Json

impl Shape for Json {
    type Node = JsonMap;

    #[inline]
    fn node_metadata(_: &Self::Node) -> Option<&'static Metadata> {
        None
    }

    #[inline]
    fn is_null(&self) -> bool {
        Json::is_null(self)
    }

    #[inline]
    fn array_len(&self) -> Option<usize> {
        self.as_array().map(Vec::len)
    }

    fn into_array(self) -> Result<Vec<Self>, &'static str> {
        match self {
            Json::Array(items) => Ok(items),
            other => Err(json_kind(&other)),
        }
    }

    fn into_entries(self) -> Result<Vec<(String, Self)>, &'static str> {
        match self {
            Json::Object(entries) => Ok(entries.into_iter().collect()),
            other => Err(json_kind(&other)),
        }
    }

    fn into_node(self) -> Result<Self::Node, &'static str> {
        match self {
            Json::Object(entries) => Ok(entries),
            other => Err(json_kind(&other)),
        }
    }

    #[inline]
    fn into_plain(self) -> Result<Json, &'static str> {
        Ok(self)
    }

    #[inline]
    fn null() -> Self {
        Json::Null
    }

    #[inline]
    fn from_array(items: Vec<Self>) -> Self {
        Json::Array(items)
    }

    #[inline]
    fn from_entries(entries: Vec<(String, Self)>) -> Self {
        Json::Object(entries.into_iter().collect())
    }

    #[inline]
    fn from_node(node: Self::Node) -> Self {
        Json::Object(node)
    }

    #[inline]
    fn from_plain(json: Json) -> Self {
        json
    }
}
