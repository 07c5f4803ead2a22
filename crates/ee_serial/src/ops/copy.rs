use alloc::string::String;
use alloc::vec::Vec;

use crate::info::{FieldClass, MapField, Metadata};
use crate::object::Constructor;
use crate::ops::{SerialError, Shape, trace};

/// The source node type of a direction.
pub type SourceNode<D> = <<D as Direction>::Source as Shape>::Node;

/// The target node type of a direction.
pub type TargetNode<D> = <<D as Direction>::Target as Shape>::Node;

// -----------------------------------------------------------------------------
// Direction

/// The direction-specific half of [`deep_copy`]: how to read a field, how to
/// write one, and how to make an empty target node.
///
/// Serialization reads from domain objects and writes wire objects;
/// deserialization does the opposite. The traversal is shared.
pub trait Direction {
    type Source: Shape;
    type Target: Shape;

    /// Reads the field `name` from `node`, or `None` if it is absent.
    ///
    /// The value may be moved out: each field is read at most once.
    fn get(&self, name: &'static str, node: &mut SourceNode<Self>) -> Option<Self::Source>;

    /// Stores a copied value into `node`.
    fn set(
        &self,
        name: &'static str,
        node: &mut TargetNode<Self>,
        value: Self::Target,
    ) -> Result<(), SerialError>;

    /// Makes an empty target node for a nested value built by `ctor`.
    fn make(&self, ctor: Constructor) -> TargetNode<Self>;

    /// Receives what is left of `node` after every declared field was read.
    #[inline]
    fn finish(&self, metadata: &'static Metadata, node: SourceNode<Self>) {
        let _ = (metadata, node);
    }
}

// -----------------------------------------------------------------------------
// deep_copy

/// Copies every declared field of `source` into `target`.
///
/// The [`Metadata`] is taken from the source node if it is a domain object,
/// otherwise from the target node. Fields are classified and copied as
/// follows:
///
/// - absent fields are skipped;
/// - null, including the Null Sentinel, is copied as null;
/// - arrays of objects and single objects are copied recursively into nodes
///   made by the declared constructor;
/// - map fields are copied entry by entry, dropping null entries;
/// - anything else is copied by value.
///
/// With [`Metadata::empty_array_is_unset`], zero-length arrays are skipped as
/// if absent.
///
/// # Errors
///
/// - [`SerialError::MissingMetadata`] if neither node is a domain object.
/// - [`SerialError::MissingConstructor`] for a nested field without one.
/// - [`SerialError::Mismatch`] if a value does not fit its classification.
/// - Any error raised by [`Direction::set`].
pub fn deep_copy<D: Direction>(
    dir: &D,
    mut source: SourceNode<D>,
    mut target: TargetNode<D>,
) -> Result<TargetNode<D>, SerialError> {
    let metadata = D::Source::node_metadata(&source)
        .or_else(|| D::Target::node_metadata(&target))
        .ok_or(SerialError::MissingMetadata)?;

    for &name in metadata.fields() {
        let Some(value) = dir.get(name, &mut source) else {
            continue;
        };

        let _guard = trace::enter(metadata.type_name(), name);

        if let Some(copied) = copy_field(dir, metadata, name, value).map_err(trace::traced)? {
            dir.set(name, &mut target, copied).map_err(trace::traced)?;
        }
    }

    dir.finish(metadata, source);
    Ok(target)
}

fn mismatch(
    field: &'static str,
    expected: &'static str,
) -> impl FnOnce(&'static str) -> SerialError {
    move |found| SerialError::Mismatch {
        field,
        expected,
        found,
    }
}

/// Copies one present field, or returns `None` to leave it out.
fn copy_field<D: Direction>(
    dir: &D,
    metadata: &'static Metadata,
    name: &'static str,
    value: D::Source,
) -> Result<Option<D::Target>, SerialError> {
    if value.is_null() {
        return Ok(Some(D::Target::null()));
    }

    let unset = metadata.empty_array_is_unset() && value.array_len() == Some(0);

    let copied = match metadata.classify(name) {
        FieldClass::Array(_) | FieldClass::Plain if unset => return Ok(None),
        FieldClass::Array(ctor) => copy_value(dir, value, true, true, Some(ctor), name)?,
        FieldClass::Object(ctor) => copy_value(dir, value, false, true, Some(ctor), name)?,
        FieldClass::Map(map) => copy_map_field(dir, value, map, name)?,
        FieldClass::Plain => {
            let is_array = value.array_len().is_some();
            copy_value(dir, value, is_array, false, None, name)?
        }
    };

    Ok(Some(copied))
}

/// Copies a single value according to its element flags.
///
/// `ctor` is only consulted when `is_serializable` is set.
fn copy_value<D: Direction>(
    dir: &D,
    value: D::Source,
    is_array: bool,
    is_serializable: bool,
    ctor: Option<Constructor>,
    field: &'static str,
) -> Result<D::Target, SerialError> {
    if value.is_null() {
        return Ok(D::Target::null());
    }

    let ctor = match (is_serializable, ctor) {
        (true, None) => return Err(SerialError::MissingConstructor { field }),
        (true, ctor) => ctor,
        (false, _) => None,
    };

    match (is_array, ctor) {
        (true, Some(ctor)) => value
            .into_array()
            .map_err(mismatch(field, "array"))?
            .into_iter()
            .map(|item| copy_node(dir, item, ctor, field))
            .collect::<Result<Vec<_>, _>>()
            .map(D::Target::from_array),
        (true, None) => value
            .into_array()
            .map_err(mismatch(field, "array"))?
            .into_iter()
            .map(|item| copy_plain::<D>(item, field))
            .collect::<Result<Vec<_>, _>>()
            .map(D::Target::from_array),
        (false, Some(ctor)) => copy_node(dir, value, ctor, field),
        (false, None) => copy_plain::<D>(value, field),
    }
}

/// Copies a value with no domain objects inside.
fn copy_plain<D: Direction>(
    value: D::Source,
    field: &'static str,
) -> Result<D::Target, SerialError> {
    if value.is_null() {
        return Ok(D::Target::null());
    }

    value
        .into_plain()
        .map(D::Target::from_plain)
        .map_err(mismatch(field, "plain value"))
}

/// Copies a nested domain object into a node made by `ctor`.
fn copy_node<D: Direction>(
    dir: &D,
    value: D::Source,
    ctor: Constructor,
    field: &'static str,
) -> Result<D::Target, SerialError> {
    if value.is_null() {
        return Ok(D::Target::null());
    }

    let node = value.into_node().map_err(mismatch(field, "object"))?;
    let target = dir.make(ctor);

    deep_copy(dir, node, target).map(D::Target::from_node)
}

fn copy_map_field<D: Direction>(
    dir: &D,
    value: D::Source,
    map: &MapField,
    field: &'static str,
) -> Result<D::Target, SerialError> {
    if !map.is_property_array() {
        return copy_map(dir, value, map, field);
    }

    value
        .into_array()
        .map_err(mismatch(field, "array of maps"))?
        .into_iter()
        .map(|item| {
            if item.is_null() {
                Ok(D::Target::null())
            } else {
                copy_map(dir, item, map, field)
            }
        })
        .collect::<Result<Vec<_>, _>>()
        .map(D::Target::from_array)
}

fn copy_map<D: Direction>(
    dir: &D,
    value: D::Source,
    map: &MapField,
    field: &'static str,
) -> Result<D::Target, SerialError> {
    let entries = value.into_entries().map_err(mismatch(field, "map"))?;

    let mut copied: Vec<(String, D::Target)> = Vec::with_capacity(entries.len());
    for (key, value) in entries {
        if value.is_null() {
            continue;
        }

        let value = copy_value(
            dir,
            value,
            map.is_value_array(),
            map.is_serializable(),
            map.element(),
            field,
        )?;
        copied.push((key, value));
    }

    Ok(D::Target::from_entries(copied))
}

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::collections::BTreeMap;
    use alloc::string::ToString;
    use core::any::Any;
    use serde_json::json;

    use super::{Direction, SourceNode, TargetNode, deep_copy};
    use crate::fixtures::ValueNode;
    use crate::info::{MapField, Metadata};
    use crate::object::{Constructor, construct};
    use crate::ops::SerialError;
    use crate::value::{Json, JsonMap};
    use crate::{Serializable, Value, deep_equals, deserialize_with, serialize};

    /// Copies wire objects into wire objects; neither side has metadata.
    struct WireToWire;

    impl Direction for WireToWire {
        type Source = Json;
        type Target = Json;

        fn get(&self, name: &'static str, node: &mut SourceNode<Self>) -> Option<Json> {
            node.remove(name)
        }

        fn set(
            &self,
            name: &'static str,
            node: &mut TargetNode<Self>,
            value: Json,
        ) -> Result<(), SerialError> {
            node.insert(name.to_string(), value);
            Ok(())
        }

        fn make(&self, _: Constructor) -> JsonMap {
            JsonMap::new()
        }
    }

    #[test]
    fn missing_metadata() {
        let mut source = JsonMap::new();
        source.insert("id".to_string(), json!("B1"));

        assert!(matches!(
            deep_copy(&WireToWire, source, JsonMap::new()),
            Err(SerialError::MissingMetadata)
        ));
    }

    /// Its map field is declared serializable without an element type.
    #[derive(Clone, Debug, Default)]
    struct Untyped {
        values: Option<Value>,
    }

    static UNTYPED_MAPS: [(&str, MapField); 1] = [("values", MapField::new(None, false, true))];
    static UNTYPED: Metadata = Metadata::new("Untyped", &["values"]).with_maps(&UNTYPED_MAPS);

    impl Serializable for Untyped {
        fn metadata(&self) -> &'static Metadata {
            &UNTYPED
        }

        fn constructor(&self) -> Constructor {
            construct::<Untyped>
        }

        fn get(&self, name: &str) -> Option<Value> {
            (name == "values").then(|| self.values.clone()).flatten()
        }

        fn take(&mut self, name: &str) -> Option<Value> {
            (name == "values").then(|| self.values.take()).flatten()
        }

        fn set(&mut self, name: &str, value: Option<Value>) -> Result<(), SerialError> {
            if name != "values" {
                return Err(SerialError::UnknownField {
                    type_name: "Untyped",
                    field: name.to_string(),
                });
            }
            self.values = value;
            Ok(())
        }

        fn has(&self, name: &str) -> bool {
            name == "values" && self.values.is_some()
        }

        fn clone_boxed(&self) -> Box<dyn Serializable> {
            Box::new(self.clone())
        }

        fn as_any(&self) -> &dyn Any {
            self
        }

        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }

        fn into_any(self: Box<Self>) -> Box<dyn Any> {
            self
        }
    }

    #[test]
    fn missing_constructor() {
        let node = ValueNode { integer_value: Some("1".to_string()), ..Default::default() };

        let mut entries = BTreeMap::new();
        entries.insert("a".to_string(), Value::Object(Box::new(node)));
        let obj = Untyped { values: Some(Value::Map(entries)) };

        let err = serialize(&obj).unwrap_err();
        assert!(matches!(
            err.root_cause(),
            SerialError::MissingConstructor { field: "values" }
        ));
    }

    #[test]
    fn missing_constructor_on_read() {
        let Err(err) = deserialize_with(construct::<Untyped>, json!({ "values": { "a": {} } })) else {
            panic!("an untyped map of objects cannot be read");
        };
        assert!(matches!(
            err.root_cause(),
            SerialError::MissingConstructor { field: "values" }
        ));
    }

    #[test]
    fn null_entries_skip_the_constructor() {
        let mut entries = BTreeMap::new();
        entries.insert("a".to_string(), Value::Null);
        let obj = Untyped { values: Some(Value::Map(entries)) };

        assert_eq!(serialize(&obj).unwrap(), json!({ "values": {} }));
        assert!(deep_equals(&obj, &Untyped { values: Some(Value::Map(BTreeMap::new())) }));
    }
}
