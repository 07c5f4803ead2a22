use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use alloc::string::String;

use log::debug;

use crate::Serializable;
use crate::info::{FieldClass, MapField, Metadata};
use crate::ops::{SerialError, Shape};
use crate::value::Value;

/// Compares two domain objects field by field.
///
/// Objects are compared through their [`Metadata`], not their type: two
/// types declaring the same fields are comparable. A field counts as present
/// if it is set and, when its type has
/// [`empty_array_is_unset`](Metadata::empty_array_is_unset), is not an empty
/// array. Absent on both sides is equal; present on one side only is not.
///
/// Objects declaring different fields compare unequal. Use
/// [`try_deep_equals`] to get an error instead.
///
/// # Examples
///
/// ```
/// use ee_serial::{Serializable, deep_equals};
///
/// #[derive(Serializable, Clone, Default, Debug)]
/// struct PixelGrid {
///     crs_code: Option<String>,
/// }
///
/// let a = PixelGrid { crs_code: Some("EPSG:4326".into()) };
/// let b = PixelGrid { crs_code: Some("EPSG:3857".into()) };
///
/// assert!(deep_equals(&a, &a.clone()));
/// assert!(!deep_equals(&a, &b));
/// ```
pub fn deep_equals(a: &dyn Serializable, b: &dyn Serializable) -> bool {
    match try_deep_equals(a, b) {
        Ok(equal) => equal,
        Err(err) => {
            debug!("deep_equals: {err}; comparing as unequal");
            false
        }
    }
}

/// Like [`deep_equals`], but fails if the objects, or any pair of nested
/// objects, declare different fields.
///
/// # Errors
///
/// [`SerialError::ShapeMismatch`] naming both types.
pub fn try_deep_equals(a: &dyn Serializable, b: &dyn Serializable) -> Result<bool, SerialError> {
    objects_equal(a.clone_boxed(), b.clone_boxed())
}

/// Reads a field the way equality sees it, moving it out of `obj`.
fn present(obj: &mut dyn Serializable, metadata: &Metadata, name: &str) -> Option<Value> {
    if !obj.has(name) {
        return None;
    }

    obj.take(name)
        .filter(|value| !(metadata.empty_array_is_unset() && value.is_empty_array()))
}

fn objects_equal(
    mut a: Box<dyn Serializable>,
    mut b: Box<dyn Serializable>,
) -> Result<bool, SerialError> {
    let (left, right) = (a.metadata(), b.metadata());

    if !left.same_shape(right) {
        return Err(SerialError::ShapeMismatch {
            left: left.type_name(),
            right: right.type_name(),
        });
    }

    for &name in left.fields() {
        let equal = match (present(&mut *a, left, name), present(&mut *b, right, name)) {
            (None, None) => true,
            (Some(x), Some(y)) => fields_equal(left.classify(name), x, y)?,
            _ => false,
        };

        if !equal {
            return Ok(false);
        }
    }

    Ok(true)
}

fn fields_equal(class: FieldClass<'_>, x: Value, y: Value) -> Result<bool, SerialError> {
    match class {
        FieldClass::Array(_) => values_equal(x, y, true, true),
        FieldClass::Object(_) => values_equal(x, y, false, true),
        FieldClass::Map(map) if map.is_property_array() => {
            if x.is_null() || y.is_null() {
                return Ok(x.is_null() && y.is_null());
            }
            let (Ok(xs), Ok(ys)) = (x.into_array(), y.into_array()) else {
                return Ok(false);
            };
            if xs.len() != ys.len() {
                return Ok(false);
            }
            for (x, y) in xs.into_iter().zip(ys) {
                if !maps_equal(x, y, map)? {
                    return Ok(false);
                }
            }
            Ok(true)
        }
        FieldClass::Map(map) => maps_equal(x, y, map),
        FieldClass::Plain => plain_equal(x, y),
    }
}

fn values_equal(
    x: Value,
    y: Value,
    is_array: bool,
    is_serializable: bool,
) -> Result<bool, SerialError> {
    if Shape::is_null(&x) || Shape::is_null(&y) {
        return Ok(Shape::is_null(&x) && Shape::is_null(&y));
    }

    match (is_array, is_serializable) {
        (true, true) => {
            let (Ok(xs), Ok(ys)) = (x.into_array(), y.into_array()) else {
                return Ok(false);
            };
            if xs.len() != ys.len() {
                return Ok(false);
            }
            for (x, y) in xs.into_iter().zip(ys) {
                if !values_equal(x, y, false, true)? {
                    return Ok(false);
                }
            }
            Ok(true)
        }
        (false, true) => match (x.into_node(), y.into_node()) {
            (Ok(x), Ok(y)) => objects_equal(x, y),
            _ => Ok(false),
        },
        (_, false) => plain_equal(x, y),
    }
}

fn maps_equal(x: Value, y: Value, map: &MapField) -> Result<bool, SerialError> {
    if Shape::is_null(&x) || Shape::is_null(&y) {
        return Ok(Shape::is_null(&x) && Shape::is_null(&y));
    }

    // null entries are never copied, so they never take part in equality
    let entries = |value: Value| {
        value.into_entries().map(|entries| {
            entries
                .into_iter()
                .filter(|(_, value)| !Shape::is_null(value))
                .collect::<BTreeMap<String, Value>>()
        })
    };

    let (Ok(xs), Ok(ys)) = (entries(x), entries(y)) else {
        return Ok(false);
    };

    if !xs.keys().eq(ys.keys()) {
        return Ok(false);
    }

    for ((_, x), (_, y)) in xs.into_iter().zip(ys) {
        if !values_equal(x, y, map.is_value_array(), map.is_serializable())? {
            return Ok(false);
        }
    }

    Ok(true)
}

/// Compares values without declared structure: structurally for plain JSON,
/// recursively for domain objects found in plain positions.
fn plain_equal(x: Value, y: Value) -> Result<bool, SerialError> {
    match (x, y) {
        (Value::Object(x), Value::Object(y)) => objects_equal(x, y),
        (Value::Array(xs), Value::Array(ys)) => {
            if xs.len() != ys.len() {
                return Ok(false);
            }
            for (x, y) in xs.into_iter().zip(ys) {
                if !plain_equal(x, y)? {
                    return Ok(false);
                }
            }
            Ok(true)
        }
        (x, y) => match (Value::into_plain(x), Value::into_plain(y)) {
            (Ok(x), Ok(y)) => Ok(x == y),
            _ => Ok(false),
        },
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;
    use alloc::vec;

    use super::{deep_equals, try_deep_equals};
    use crate::SerialError;
    use crate::fixtures::{Algorithm, AlgorithmArgument, Band, Image, PixelGrid, ValueNode};
    use crate::value::Nullable;

    fn grid(crs: &str) -> PixelGrid {
        PixelGrid {
            crs_code: Some(crs.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn nested_scalar_divergence() {
        assert!(deep_equals(&grid("EPSG:4326"), &grid("EPSG:4326")));
        assert!(!deep_equals(&grid("EPSG:4326"), &grid("EPSG:3857")));

        let image = |crs| Image {
            id: Some("I".to_string()),
            grid: Some(grid(crs)),
            ..Default::default()
        };
        assert!(!deep_equals(&image("EPSG:4326"), &image("EPSG:3857")));
    }

    #[test]
    fn presence_must_agree() {
        let mut with_null = grid("EPSG:4326");
        with_null.affine_transform = Some(Nullable::Null);

        assert!(!deep_equals(&with_null, &grid("EPSG:4326")));
        assert!(deep_equals(&with_null, &with_null.clone()));
    }

    #[test]
    fn empty_array_is_unset() {
        let unset = Band { id: Some("B1".to_string()), ..Default::default() };
        let empty = Band { missing_values: Some(vec![]), ..unset.clone() };
        assert!(deep_equals(&unset, &empty));

        // arrays are only ignored when the type says so
        let algorithm = Algorithm { name: Some("add".to_string()), ..Default::default() };
        let no_args = Algorithm { arguments: Some(vec![]), ..algorithm.clone() };
        assert!(!deep_equals(&algorithm, &no_args));
    }

    #[test]
    fn arrays_compare_in_order() {
        let arg = |name: &str| AlgorithmArgument {
            argument_name: Some(name.to_string()),
            ..Default::default()
        };
        let a = Algorithm { arguments: Some(vec![arg("x"), arg("y")]), ..Default::default() };
        let b = Algorithm { arguments: Some(vec![arg("y"), arg("x")]), ..Default::default() };

        assert!(deep_equals(&a, &a.clone()));
        assert!(!deep_equals(&a, &b));
    }

    #[test]
    fn shape_mismatch() {
        let node = ValueNode::default();
        let band = Band::default();

        assert!(!deep_equals(&node, &band));
        assert!(matches!(
            try_deep_equals(&node, &band),
            Err(SerialError::ShapeMismatch { left: "ValueNode", right: "Band" })
        ));
    }
}
