//! Domain types shared by the unit tests.

use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;

use crate::Serializable;
use crate::value::{Json, Nullable};

/// A graph of named values with a result reference.
#[derive(Serializable, Clone, Default, Debug, PartialEq)]
#[serial(auto_register)]
pub struct Expression {
    #[serial(map)]
    pub values: Option<BTreeMap<String, ValueNode>>,
    pub result: Option<String>,
}

#[derive(Serializable, Clone, Default, Debug, PartialEq)]
#[serial(auto_register)]
pub struct ValueNode {
    pub integer_value: Option<String>,
    pub constant_value: Option<Json>,
}

#[derive(Serializable, Clone, Default, Debug, PartialEq)]
pub struct Algorithm {
    /// Canonical algorithm name.
    pub name: Option<String>,
    #[serial(array)]
    pub arguments: Option<Vec<AlgorithmArgument>>,
}

#[derive(Serializable, Clone, Default, Debug, PartialEq)]
pub struct AlgorithmArgument {
    pub argument_name: Option<String>,
    pub r#type: Option<String>,
    /// What the argument is for.
    pub description: Option<String>,
}

#[derive(Serializable, Clone, Default, Debug, PartialEq)]
pub struct PixelGrid {
    pub crs_code: Option<String>,
    #[serial(object)]
    pub affine_transform: Option<Nullable<AffineTransform>>,
}

#[derive(Serializable, Clone, Default, Debug, PartialEq)]
pub struct AffineTransform {
    pub scale_x: Option<f64>,
    pub shear_x: Option<f64>,
    pub translate_x: Option<f64>,
    pub shear_y: Option<f64>,
    pub scale_y: Option<f64>,
    pub translate_y: Option<f64>,
}

#[derive(Serializable, Clone, Default, Debug, PartialEq)]
#[serial(empty_array_is_unset)]
pub struct Band {
    pub id: Option<String>,
    #[serial(values("Byte", "Int16", "Float32"))]
    pub data_type: Option<String>,
    pub missing_values: Option<Vec<f64>>,
}

#[derive(Serializable, Clone, Default, Debug, PartialEq)]
pub struct Image {
    pub id: Option<String>,
    #[serial(array)]
    pub bands: Option<Vec<Band>>,
    #[serial(object)]
    pub grid: Option<PixelGrid>,
    #[serial(map(scalar))]
    pub properties: Option<BTreeMap<String, Json>>,
}

/// Tiles kept as a list, as rows of named tiles, and as named groups.
#[derive(Serializable, Clone, Default, Debug, PartialEq)]
#[serial(empty_array_is_unset)]
pub struct Mosaic {
    #[serial(array)]
    pub tiles: Option<Vec<ValueNode>>,
    #[serial(map(property_array))]
    pub rows: Option<Vec<BTreeMap<String, ValueNode>>>,
    #[serial(map(value_array))]
    pub groups: Option<BTreeMap<String, Vec<ValueNode>>>,
}

#[cfg(test)]
mod tests {
    use alloc::collections::BTreeMap;
    use alloc::string::ToString;
    use alloc::vec;
    use serde_json::json;

    use super::{AlgorithmArgument, Band, Expression, Image, Mosaic, ValueNode};
    use crate::info::FieldClass;
    use crate::object::Typed;
    use crate::{deep_equals, deserialize, is_empty, serialize};

    fn node(value: &str) -> ValueNode {
        ValueNode {
            integer_value: Some(value.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn derived_metadata() {
        let band = Band::class_metadata();
        assert_eq!(band.type_name(), "Band");
        assert_eq!(band.fields(), &["id", "dataType", "missingValues"]);
        assert!(band.empty_array_is_unset());
        assert_eq!(band.enum_values("dataType"), Some(&["Byte", "Int16", "Float32"][..]));

        let arg = AlgorithmArgument::class_metadata();
        assert_eq!(arg.fields(), &["argumentName", "type", "description"]);
        assert_eq!(arg.description("description"), Some("What the argument is for."));
        assert_eq!(arg.description("type"), None);

        let image = Image::class_metadata();
        assert_eq!(image.type_name(), "Image");
        assert!(matches!(image.classify("bands"), FieldClass::Array(_)));
        assert!(matches!(image.classify("grid"), FieldClass::Object(_)));
        assert!(matches!(
            image.classify("properties"),
            FieldClass::Map(m) if !m.is_serializable()
        ));
        assert!(image.validate().is_ok());
    }

    #[test]
    fn scalar_map_round_trip() {
        let mut properties = BTreeMap::new();
        properties.insert("cloudCover".to_string(), json!(3.5));
        properties.insert("tags".to_string(), json!(["a", "b"]));

        let image = Image {
            properties: Some(properties),
            ..Default::default()
        };

        let wire = serialize(&image).unwrap();
        assert_eq!(
            wire,
            json!({ "properties": { "cloudCover": 3.5, "tags": ["a", "b"] } }),
        );
        assert_eq!(deserialize::<Image>(wire).unwrap(), image);
    }

    #[test]
    fn property_array_round_trip() {
        let mut first = BTreeMap::new();
        first.insert("a".to_string(), node("1"));
        let mosaic = Mosaic {
            rows: Some(vec![first, BTreeMap::new()]),
            ..Default::default()
        };

        let wire = serialize(&mosaic).unwrap();
        assert_eq!(wire, json!({ "rows": [{ "a": { "integerValue": "1" } }, {}] }));

        let back: Mosaic = deserialize(wire).unwrap();
        assert_eq!(back, mosaic);
        assert!(deep_equals(&back, &mosaic));

        let mut other = mosaic.clone();
        other.rows.as_mut().unwrap()[0].insert("a".to_string(), node("2"));
        assert!(!deep_equals(&other, &mosaic));

        other.rows.as_mut().unwrap().pop();
        assert!(!deep_equals(&other, &mosaic));
    }

    #[test]
    fn value_array_round_trip() {
        let mut groups = BTreeMap::new();
        groups.insert("x".to_string(), vec![node("1"), node("2")]);
        let mosaic = Mosaic {
            groups: Some(groups),
            ..Default::default()
        };

        let wire = serialize(&mosaic).unwrap();
        assert_eq!(
            wire,
            json!({ "groups": { "x": [{ "integerValue": "1" }, { "integerValue": "2" }] } }),
        );

        let back: Mosaic = deserialize(wire).unwrap();
        assert_eq!(back, mosaic);
        assert!(deep_equals(&back, &mosaic));

        let mut reordered = mosaic.clone();
        reordered.groups.as_mut().unwrap().get_mut("x").unwrap().reverse();
        assert!(!deep_equals(&reordered, &mosaic));
    }

    #[test]
    fn empty_object_array_is_unset() {
        let mosaic = Mosaic {
            tiles: Some(vec![]),
            ..Default::default()
        };

        assert_eq!(serialize(&mosaic).unwrap(), json!({}));
        assert!(is_empty(&mosaic).unwrap());
        assert!(deep_equals(&mosaic, &Mosaic::default()));

        let filled = Mosaic {
            tiles: Some(vec![node("1")]),
            ..Default::default()
        };
        assert!(!is_empty(&filled).unwrap());
        assert!(!deep_equals(&filled, &mosaic));
    }

    #[test]
    fn empty_property_array_is_kept() {
        let mosaic = Mosaic {
            rows: Some(vec![]),
            ..Default::default()
        };

        // only arrays of objects and plain arrays are dropped when empty
        assert_eq!(serialize(&mosaic).unwrap(), json!({ "rows": [] }));
        assert!(!is_empty(&mosaic).unwrap());
        assert!(deep_equals(&mosaic, &Mosaic::default()));
    }

    #[test]
    fn null_map_entries_are_dropped() {
        let wire = json!({ "values": { "a": null, "b": { "integerValue": "2" } } });
        let expression: Expression = deserialize(wire).unwrap();

        let mut values = BTreeMap::new();
        values.insert("b".to_string(), node("2"));
        let expected = Expression {
            values: Some(values),
            ..Default::default()
        };

        assert_eq!(expression, expected);
        assert!(deep_equals(&expression, &expected));
        assert_eq!(
            serialize(&expression).unwrap(),
            json!({ "values": { "b": { "integerValue": "2" } } }),
        );
    }
}
