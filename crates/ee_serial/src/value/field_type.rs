use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;
use core::any::type_name;

use log::warn;

use crate::Serializable;
use crate::value::{Json, Nullable, Value, ValueError};

/// Conversion between a typed struct field and a dynamic [`Value`].
///
/// The derive macro calls these from the generated accessors: `to_value` for
/// `get`, `into_value` for `take` and `from_value` for `set`. Setting a field
/// to null goes through [`from_null`](Self::from_null) instead.
///
/// Implemented for scalars, [`Json`], `Vec<T>`, `BTreeMap<String, T>`,
/// `Box<T>`, [`Nullable<T>`] and every derived domain type.
///
/// JSON has no NaN or infinity. A non-finite `f32` or `f64` converts to
/// null, so it is written as `null` and reads back as absent. The
/// conversion logs a warning.
pub trait FieldType: Sized {
    fn to_value(&self) -> Value;

    fn into_value(self) -> Value;

    fn from_value(value: Value) -> Result<Self, ValueError>;

    /// The value a field of this type takes when set to null.
    ///
    /// `None` clears the field. Only types that can represent null, such as
    /// [`Nullable`] and [`Json`], return a value.
    #[inline]
    fn from_null() -> Option<Self> {
        None
    }
}

/// Recovers a concrete domain type from a [`Value::Object`].
///
/// Used by derived [`FieldType`] implementations.
pub fn downcast_object<T: Serializable>(value: Value) -> Result<T, ValueError> {
    match value {
        Value::Object(obj) => {
            let found = obj.metadata().type_name();
            obj.into_any()
                .downcast::<T>()
                .map(|obj| *obj)
                .map_err(|_| ValueError::mismatch(type_name::<T>(), found))
        }
        other => Err(ValueError::mismatch("domain object", other.kind_name())),
    }
}

// -----------------------------------------------------------------------------
// Scalars

macro_rules! impl_scalar {
    ($($ty:ty),* $(,)?) => {$(
        impl FieldType for $ty {
            #[inline]
            fn to_value(&self) -> Value {
                Value::Plain(Json::from(self.clone()))
            }

            #[inline]
            fn into_value(self) -> Value {
                Value::Plain(Json::from(self))
            }

            fn from_value(value: Value) -> Result<Self, ValueError> {
                match value {
                    Value::Plain(json) => Ok(::serde_json::from_value(json)?),
                    other => Err(ValueError::mismatch(type_name::<$ty>(), other.kind_name())),
                }
            }
        }
    )*};
}

impl_scalar!(bool, String, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

macro_rules! impl_float {
    ($($ty:ty),* $(,)?) => {$(
        impl FieldType for $ty {
            #[inline]
            fn to_value(&self) -> Value {
                (*self).into_value()
            }

            fn into_value(self) -> Value {
                if !self.is_finite() {
                    warn!("`{}` value {self} has no JSON form, converted to null", type_name::<$ty>());
                }
                Value::Plain(Json::from(self))
            }

            fn from_value(value: Value) -> Result<Self, ValueError> {
                match value {
                    Value::Plain(json) => Ok(::serde_json::from_value(json)?),
                    other => Err(ValueError::mismatch(type_name::<$ty>(), other.kind_name())),
                }
            }
        }
    )*};
}

impl_float!(f32, f64);

impl FieldType for Json {
    #[inline]
    fn to_value(&self) -> Value {
        Value::Plain(self.clone())
    }

    #[inline]
    fn into_value(self) -> Value {
        Value::Plain(self)
    }

    #[inline]
    fn from_value(value: Value) -> Result<Self, ValueError> {
        value.into_plain()
    }

    #[inline]
    fn from_null() -> Option<Self> {
        Some(Json::Null)
    }
}

// -----------------------------------------------------------------------------
// Containers

impl<T: FieldType> FieldType for Box<T> {
    #[inline]
    fn to_value(&self) -> Value {
        T::to_value(self)
    }

    #[inline]
    fn into_value(self) -> Value {
        T::into_value(*self)
    }

    #[inline]
    fn from_value(value: Value) -> Result<Self, ValueError> {
        T::from_value(value).map(Box::new)
    }

    #[inline]
    fn from_null() -> Option<Self> {
        T::from_null().map(Box::new)
    }
}

impl<T: FieldType> FieldType for Vec<T> {
    fn to_value(&self) -> Value {
        Value::Array(self.iter().map(T::to_value).collect())
    }

    fn into_value(self) -> Value {
        Value::Array(self.into_iter().map(T::into_value).collect())
    }

    fn from_value(value: Value) -> Result<Self, ValueError> {
        match value {
            Value::Array(items) => items.into_iter().map(T::from_value).collect(),
            Value::Plain(Json::Array(items)) => items
                .into_iter()
                .map(|item| T::from_value(Value::Plain(item)))
                .collect(),
            other => Err(ValueError::mismatch("array", other.kind_name())),
        }
    }
}

impl<T: FieldType> FieldType for BTreeMap<String, T> {
    fn to_value(&self) -> Value {
        Value::Map(
            self.iter()
                .map(|(key, value)| (key.clone(), value.to_value()))
                .collect(),
        )
    }

    fn into_value(self) -> Value {
        Value::Map(
            self.into_iter()
                .map(|(key, value)| (key, value.into_value()))
                .collect(),
        )
    }

    fn from_value(value: Value) -> Result<Self, ValueError> {
        match value {
            Value::Map(entries) => entries
                .into_iter()
                .map(|(key, value)| Ok((key, T::from_value(value)?)))
                .collect(),
            Value::Plain(Json::Object(entries)) => entries
                .into_iter()
                .map(|(key, value)| Ok((key, T::from_value(Value::Plain(value))?)))
                .collect(),
            other => Err(ValueError::mismatch("map", other.kind_name())),
        }
    }
}

impl<T: FieldType> FieldType for Nullable<T> {
    fn to_value(&self) -> Value {
        match self {
            Nullable::Null => Value::Null,
            Nullable::Value(v) => v.to_value(),
        }
    }

    fn into_value(self) -> Value {
        match self {
            Nullable::Null => Value::Null,
            Nullable::Value(v) => v.into_value(),
        }
    }

    fn from_value(value: Value) -> Result<Self, ValueError> {
        match value {
            Value::Null | Value::Plain(Json::Null) => Ok(Nullable::Null),
            other => T::from_value(other).map(Nullable::Value),
        }
    }

    #[inline]
    fn from_null() -> Option<Self> {
        Some(Nullable::Null)
    }
}
