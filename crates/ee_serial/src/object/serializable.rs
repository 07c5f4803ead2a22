use alloc::boxed::Box;
use core::any::Any;
use core::fmt::Debug;

use crate::info::Metadata;
use crate::ops::SerialError;
use crate::value::Value;

/// Produces an empty instance of a domain type.
///
/// Stored in [`Metadata`] for nested fields, so the engine can materialize
/// children without knowing their concrete type.
pub type Constructor = fn() -> Box<dyn Serializable>;

/// The [`Constructor`] of `T`.
///
/// ```
/// use ee_serial::{Constructor, Serializable, construct};
///
/// #[derive(Serializable, Clone, Default, Debug)]
/// struct Band {
///     id: Option<String>,
/// }
///
/// let ctor: Constructor = construct::<Band>;
/// assert!(!ctor().has("id"));
/// ```
#[inline]
pub fn construct<T: Serializable + Default>() -> Box<dyn Serializable> {
    Box::new(T::default())
}

// -----------------------------------------------------------------------------
// Serializable

/// A domain object: a type whose declared fields can be read and written by
/// wire name.
///
/// Field presence is `Option`-shaped. An accessor returning `None` means the
/// field is absent; [`Value::Null`] means it holds the Null Sentinel.
///
/// Accessors never materialize defaults: reading a field has no effect on
/// [`has`](Self::has) or on later comparisons.
///
/// # Implementation
///
/// Use the [derive macro](crate::derive::Serializable). Hand-written
/// implementations must keep `get`, `take`, `set` and `has` consistent with
/// the names in [`metadata`](Self::metadata).
pub trait Serializable: Any + Debug + Send + Sync {
    /// The static description of this object's type.
    fn metadata(&self) -> &'static Metadata;

    /// Builds an empty instance of this object's type.
    fn constructor(&self) -> Constructor;

    /// Returns a copy of the field's value, or `None` if absent.
    fn get(&self, name: &str) -> Option<Value>;

    /// Moves the field's value out, leaving it absent.
    fn take(&mut self, name: &str) -> Option<Value>;

    /// Sets the field, or clears it when `value` is `None`.
    ///
    /// Fails for undeclared names and for values the field cannot hold.
    fn set(&mut self, name: &str, value: Option<Value>) -> Result<(), SerialError>;

    /// Returns `true` if the field currently holds a value.
    fn has(&self, name: &str) -> bool;

    /// Clones the object behind a fresh box.
    fn clone_boxed(&self) -> Box<dyn Serializable>;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;

    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}

impl dyn Serializable {
    /// Returns `true` if the underlying value is of type `T`.
    #[inline]
    pub fn is<T: Serializable>(&self) -> bool {
        self.as_any().is::<T>()
    }

    #[inline]
    pub fn downcast_ref<T: Serializable>(&self) -> Option<&T> {
        self.as_any().downcast_ref()
    }

    #[inline]
    pub fn downcast_mut<T: Serializable>(&mut self) -> Option<&mut T> {
        self.as_any_mut().downcast_mut()
    }

    /// Downcasts the box, giving it back unchanged on failure.
    pub fn downcast<T: Serializable>(self: Box<Self>) -> Result<Box<T>, Box<dyn Serializable>> {
        if self.is::<T>() {
            match self.into_any().downcast::<T>() {
                Ok(value) => Ok(value),
                // `is` was checked above.
                Err(_) => unreachable!(),
            }
        } else {
            Err(self)
        }
    }
}

impl Clone for Box<dyn Serializable> {
    #[inline]
    fn clone(&self) -> Self {
        self.clone_boxed()
    }
}

// -----------------------------------------------------------------------------
// Typed

/// A statically known domain type.
pub trait Typed: Serializable + Default + Clone {
    /// The metadata shared by every instance of `Self`.
    fn class_metadata() -> &'static Metadata;
}

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::string::ToString;
    use serde_json::json;

    use super::{Serializable, Typed};
    use crate::SerialError;
    use crate::fixtures::{Band, ValueNode};
    use crate::value::Value;

    #[test]
    fn accessors_follow_presence() {
        let mut band = Band::default();
        assert!(!band.has("id"));
        assert!(band.get("id").is_none());
        // reading never materializes a field
        assert!(!band.has("id"));

        band.set("id", Some(Value::from(json!("B1")))).unwrap();
        assert!(band.has("id"));
        assert_eq!(band.id.as_deref(), Some("B1"));

        band.set("id", None).unwrap();
        assert!(!band.has("id"));
    }

    #[test]
    fn take_leaves_field_absent() {
        let mut node = ValueNode { integer_value: Some("1".to_string()), ..Default::default() };
        let taken = node.take("integerValue").unwrap();
        assert_eq!(taken.into_plain().unwrap(), json!("1"));
        assert!(!node.has("integerValue"));
    }

    #[test]
    fn set_rejects_unknown_and_ill_typed() {
        let mut band = Band::default();
        assert!(matches!(
            band.set("nope", Some(Value::Null)),
            Err(SerialError::UnknownField { .. })
        ));
        assert!(matches!(
            band.set("id", Some(Value::from(json!({"a": 1})))),
            Err(SerialError::InvalidValue { field: "id", .. })
        ));
    }

    #[test]
    fn downcast_dyn() {
        let boxed: Box<dyn Serializable> = Box::new(Band::default());
        assert!(boxed.is::<Band>());
        assert_eq!(boxed.metadata().type_name(), Band::class_metadata().type_name());

        let boxed = boxed.downcast::<ValueNode>().unwrap_err();
        assert!(boxed.downcast::<Band>().is_ok());
    }
}
