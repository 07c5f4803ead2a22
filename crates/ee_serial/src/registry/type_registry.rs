use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use alloc::string::ToString;
use core::any::TypeId;

use log::warn;

use crate::info::Metadata;
use crate::object::{Constructor, Serializable, Typed, construct};
use crate::ops::SerialError;
use crate::serde::deserialize_with;
use crate::value::Json;

// -----------------------------------------------------------------------------
// TypeRegistration

/// A registered domain type: its metadata and constructor.
#[derive(Clone, Copy, Debug)]
pub struct TypeRegistration {
    metadata: &'static Metadata,
    constructor: Constructor,
    type_id: TypeId,
}

impl TypeRegistration {
    /// The registration of `T`.
    #[inline]
    pub fn of<T: Typed>() -> Self {
        Self {
            metadata: T::class_metadata(),
            constructor: construct::<T>,
            type_id: TypeId::of::<T>(),
        }
    }

    #[inline]
    pub const fn metadata(&self) -> &'static Metadata {
        self.metadata
    }

    #[inline]
    pub const fn constructor(&self) -> Constructor {
        self.constructor
    }

    #[inline]
    pub const fn type_id(&self) -> TypeId {
        self.type_id
    }

    #[inline]
    pub const fn type_name(&self) -> &'static str {
        self.metadata.type_name()
    }
}

// -----------------------------------------------------------------------------
// TypeRegistry

/// A registry of domain types, keyed by [`Metadata::type_name`].
///
/// Used when a wire object arrives whose type is named at runtime.
///
/// # Examples
///
/// ```
/// use ee_serial::Serializable;
/// use ee_serial::registry::TypeRegistry;
/// use serde_json::json;
///
/// #[derive(Serializable, Clone, Default, Debug)]
/// struct Band {
///     id: Option<String>,
/// }
///
/// let mut registry = TypeRegistry::new();
/// registry.register::<Band>();
///
/// let band = registry.deserialize_named("Band", json!({ "id": "B1" })).unwrap();
/// assert!(band.has("id"));
/// assert!(registry.deserialize_named("Image", json!({})).is_err());
/// ```
#[derive(Clone, Debug, Default)]
pub struct TypeRegistry {
    types: BTreeMap<&'static str, TypeRegistration>,
}

impl TypeRegistry {
    /// Create an empty [`TypeRegistry`].
    #[inline]
    pub const fn new() -> Self {
        Self {
            types: BTreeMap::new(),
        }
    }

    /// Registers `T`.
    ///
    /// Returns `false` if nothing was added. See [`add`](Self::add).
    #[inline]
    pub fn register<T: Typed>(&mut self) -> bool {
        self.add(TypeRegistration::of::<T>())
    }

    /// Adds a registration.
    ///
    /// Registering a type again does nothing. Invalid metadata, or a name
    /// already taken by a different type, is logged and skipped; the first
    /// registration of a name wins.
    pub fn add(&mut self, registration: TypeRegistration) -> bool {
        let name = registration.type_name();

        if let Err(err) = registration.metadata().validate() {
            warn!("not registering `{name}`: {err}");
            return false;
        }

        match self.types.get(name) {
            Some(existing) if existing.type_id() == registration.type_id() => false,
            Some(_) => {
                warn!("type name `{name}` is already registered by another type");
                false
            }
            None => {
                self.types.insert(name, registration);
                true
            }
        }
    }

    /// Registers every type derived with `#[serial(auto_register)]`.
    ///
    /// Equivalent to calling [`register`](Self::register) for each of them;
    /// repeated calls add nothing. Returns how many types were added.
    ///
    /// Without the `auto_register` feature this does nothing and returns `0`.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use ee_serial::Serializable;
    /// use ee_serial::registry::TypeRegistry;
    ///
    /// #[derive(Serializable, Clone, Default, Debug)]
    /// #[serial(auto_register)]
    /// struct Band {
    ///     id: Option<String>,
    /// }
    ///
    /// let mut registry = TypeRegistry::new();
    /// registry.auto_register();
    /// assert!(registry.contains("Band"));
    /// ```
    #[cfg_attr(not(feature = "auto_register"), inline(always))]
    pub fn auto_register(&mut self) -> usize {
        #[cfg(feature = "auto_register")]
        {
            let mut added = 0;
            for entry in super::auto_register::iter() {
                let registration = TypeRegistration {
                    metadata: (entry.metadata)(),
                    constructor: entry.constructor,
                    type_id: (entry.type_id)(),
                };
                if self.add(registration) {
                    added += 1;
                }
            }
            added
        }
        #[cfg(not(feature = "auto_register"))]
        {
            0
        }
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    #[inline]
    pub fn get(&self, name: &str) -> Option<&TypeRegistration> {
        self.types.get(name)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Iterates registrations in name order.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &TypeRegistration> {
        self.types.values()
    }

    /// Deserializes `raw` as the type registered under `name`.
    ///
    /// # Errors
    ///
    /// [`SerialError::UnknownType`] if nothing is registered under `name`,
    /// otherwise any error of [`deserialize_with`].
    pub fn deserialize_named(
        &self,
        name: &str,
        raw: Json,
    ) -> Result<Box<dyn Serializable>, SerialError> {
        let registration = self.get(name).ok_or_else(|| SerialError::UnknownType {
            name: name.to_string(),
        })?;

        deserialize_with(registration.constructor(), raw)
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;
    use core::any::TypeId;
    use serde_json::json;

    use super::{TypeRegistration, TypeRegistry};
    use crate::fixtures::{Band, Expression, Image, ValueNode};
    use crate::info::Metadata;
    use crate::object::{Constructor, construct};
    use crate::{SerialError, Serializable};

    #[test]
    fn register_once() {
        let mut registry = TypeRegistry::new();
        assert!(registry.register::<Band>());
        assert!(!registry.register::<Band>());
        assert!(registry.register::<Image>());

        assert_eq!(registry.len(), 2);
        let names: Vec<_> = registry.iter().map(TypeRegistration::type_name).collect();
        assert_eq!(names, ["Band", "Image"]);
    }

    #[test]
    fn invalid_metadata_is_skipped() {
        static OBJECTS: [(&str, Constructor); 1] = [("missing", construct::<ValueNode>)];
        static BROKEN: Metadata = Metadata::new("Band", &["id"]).with_objects(&OBJECTS);

        let registration = TypeRegistration {
            metadata: &BROKEN,
            ..TypeRegistration::of::<Band>()
        };

        let mut registry = TypeRegistry::new();
        assert!(!registry.add(registration));
        assert!(registry.is_empty());
    }

    #[test]
    fn name_clash_keeps_first() {
        let clash = TypeRegistration {
            metadata: Band::default().metadata(),
            ..TypeRegistration::of::<ValueNode>()
        };

        let mut registry = TypeRegistry::new();
        registry.register::<Band>();
        assert!(!registry.add(clash));
        let kept = registry.get("Band").map(TypeRegistration::type_id);
        assert_eq!(kept, Some(TypeId::of::<Band>()));
    }

    #[test]
    fn deserialize_by_name() {
        let mut registry = TypeRegistry::new();
        registry.register::<Expression>();

        let raw = json!({ "values": { "a": { "integerValue": "1" } }, "result": "a" });
        let expr = registry.deserialize_named("Expression", raw).unwrap();
        assert!(expr.is::<Expression>());
        assert!(expr.has("values"));

        assert!(matches!(
            registry.deserialize_named("Missing", json!({})),
            Err(SerialError::UnknownType { .. })
        ));
    }

    #[cfg(feature = "auto_register")]
    #[test]
    fn auto_register_collects_fixtures() {
        let mut registry = TypeRegistry::new();
        let added = registry.auto_register();

        assert!(registry.contains("Expression"));
        assert!(registry.contains("ValueNode"));
        assert!(added >= 2);
        assert_eq!(registry.auto_register(), 0);
    }
}
