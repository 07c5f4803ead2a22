use core::any::TypeId;

use crate::info::Metadata;
use crate::object::{Constructor, Typed, construct};

/// A type submitted for automatic registration.
///
/// Emitted by the derive macro for `#[serial(auto_register)]` types and
/// collected by [`TypeRegistry::auto_register`].
///
/// [`TypeRegistry::auto_register`]: crate::registry::TypeRegistry::auto_register
pub struct AutoRegistration {
    pub(crate) metadata: fn() -> &'static Metadata,
    pub(crate) constructor: Constructor,
    pub(crate) type_id: fn() -> TypeId,
}

impl AutoRegistration {
    /// The registration of `T`.
    #[inline]
    pub const fn of<T: Typed>() -> Self {
        Self {
            metadata: T::class_metadata,
            constructor: construct::<T>,
            type_id: TypeId::of::<T>,
        }
    }
}

inventory::collect!(AutoRegistration);

#[inline]
pub(super) fn iter() -> impl Iterator<Item = &'static AutoRegistration> {
    inventory::iter::<AutoRegistration>.into_iter()
}
