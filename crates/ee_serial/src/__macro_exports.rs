//! Items referenced by code the derive macro emits. Not public API.

pub use alloc::boxed::Box;
pub use alloc::string::{String, ToString};
pub use core::any::Any;
pub use core::option::Option::{self, None, Some};
pub use core::result::Result::{self, Err, Ok};

pub use crate::info::{MapField, Metadata, PartialMetadata};
pub use crate::object::{Constructor, Serializable, Typed, construct};
pub use crate::ops::SerialError;
pub use crate::value::{FieldType, Json, Value, ValueError, downcast_object};

#[cfg(feature = "auto_register")]
pub mod auto_register {
    pub use crate::registry::AutoRegistration;
    pub use inventory;
}
