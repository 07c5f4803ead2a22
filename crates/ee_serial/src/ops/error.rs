use alloc::boxed::Box;
use alloc::string::String;

use thiserror::Error;

use crate::value::ValueError;

/// An error raised while copying, comparing or converting domain objects.
///
/// Every variant names the contract that was violated. A failed operation
/// never hands back a partially filled object.
#[derive(Debug, Error)]
pub enum SerialError {
    /// Neither side of a copy carries [`Metadata`](crate::info::Metadata).
    #[error("cannot find metadata on either side of the copy")]
    MissingMetadata,
    /// A field declared as a nested domain type has no constructor.
    #[error("cannot deserialize `{field}` without a constructor")]
    MissingConstructor { field: &'static str },
    /// The value found does not fit the field's declared classification.
    #[error("field `{field}`: expected {expected}, found {found}")]
    Mismatch {
        field: &'static str,
        expected: &'static str,
        found: &'static str,
    },
    /// An accessor was called with a name the type does not declare.
    #[error("`{type_name}` has no field named `{field}`")]
    UnknownField {
        type_name: &'static str,
        field: String,
    },
    /// A value could not be converted into the field's Rust type.
    #[error("invalid value for `{type_name}.{field}`: {source}")]
    InvalidValue {
        type_name: &'static str,
        field: &'static str,
        source: ValueError,
    },
    /// Two compared objects declare different fields.
    #[error("cannot compare `{left}` with `{right}`: declared fields differ")]
    ShapeMismatch {
        left: &'static str,
        right: &'static str,
    },
    /// A domain object was deserialized from something other than an object.
    #[error("expected a wire object, found {found}")]
    NotAnObject { found: &'static str },
    /// The registry has no type of that name.
    #[error("no type named `{name}` is registered")]
    UnknownType { name: String },
    /// Metadata breaks its own classification rules.
    #[error("invalid metadata for `{type_name}.{field}`: {reason}")]
    InvalidMetadata {
        type_name: &'static str,
        field: &'static str,
        reason: &'static str,
    },
    #[error(transparent)]
    Json(#[from] ::serde_json::Error),
    /// A nested failure together with the field path leading to it.
    #[error("{source} (at {path})")]
    Traced {
        path: String,
        source: Box<SerialError>,
    },
}

impl SerialError {
    /// The error without any field path attached.
    pub fn root_cause(&self) -> &SerialError {
        match self {
            SerialError::Traced { source, .. } => source.root_cause(),
            other => other,
        }
    }
}
