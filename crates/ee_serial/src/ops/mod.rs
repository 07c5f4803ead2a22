//! The generic copy and equality engines.
//!
//! ## Menu
//!
//! - [`deep_copy`]: one traversal over a type's [`Metadata`], parameterized by
//!   a [`Direction`]. Serialization and deserialization are two directions.
//! - [`Shape`]: a value representation a direction reads or writes; implemented
//!   for [`Value`] (domain side) and [`Json`] (wire side).
//! - [`deep_equals`], [`try_deep_equals`]: structural comparison of two domain
//!   objects through the same classification.
//! - [`SerialError`]: every failure the engines report.
//!
//! [`Metadata`]: crate::info::Metadata
//! [`Value`]: crate::Value
//! [`Json`]: crate::Json

// -----------------------------------------------------------------------------
// Modules

mod copy;
mod equals;
mod error;
mod shape;

pub(crate) mod trace;

// -----------------------------------------------------------------------------
// Exports

pub use copy::{Direction, SourceNode, TargetNode, deep_copy};
pub use equals::{deep_equals, try_deep_equals};
pub use error::SerialError;
pub use shape::Shape;
