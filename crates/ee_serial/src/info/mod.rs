//! Static, per-type descriptions of declared fields.
//!
//! ## Menu
//!
//! - [`Metadata`]: the full description attached to a domain type; which fields
//!   exist and how each one is copied and compared.
//! - [`PartialMetadata`]: the subset a type author supplies, completed with
//!   defaults by [`Metadata::from_partial`].
//! - [`MapField`]: descriptor of a string-keyed map field.
//! - [`FieldClass`]: the classification of a single field, as seen by the
//!   copy and equality engines.
//!
//! Metadata is built in `const` context so that it can live in a `static`
//! next to the type it describes. The derive macro emits it; hand-written
//! implementations look like this:
//!
//! ```
//! use ee_serial::info::{Metadata, PartialMetadata};
//!
//! static METADATA: Metadata = Metadata::from_partial(
//!     "Band",
//!     PartialMetadata {
//!         keys: &["id", "missingValues"],
//!         ..PartialMetadata::EMPTY
//!     },
//! );
//!
//! assert_eq!(METADATA.fields(), &["id", "missingValues"]);
//! assert!(METADATA.contains("id"));
//! assert!(!METADATA.empty_array_is_unset());
//! ```

// -----------------------------------------------------------------------------
// Modules

mod map_field;
mod metadata;
mod partial;

// -----------------------------------------------------------------------------
// Exports

pub use map_field::MapField;
pub use metadata::{FieldClass, Metadata};
pub use partial::PartialMetadata;
