//! Lookup of domain types by name.
//!
//! ## Menu
//!
//! - [`TypeRegistry`]: maps type names to their metadata and constructor, so a
//!   wire object can be deserialized when its type is only known at runtime.
//! - [`TypeRegistration`]: one registered type.
//!
//! ## auto_register
//!
//! See [`TypeRegistry::auto_register`].
//!
//! Types derived with `#[serial(auto_register)]` are collected at link time
//! with the [`inventory`] crate. Not all platforms support it, although the
//! major ones do; elsewhere nothing is collected and no error is raised.
//!
//! [`inventory`]: https://docs.rs/inventory

// -----------------------------------------------------------------------------
// Modules

#[cfg(feature = "auto_register")]
mod auto_register;
mod type_registry;

// -----------------------------------------------------------------------------
// Exports

#[cfg(feature = "auto_register")]
pub use auto_register::AutoRegistration;
pub use type_registry::{TypeRegistration, TypeRegistry};
