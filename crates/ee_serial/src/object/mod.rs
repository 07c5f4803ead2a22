//! The domain object contract.

mod serializable;

pub use serializable::{Constructor, Serializable, Typed, construct};
