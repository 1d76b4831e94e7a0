//! Public API for errval error values
//!
//! This crate re-exports the core error value type and adds the pieces
//! needed to define error values outside of code: a registry of named
//! types, a builder, and (with the `serde` feature) JSON/TOML definitions.

#![warn(missing_docs)]

pub mod builder;
#[cfg(feature = "serde")]
pub mod definition;
pub mod error;
pub mod registry;

// Re-export key types
pub use builder::{builder, ErrorValueBuilder};
#[cfg(feature = "serde")]
pub use definition::{Catalog, Definition};
pub use error::{ApiError, Result};
pub use errval_core::{
    guard, intercept, ContractError, ErrorValue, ExpectationTable, Guarded, Raised, Substitute,
    Trigger, TypeSet, TypeTag,
};
pub use registry::TypeRegistry;

// Convenience functions

/// Load an error value from a TOML document using the primitive registry
#[cfg(feature = "serde")]
pub fn from_toml_str(toml_str: &str) -> Result<ErrorValue> {
    definition::from_toml_str(toml_str, &default_registry())
}

/// Load an error value from a JSON document using the primitive registry
#[cfg(feature = "serde")]
pub fn from_json_str(json: &str) -> Result<ErrorValue> {
    definition::from_json_str(json, &default_registry())
}

/// Registry of primitive types plus the standard library's parse and
/// formatting errors
pub fn default_registry() -> TypeRegistry {
    let mut registry = TypeRegistry::with_primitives();
    registry
        .register_error::<std::num::ParseIntError>()
        .register_error::<std::num::ParseFloatError>()
        .register_error::<std::num::TryFromIntError>()
        .register_error::<std::str::ParseBoolError>()
        .register_error::<std::char::ParseCharError>()
        .register_error::<std::string::FromUtf8Error>()
        .register_as("fmt::Error", TypeTag::error::<std::fmt::Error>())
        .register_as("io::Error", TypeTag::error::<std::io::Error>());
    registry
}
