//! Named type registry
//!
//! Declarative definitions refer to types by name. The registry maps those
//! names to [`TypeTag`]s.

use crate::error::{ApiError, Result};
use errval_core::TypeTag;
use std::any::Any;
use std::collections::HashMap;

/// Lookup table from names to type descriptors
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    types: HashMap<String, TypeTag>,
}

impl TypeRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the primitive and string types
    pub fn with_primitives() -> Self {
        let mut registry = Self::new();
        registry
            .register::<i8>()
            .register::<i16>()
            .register::<i32>()
            .register::<i64>()
            .register::<i128>()
            .register::<isize>()
            .register::<u8>()
            .register::<u16>()
            .register::<u32>()
            .register::<u64>()
            .register::<u128>()
            .register::<usize>()
            .register::<f32>()
            .register::<f64>()
            .register::<bool>()
            .register::<char>()
            .register::<String>()
            .register::<&'static str>()
            .register::<()>();
        registry
    }

    /// Register `T` under its short name
    pub fn register<T: Any>(&mut self) -> &mut Self {
        self.insert(TypeTag::of::<T>())
    }

    /// Register the error type `E` under its short name
    pub fn register_error<E: std::error::Error + 'static>(&mut self) -> &mut Self {
        self.insert(TypeTag::error::<E>())
    }

    /// Register `tag` under an explicit name
    pub fn register_as(&mut self, name: impl Into<String>, tag: TypeTag) -> &mut Self {
        self.types.insert(name.into(), tag);
        self
    }

    fn insert(&mut self, tag: TypeTag) -> &mut Self {
        self.register_as(tag.name(), tag)
    }

    /// Look up a name
    pub fn get(&self, name: &str) -> Option<TypeTag> {
        self.types.get(name).copied()
    }

    /// Look up a name, failing with [`ApiError::UnknownType`]
    pub fn resolve(&self, name: &str) -> Result<TypeTag> {
        self.get(name).ok_or_else(|| ApiError::UnknownType {
            name: name.to_string(),
        })
    }

    /// A name under which `tag` is registered
    ///
    /// Prefers the type's own short name when several aliases exist.
    pub fn name_of(&self, tag: TypeTag) -> Option<&str> {
        let short = tag.name();
        if let Some((name, _)) = self
            .types
            .get_key_value(&*short)
            .filter(|(_, registered)| **registered == tag)
        {
            return Some(name.as_str());
        }
        let mut aliases: Vec<&str> = self
            .types
            .iter()
            .filter(|(_, registered)| **registered == tag)
            .map(|(name, _)| name.as_str())
            .collect();
        aliases.sort_unstable();
        aliases.into_iter().next()
    }

    /// Number of registered names
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Whether nothing is registered
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}
