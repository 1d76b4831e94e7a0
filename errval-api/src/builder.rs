//! Error value builder

use crate::error::{ApiError, Result};
use errval_core::{ErrorValue, ExpectationTable, TypeTag};
use std::any::Any;

/// Step-by-step construction of an [`ErrorValue`]
#[derive(Debug, Clone, Default)]
pub struct ErrorValueBuilder {
    expectation: ExpectationTable,
    kind: Option<TypeTag>,
    cause: Option<String>,
}

impl ErrorValueBuilder {
    /// Create an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Guard `position` against values of type `T`
    pub fn expect<T: Any>(self, position: usize) -> Self {
        self.expect_tag(position, TypeTag::of::<T>())
    }

    /// Guard `position` against the type described by `tag`
    pub fn expect_tag(mut self, position: usize, tag: TypeTag) -> Self {
        self.expectation.insert(position, [tag]);
        self
    }

    /// Replace the whole expectation table
    pub fn expectation(mut self, expectation: ExpectationTable) -> Self {
        self.expectation = expectation;
        self
    }

    /// Set the error kind to `E`
    pub fn error<E: std::error::Error + 'static>(self) -> Self {
        self.error_tag(TypeTag::error::<E>())
    }

    /// Set the error kind from a descriptor
    pub fn error_tag(mut self, tag: TypeTag) -> Self {
        self.kind = Some(tag);
        self
    }

    /// Set the cause
    pub fn cause(mut self, cause: impl Into<String>) -> Self {
        self.cause = Some(cause.into());
        self
    }

    /// Build the error value
    pub fn build(self) -> Result<ErrorValue> {
        let kind = self
            .kind
            .ok_or_else(|| ApiError::Config("error kind required".to_string()))?;
        let cause = self
            .cause
            .ok_or_else(|| ApiError::Config("cause required".to_string()))?;

        Ok(ErrorValue::new(self.expectation, kind, cause)?)
    }
}

/// Start building an error value
pub fn builder() -> ErrorValueBuilder {
    ErrorValueBuilder::new()
}
