//! Contract error types
//!
//! These are raised when the primitive itself is misused. They are never
//! represented as [`ErrorValue`](crate::ErrorValue)s.

use thiserror::Error;

/// Misuse of an error value or of the interception combinator
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContractError {
    /// A precondition of the primitive was not met
    #[error("contract violation: {0}")]
    Violation(String),

    /// A value had the wrong shape or type
    #[error("type mismatch: {0}")]
    TypeMismatch(String),

    /// A position or key fell outside its permitted range
    #[error("out of range: {0}")]
    OutOfRange(String),

    /// The call supplied a different number of arguments than the table guards
    #[error("expectation table and argument list must have equal length: expected {expected}, got {found}")]
    ArityMismatch {
        /// Number of entries in the expectation table
        expected: usize,
        /// Number of positional arguments supplied
        found: usize,
    },
}

/// Result type for core operations
pub type Result<T> = std::result::Result<T, ContractError>;
