//! API error types

use errval_core::ContractError;
use thiserror::Error;

/// API-level errors
#[derive(Error, Debug)]
pub enum ApiError {
    /// Core contract error
    #[error(transparent)]
    Contract(#[from] ContractError),

    /// A type name that is not in the registry
    #[error("unknown type '{name}'")]
    UnknownType {
        /// The name that failed to resolve
        name: String,
    },

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// JSON parse error
    #[cfg(feature = "serde")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parse error
    #[cfg(feature = "serde")]
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// TOML serialization error
    #[cfg(feature = "serde")]
    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

/// Result type for API operations
pub type Result<T> = std::result::Result<T, ApiError>;
