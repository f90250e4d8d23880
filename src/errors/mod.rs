//! Error types for the greenhouse layout subsystem
//!
//! Every store, service and HTTP operation reports failures as a [`LayoutError`].
//! The editor swallows these after logging them; the HTTP layer maps them to
//! status codes with [`LayoutError::is_client_error`].
//!
//! # Examples
//!
//! ```rust
//! use greenhouse::errors::LayoutError;
//!
//! let err = LayoutError::NotFound(42);
//! assert!(err.is_client_error());
//! assert_eq!(err.to_string(), "Layout component 42 not found");
//! ```

use thiserror::Error;

/// Layout store and editor errors
#[derive(Error, Debug)]
pub enum LayoutError {
    /// Component not found by ID
    #[error("Layout component {0} not found")]
    NotFound(i32),

    /// Field validation failed
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Component type outside the supported set
    #[error("Unknown component type: {0}")]
    InvalidComponentType(String),

    /// Canvas transform cannot be inverted
    #[error("Invalid canvas transform: {0}")]
    InvalidTransform(String),

    /// Store rejected or could not serve the request
    #[error("Layout store unavailable: {0}")]
    Unavailable(String),

    /// Database operation failed
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Metadata could not be encoded or decoded
    #[error("Metadata error: {0}")]
    Metadata(#[from] serde_json::Error),
}

impl LayoutError {
    /// Check if this is a client error (400-series)
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            LayoutError::NotFound(_)
                | LayoutError::Validation(_)
                | LayoutError::InvalidComponentType(_)
                | LayoutError::InvalidTransform(_)
        )
    }

    pub fn validation(message: impl Into<String>) -> Self {
        LayoutError::Validation(message.into())
    }
}

/// Result type alias for layout operations
pub type LayoutResult<T> = Result<T, LayoutError>;
