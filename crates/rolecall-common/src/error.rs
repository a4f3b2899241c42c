//! Error types shared across the Rolecall workspace.

use thiserror::Error;

/// Result type alias for chat platform calls.
pub type PlatformResult<T> = std::result::Result<T, PlatformError>;

/// Errors returned by a [`crate::ChatPlatform`] call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlatformError {
    /// The addressed resource does not exist or is not visible to the bot.
    #[error("{what} not found")]
    NotFound {
        /// Name of the missing resource.
        what: String,
    },

    /// The bot is not allowed to perform the operation.
    #[error("missing permissions: {0}")]
    Forbidden(String),

    /// Any other failure reported by the platform or the transport.
    #[error("request failed: {0}")]
    Request(String),
}

impl PlatformError {
    /// Create a not-found error for the named resource.
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound { what: what.into() }
    }

    /// Create a generic request error.
    pub fn request(msg: impl Into<String>) -> Self {
        Self::Request(msg.into())
    }

    /// True when the error means the resource is gone.
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
