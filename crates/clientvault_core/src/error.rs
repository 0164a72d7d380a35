//! Error types for ClientVault core.

use thiserror::Error;

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur in ClientVault core operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Key/value store error.
    #[error("storage error: {0}")]
    Storage(#[from] clientvault_storage::StorageError),

    /// Envelope encode/decode error.
    #[error("codec error: {0}")]
    Codec(#[from] clientvault_codec::CodecError),

    /// JSON error outside the envelope (import/export documents).
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Input rejected before any write happened.
    #[error("validation failed: {message}")]
    Validation {
        /// What was wrong with the input.
        message: String,
    },

    /// Authentication failure.
    #[error("authentication failed: {0}")]
    Auth(#[from] AuthError),

    /// Configuration is unusable.
    #[error("invalid configuration: {message}")]
    InvalidConfig {
        /// Description of the problem.
        message: String,
    },
}

/// Failures of the single-user authentication flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthError {
    /// A user is already registered.
    #[error("a user account already exists, log in instead")]
    AlreadyRegistered,

    /// No user has been registered yet.
    #[error("no user account found, register first")]
    NoAccount,

    /// Username or password did not match.
    #[error("invalid username or password")]
    InvalidCredentials,
}

impl CoreError {
    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create an invalid configuration error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Returns `true` for validation errors.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    /// Returns `true` if the stored data could not be read back.
    ///
    /// Repositories treat these as an empty bucket.
    #[must_use]
    pub fn is_corrupted_bucket(&self) -> bool {
        match self {
            Self::Codec(e) => e.is_decode_error(),
            Self::Storage(clientvault_storage::StorageError::Corrupted(_)) => true,
            _ => false,
        }
    }
}
