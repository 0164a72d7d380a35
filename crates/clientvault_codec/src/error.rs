//! Error types for the codec crate.

use thiserror::Error;

/// Result type for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;

/// Errors that can occur while encoding or decoding envelopes.
///
/// Every variant except [`CodecError::Serialization`] and
/// [`CodecError::EncryptionFailed`] is a decode failure: the stored text is
/// malformed, was sealed under another key, or holds the wrong shape of data.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// Key material has the wrong length.
    #[error("invalid key size: expected {expected} bytes, got {actual}")]
    InvalidKeySize {
        /// Expected size in bytes.
        expected: usize,
        /// Actual size in bytes.
        actual: usize,
    },

    /// Key derivation from the application secret failed.
    #[error("key derivation failed")]
    KeyDerivation,

    /// Failed to serialize the value to JSON.
    #[error("serialization failed: {message}")]
    Serialization {
        /// Description of the serialization error.
        message: String,
    },

    /// The cipher refused to seal the plaintext.
    #[error("encryption failed")]
    EncryptionFailed,

    /// The envelope is not valid base64.
    #[error("envelope is not valid base64: {message}")]
    Encoding {
        /// Description of the encoding error.
        message: String,
    },

    /// The envelope is too short to hold a nonce and tag.
    #[error("envelope truncated: {len} bytes, need at least {min}")]
    Truncated {
        /// Decoded envelope length.
        len: usize,
        /// Minimum valid length.
        min: usize,
    },

    /// Authentication failed: wrong key or tampered envelope.
    #[error("decryption failed: wrong key or tampered data")]
    Decryption,

    /// The plaintext is not valid JSON for the requested type.
    #[error("deserialization failed: {message}")]
    Deserialization {
        /// Description of the deserialization error.
        message: String,
    },
}

impl CodecError {
    /// Create a serialization error.
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }

    /// Create a base64 encoding error.
    pub fn encoding(message: impl Into<String>) -> Self {
        Self::Encoding {
            message: message.into(),
        }
    }

    /// Create a deserialization error.
    pub fn deserialization(message: impl Into<String>) -> Self {
        Self::Deserialization {
            message: message.into(),
        }
    }

    /// Returns `true` if this error came from reading an envelope back.
    #[must_use]
    pub fn is_decode_error(&self) -> bool {
        matches!(
            self,
            Self::Encoding { .. }
                | Self::Truncated { .. }
                | Self::Decryption
                | Self::Deserialization { .. }
        )
    }
}
