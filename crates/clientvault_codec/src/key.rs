//! Encryption keys.

use crate::error::{CodecError, CodecResult};
use rand::RngCore;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Size of the AES-256 key in bytes.
pub const KEY_SIZE: usize = 32;

/// HKDF salt for application secrets. Fixed so every install derives the
/// same key from the same secret.
const SECRET_SALT: &[u8] = b"clientvault-local-storage";
/// HKDF info string binding derived keys to the envelope format.
const SECRET_INFO: &[u8] = b"clientvault-envelope-key-v1";

/// Encryption key for AES-256-GCM.
///
/// The key is automatically zeroized when dropped.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct EncryptionKey {
    bytes: [u8; KEY_SIZE],
}

impl EncryptionKey {
    /// Generates a new random encryption key.
    #[must_use]
    pub fn generate() -> Self {
        let mut bytes = [0u8; KEY_SIZE];
        rand::thread_rng().fill_bytes(&mut bytes);
        Self { bytes }
    }

    /// Creates a key from raw bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the bytes slice is not exactly 32 bytes.
    pub fn from_bytes(bytes: &[u8]) -> CodecResult<Self> {
        if bytes.len() != KEY_SIZE {
            return Err(CodecError::InvalidKeySize {
                expected: KEY_SIZE,
                actual: bytes.len(),
            });
        }

        let mut key_bytes = [0u8; KEY_SIZE];
        key_bytes.copy_from_slice(bytes);
        Ok(Self { bytes: key_bytes })
    }

    /// Derives a key from an application secret using HKDF-SHA256.
    ///
    /// The same secret always yields the same key, which is what lets a
    /// restarted application read its own buckets.
    ///
    /// # Security Note
    ///
    /// HKDF is not a password hash. The application secret is configuration
    /// shipped with the program, so this only stretches it to key size.
    ///
    /// # Errors
    ///
    /// Returns an error if HKDF expansion fails.
    pub fn from_secret(secret: &str) -> CodecResult<Self> {
        use hkdf::Hkdf;
        use sha2::Sha256;

        let hk = Hkdf::<Sha256>::new(Some(SECRET_SALT), secret.as_bytes());

        let mut bytes = [0u8; KEY_SIZE];
        hk.expand(SECRET_INFO, &mut bytes)
            .map_err(|_| CodecError::KeyDerivation)?;

        Ok(Self { bytes })
    }

    /// Returns the key as a byte slice.
    ///
    /// # Security
    ///
    /// Don't log or serialize the result.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.bytes
    }
}

impl std::fmt::Debug for EncryptionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EncryptionKey")
            .field("bytes", &"[REDACTED]")
            .finish()
    }
}
