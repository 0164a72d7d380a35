//! Envelope encoding and decoding.

use crate::error::{CodecError, CodecResult};
use crate::key::EncryptionKey;
use aes_gcm::{
    aead::{generic_array::GenericArray, Aead, KeyInit},
    Aes256Gcm, Nonce,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use rand::RngCore;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Size of the GCM nonce in bytes.
pub const NONCE_SIZE: usize = 12;
/// Size of the GCM authentication tag in bytes.
pub const TAG_SIZE: usize = 16;

/// Seals serde values into text envelopes and opens them again.
///
/// The envelope format is `base64(nonce (12 bytes) || ciphertext || tag (16 bytes))`
/// where the ciphertext is AES-256-GCM over the value's JSON encoding.
pub struct Codec {
    cipher: Aes256Gcm,
}

impl Codec {
    /// Creates a codec with the given key.
    #[must_use]
    pub fn new(key: EncryptionKey) -> Self {
        // EncryptionKey is always KEY_SIZE bytes, matching AES-256.
        let key_array = GenericArray::from_slice(key.as_bytes());
        let cipher = Aes256Gcm::new(key_array);
        Self { cipher }
    }

    /// Encodes a value into an envelope.
    ///
    /// Every call picks a fresh random nonce, so encoding the same value twice
    /// yields different envelopes.
    ///
    /// # Errors
    ///
    /// Returns an error if the value cannot be serialized to JSON.
    pub fn encode<T: Serialize + ?Sized>(&self, value: &T) -> CodecResult<String> {
        let plaintext =
            serde_json::to_vec(value).map_err(|e| CodecError::serialization(e.to_string()))?;
        let sealed = self.seal(&plaintext)?;
        Ok(STANDARD.encode(sealed))
    }

    /// Decodes an envelope back into a value.
    ///
    /// # Errors
    ///
    /// Returns an error if the envelope is not base64, is truncated, was
    /// sealed under a different key, or holds JSON that does not match `T`.
    pub fn decode<T: DeserializeOwned>(&self, envelope: &str) -> CodecResult<T> {
        let sealed = STANDARD
            .decode(envelope.trim())
            .map_err(|e| CodecError::encoding(e.to_string()))?;
        let plaintext = self.open(&sealed)?;
        serde_json::from_slice(&plaintext).map_err(|e| CodecError::deserialization(e.to_string()))
    }

    fn seal(&self, plaintext: &[u8]) -> CodecResult<Vec<u8>> {
        let mut nonce_bytes = [0u8; NONCE_SIZE];
        rand::thread_rng().fill_bytes(&mut nonce_bytes);
        let nonce = Nonce::from_slice(&nonce_bytes);

        let ciphertext = self
            .cipher
            .encrypt(nonce, plaintext)
            .map_err(|_| CodecError::EncryptionFailed)?;

        let mut result = Vec::with_capacity(NONCE_SIZE + ciphertext.len());
        result.extend_from_slice(&nonce_bytes);
        result.extend(ciphertext);
        Ok(result)
    }

    fn open(&self, sealed: &[u8]) -> CodecResult<Vec<u8>> {
        if sealed.len() < NONCE_SIZE + TAG_SIZE {
            return Err(CodecError::Truncated {
                len: sealed.len(),
                min: NONCE_SIZE + TAG_SIZE,
            });
        }

        let (nonce, encrypted) = sealed.split_at(NONCE_SIZE);
        self.cipher
            .decrypt(Nonce::from_slice(nonce), encrypted)
            .map_err(|_| CodecError::Decryption)
    }
}

impl std::fmt::Debug for Codec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Codec").field("cipher", &"Aes256Gcm").finish()
    }
}
