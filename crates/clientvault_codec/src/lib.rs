//! # ClientVault Codec
//!
//! Encrypted JSON envelopes for ClientVault.
//!
//! This crate turns any serde value into an opaque text envelope and back:
//! - Values are serialized to JSON
//! - JSON bytes are sealed with AES-256-GCM under a fresh random nonce
//! - `nonce || ciphertext || tag` is rendered as standard base64
//!
//! Encoding is non-deterministic (the nonce changes every call) but an
//! envelope always decodes under the key that produced it.
//!
//! ## Security Note
//!
//! ClientVault ships its key with the application. The envelope keeps stored
//! data from being plaintext to casual inspection; it does not protect against
//! anyone who can read the application's configuration.
//!
//! ## Usage
//!
//! ```
//! use clientvault_codec::{Codec, EncryptionKey};
//!
//! let codec = Codec::new(EncryptionKey::from_secret("demo secret").unwrap());
//! let envelope = codec.encode(&vec!["alpha", "beta"]).unwrap();
//! let decoded: Vec<String> = codec.decode(&envelope).unwrap();
//! assert_eq!(decoded, ["alpha", "beta"]);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod codec;
mod error;
mod key;

pub use codec::{Codec, NONCE_SIZE, TAG_SIZE};
pub use error::{CodecError, CodecResult};
pub use key::{EncryptionKey, KEY_SIZE};
