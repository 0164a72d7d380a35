//! Vault configuration.

use crate::error::{CoreError, CoreResult};
use crate::vault::Vault;
use clientvault_codec::{Codec, EncryptionKey};
use std::path::{Path, PathBuf};

/// Application secret shipped with ClientVault.
///
/// Anyone holding the program can read it. It keeps stored buckets from being
/// plaintext, nothing more.
pub const DEFAULT_SECRET: &str = "clientvault-embedded-application-secret-v1";

/// Default data directory, relative to the working directory.
pub const DEFAULT_DATA_DIR: &str = "clientvault-data";

/// Environment variable overriding the application secret.
pub const SECRET_ENV: &str = "CLIENTVAULT_SECRET";

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "CLIENTVAULT_DATA_DIR";

/// Configuration for opening a vault.
#[derive(Clone)]
pub struct VaultConfig {
    /// Secret the envelope key is derived from.
    pub secret: String,

    /// Directory holding one file per bucket.
    pub data_dir: PathBuf,

    /// Whether exports are pretty-printed.
    pub pretty_export: bool,
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self {
            secret: DEFAULT_SECRET.to_string(),
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            pretty_export: true,
        }
    }
}

impl VaultConfig {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a configuration from `CLIENTVAULT_SECRET` and `CLIENTVAULT_DATA_DIR`.
    ///
    /// Unset or empty variables fall back to the defaults.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds a configuration from an arbitrary variable lookup.
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(secret) = lookup(SECRET_ENV).filter(|s| !s.is_empty()) {
            config.secret = secret;
        }
        if let Some(dir) = lookup(DATA_DIR_ENV).filter(|s| !s.is_empty()) {
            config.data_dir = PathBuf::from(dir);
        }
        config
    }

    /// Sets the application secret.
    #[must_use]
    pub fn secret(mut self, secret: impl Into<String>) -> Self {
        self.secret = secret.into();
        self
    }

    /// Sets the data directory.
    #[must_use]
    pub fn data_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.data_dir = dir.as_ref().to_path_buf();
        self
    }

    /// Sets whether exports are pretty-printed.
    #[must_use]
    pub const fn pretty_export(mut self, value: bool) -> Self {
        self.pretty_export = value;
        self
    }

    /// Derives the envelope key from the secret.
    ///
    /// # Errors
    ///
    /// Returns an error if the secret is empty.
    pub fn key(&self) -> CoreResult<EncryptionKey> {
        if self.secret.is_empty() {
            return Err(CoreError::invalid_config("application secret is empty"));
        }
        Ok(EncryptionKey::from_secret(&self.secret)?)
    }

    /// Builds the codec for this configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the key cannot be derived.
    pub fn codec(&self) -> CoreResult<Codec> {
        Ok(Codec::new(self.key()?))
    }

    /// Opens a file-backed vault with this configuration.
    ///
    /// # Errors
    ///
    /// See [`Vault::open`].
    pub fn open(&self) -> CoreResult<Vault> {
        Vault::open(self)
    }
}

impl std::fmt::Debug for VaultConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VaultConfig")
            .field("secret", &"[REDACTED]")
            .field("data_dir", &self.data_dir)
            .field("pretty_export", &self.pretty_export)
            .finish()
    }
}
