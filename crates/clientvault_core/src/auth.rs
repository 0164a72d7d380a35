//! Single-account authentication.
//!
//! One user may register per vault. The password is stored as an unsalted
//! SHA-256 hex digest, which is only a gate against casual access on a shared
//! machine.

use crate::error::{AuthError, CoreError, CoreResult};
use crate::model::{RecordId, User};
use crate::vault::Vault;
use chrono::Utc;
use parking_lot::RwLock;
use sha2::{Digest, Sha256};
use tracing::{debug, info};

/// Hashes a password to lowercase hex SHA-256.
#[must_use]
pub fn hash_password(password: &str) -> String {
    hex::encode(Sha256::digest(password.as_bytes()))
}

/// Tracks who is signed in.
///
/// The signed-in user lives only in memory; the registered account lives in
/// the vault's user bucket.
#[derive(Debug)]
pub struct AuthService {
    vault: Vault,
    current: RwLock<Option<User>>,
}

impl AuthService {
    /// Creates a signed-out session over `vault`.
    pub fn new(vault: Vault) -> Self {
        Self {
            vault,
            current: RwLock::new(None),
        }
    }

    /// Registers the vault's only account and signs it in.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a blank username or password,
    /// [`AuthError::AlreadyRegistered`] if an account exists, or a storage
    /// error if the write fails.
    pub fn register(&self, username: &str, password: &str) -> CoreResult<User> {
        let username = username.trim();
        if username.is_empty() {
            return Err(CoreError::validation("username is required"));
        }
        if password.is_empty() {
            return Err(CoreError::validation("password is required"));
        }
        if self.vault.user().get()?.is_some() {
            return Err(AuthError::AlreadyRegistered.into());
        }

        let user = User {
            id: RecordId::new(),
            username: username.to_string(),
            password_hash: hash_password(password),
            created_at: Utc::now(),
        };
        self.vault.user().save(&user)?;
        *self.current.write() = Some(user.clone());

        info!(username = %user.username, "registered user");
        Ok(user)
    }

    /// Signs in the registered account.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::NoAccount`] if nobody has registered, or
    /// [`AuthError::InvalidCredentials`] if the username or password differ.
    pub fn login(&self, username: &str, password: &str) -> CoreResult<User> {
        let Some(user) = self.vault.user().get()? else {
            return Err(AuthError::NoAccount.into());
        };
        if user.username != username.trim() || user.password_hash != hash_password(password) {
            info!(username = %username.trim(), "login rejected");
            return Err(AuthError::InvalidCredentials.into());
        }

        *self.current.write() = Some(user.clone());
        info!(username = %user.username, "logged in");
        Ok(user)
    }

    /// Signs out. The account stays registered.
    pub fn logout(&self) {
        if let Some(user) = self.current.write().take() {
            info!(username = %user.username, "logged out");
        }
    }

    /// Returns the signed-in user.
    pub fn current_user(&self) -> Option<User> {
        self.current.read().clone()
    }

    /// Returns `true` if someone is signed in.
    pub fn is_authenticated(&self) -> bool {
        self.current.read().is_some()
    }

    /// Re-reads the stored account and makes it the session user.
    ///
    /// Call on startup and whenever the application comes back to the
    /// foreground. If the account was removed in the meantime the session is
    /// cleared.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying store fails.
    pub fn refresh(&self) -> CoreResult<Option<User>> {
        let stored = self.vault.user().get()?;
        debug!(present = stored.is_some(), "refreshed session");
        *self.current.write() = stored.clone();
        Ok(stored)
    }

    /// The vault this session reads accounts from.
    pub fn vault(&self) -> &Vault {
        &self.vault
    }
}
