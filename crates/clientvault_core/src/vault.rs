//! The shared access point to persistence.

use crate::bucket::BucketStore;
use crate::config::VaultConfig;
use crate::error::CoreResult;
use crate::model::{Client, CustomField, Order};
use crate::repository::{Repository, UserRepository};
use clientvault_codec::Codec;
use clientvault_storage::{FileStore, InMemoryStore, KeyValueStore};
use std::sync::Arc;
use tracing::info;

/// Bundles the bucket store and the four repositories.
///
/// Build one `Vault` at startup and hand it to whatever needs persistence.
/// Clones share the same underlying store, so passing clones around is the
/// same as passing references.
///
/// # Example
///
/// ```rust
/// use clientvault_core::{NewClient, Vault, VaultConfig};
///
/// let vault = Vault::in_memory(&VaultConfig::default()).unwrap();
/// let client = vault
///     .create_client(NewClient::new("Acme", "ops@acme.test", "555-0100"))
///     .unwrap();
/// assert_eq!(vault.clients().all().unwrap(), vec![client]);
/// ```
#[derive(Debug, Clone)]
pub struct Vault {
    buckets: BucketStore,
    clients: Repository<Client>,
    orders: Repository<Order>,
    custom_fields: Repository<CustomField>,
    user: UserRepository,
}

impl Vault {
    /// Creates a vault over an existing store and codec.
    pub fn new(store: Arc<dyn KeyValueStore>, codec: Codec) -> Self {
        let buckets = BucketStore::new(store, codec);
        Self {
            clients: Repository::new(buckets.clone()),
            orders: Repository::new(buckets.clone()),
            custom_fields: Repository::new(buckets.clone()),
            user: UserRepository::new(buckets.clone()),
            buckets,
        }
    }

    /// Opens a vault backed by files in `config.data_dir`.
    ///
    /// # Errors
    ///
    /// Returns an error if the secret is unusable or the directory cannot be
    /// created.
    pub fn open(config: &VaultConfig) -> CoreResult<Self> {
        let codec = config.codec()?;
        let store = FileStore::open(&config.data_dir)?;
        info!(dir = %config.data_dir.display(), "opened vault");
        Ok(Self::new(Arc::new(store), codec))
    }

    /// Creates a vault that lives only in memory.
    ///
    /// # Errors
    ///
    /// Returns an error if the secret is unusable.
    pub fn in_memory(config: &VaultConfig) -> CoreResult<Self> {
        Ok(Self::new(Arc::new(InMemoryStore::new()), config.codec()?))
    }

    /// Client repository.
    pub fn clients(&self) -> &Repository<Client> {
        &self.clients
    }

    /// Order repository.
    pub fn orders(&self) -> &Repository<Order> {
        &self.orders
    }

    /// Custom field repository.
    pub fn custom_fields(&self) -> &Repository<CustomField> {
        &self.custom_fields
    }

    /// User repository.
    pub fn user(&self) -> &UserRepository {
        &self.user
    }

    /// Raw bucket access, for diagnostics.
    pub fn buckets(&self) -> &BucketStore {
        &self.buckets
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bucket::Bucket;
    use tempfile::tempdir;

    #[test]
    fn clones_share_storage() {
        let vault = Vault::in_memory(&VaultConfig::default()).unwrap();
        let other = vault.clone();

        other.buckets().save(Bucket::Clients, &Vec::<Client>::new()).unwrap();
        assert!(vault.buckets().is_set(Bucket::Clients).unwrap());
    }

    #[test]
    fn file_vault_persists_across_open() {
        let dir = tempdir().unwrap();
        let config = VaultConfig::new().data_dir(dir.path());

        {
            let vault = Vault::open(&config).unwrap();
            vault.buckets().save(Bucket::Orders, &Vec::<Order>::new()).unwrap();
        }

        let vault = Vault::open(&config).unwrap();
        assert!(vault.buckets().is_set(Bucket::Orders).unwrap());
        assert!(vault.orders().all().unwrap().is_empty());
    }

    #[test]
    fn different_secret_cannot_read_buckets() {
        let dir = tempdir().unwrap();
        let config = VaultConfig::new().data_dir(dir.path());
        let vault = Vault::open(&config).unwrap();
        vault
            .buckets()
            .save(Bucket::Clients, &vec![serde_json::json!({"id": "x"})])
            .unwrap();

        let foreign = Vault::open(&config.clone().secret("another secret")).unwrap();
        assert!(foreign.clients().all().unwrap().is_empty());
    }
}
