//! Test fixtures and vault helpers.
//!
//! Provides convenience functions for setting up test vaults
//! and common test scenarios.

use clientvault_core::{
    Client, EntityType, FieldType, NewClient, NewCustomField, NewOrder, Order, OrderItem,
    OrderStatus, RecordId, Vault, VaultConfig,
};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Secret used by every fixture vault.
pub const TEST_SECRET: &str = "clientvault-testkit-secret";

/// A test vault with automatic cleanup.
pub struct TestVault {
    /// The vault instance.
    pub vault: Vault,
    /// Configuration the vault was opened with.
    pub config: VaultConfig,
    /// The temporary directory (kept alive to prevent cleanup).
    _temp_dir: Option<TempDir>,
}

impl TestVault {
    /// Creates a new in-memory test vault.
    pub fn memory() -> Self {
        let config = VaultConfig::new().secret(TEST_SECRET);
        Self {
            vault: Vault::in_memory(&config).expect("Failed to open in-memory vault"),
            config,
            _temp_dir: None,
        }
    }

    /// Creates a new file-backed test vault in a temporary directory.
    pub fn file() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let config = VaultConfig::new()
            .secret(TEST_SECRET)
            .data_dir(temp_dir.path().join("data"));

        Self {
            vault: Vault::open(&config).expect("Failed to open file vault"),
            config,
            _temp_dir: Some(temp_dir),
        }
    }

    /// Returns the data directory if file-backed, None if in-memory.
    pub fn path(&self) -> Option<PathBuf> {
        self._temp_dir.as_ref().map(|_| self.config.data_dir.clone())
    }

    /// Opens a second vault over the same data directory.
    ///
    /// # Panics
    ///
    /// Panics if the vault is in-memory.
    pub fn reopen(&self) -> Vault {
        assert!(self._temp_dir.is_some(), "only file vaults can be reopened");
        Vault::open(&self.config).expect("Failed to reopen vault")
    }
}

impl std::ops::Deref for TestVault {
    type Target = Vault;

    fn deref(&self) -> &Self::Target {
        &self.vault
    }
}

/// Runs a test with a temporary in-memory vault.
pub fn with_temp_vault<F, R>(f: F) -> R
where
    F: FnOnce(&Vault) -> R,
{
    let test_vault = TestVault::memory();
    f(&test_vault.vault)
}

/// Runs a test with a temporary file-backed vault.
pub fn with_file_vault<F, R>(f: F) -> R
where
    F: FnOnce(&Vault, &Path) -> R,
{
    let test_vault = TestVault::file();
    let path = test_vault.path().expect("File vault should have a path");
    f(&test_vault.vault, &path)
}

/// Client input with a derived email and phone.
pub fn sample_client(name: &str) -> NewClient {
    let slug: String = name
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .collect::<String>()
        .to_lowercase();
    NewClient::new(name, format!("{slug}@example.test"), "555-0100")
}

/// Order input with one line worth `total`.
pub fn sample_order(client_id: &RecordId, total: f64) -> NewOrder {
    NewOrder::new(client_id.clone(), vec![OrderItem::new("Service", 1, total)])
}

/// Test scenario helpers.
pub mod scenarios {
    use super::*;

    /// Two clients and three orders: A has 100 and 50, B has 30.
    pub fn two_clients_three_orders(vault: &Vault) -> (Client, Client, Vec<Order>) {
        let a = vault
            .create_client(sample_client("A"))
            .expect("Failed to create client A");
        let b = vault
            .create_client(sample_client("B"))
            .expect("Failed to create client B");

        let orders = [(&a, 100.0), (&b, 30.0), (&a, 50.0)]
            .into_iter()
            .map(|(client, total)| {
                vault
                    .create_order(sample_order(&client.id, total))
                    .expect("Failed to create order")
            })
            .collect();

        (a, b, orders)
    }

    /// A vault with `count` clients, each with one pending and one completed order.
    pub fn populated_vault(count: usize) -> TestVault {
        let test_vault = TestVault::memory();
        for i in 0..count {
            let client = test_vault
                .create_client(sample_client(&format!("Client {i}")))
                .expect("Failed to create client");

            let mut done = sample_order(&client.id, 10.0 * (i + 1) as f64);
            done.status = OrderStatus::Completed;
            test_vault
                .create_order(sample_order(&client.id, 1.0))
                .expect("Failed to create order");
            test_vault.create_order(done).expect("Failed to create order");
        }
        test_vault
    }

    /// Defines one optional field of each type for `entity`.
    pub fn one_field_of_each_type(vault: &Vault, entity: EntityType) {
        for field_type in FieldType::ALL {
            let mut input = NewCustomField::new(field_type.as_str(), field_type, entity);
            if field_type == FieldType::Select {
                input.options = vec!["low".into(), "high".into()];
            }
            vault
                .create_custom_field(input)
                .expect("Failed to create custom field");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_vault_is_empty() {
        let test_vault = TestVault::memory();
        assert!(test_vault.path().is_none());
        assert!(test_vault.clients().all().unwrap().is_empty());
    }

    #[test]
    fn file_vault_reopens() {
        let test_vault = TestVault::file();
        test_vault.create_client(sample_client("Acme")).unwrap();
        assert_eq!(test_vault.reopen().clients().count().unwrap(), 1);
    }

    #[test]
    fn sample_client_email_is_valid() {
        assert_eq!(sample_client("Acme Corp").email, "acmecorp@example.test");
    }

    #[test]
    fn populated_vault_counts() {
        let test_vault = scenarios::populated_vault(3);
        assert_eq!(test_vault.clients().count().unwrap(), 3);
        assert_eq!(test_vault.orders().count().unwrap(), 6);
    }
}
