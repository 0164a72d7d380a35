//! # ClientVault Core
//!
//! Encrypted client, order and custom-field records for ClientVault.
//!
//! This crate provides:
//! - Named buckets, each holding one encrypted collection
//! - Typed repositories doing whole-collection read-modify-write
//! - Validated save paths for clients, orders and custom fields
//! - Single-account authentication
//! - Dashboard statistics, search, and whole-vault export/import
//!
//! Everything hangs off a [`Vault`], built once from a [`VaultConfig`] and
//! cloned wherever persistence is needed.
//!
//! ## Example
//!
//! ```rust
//! use clientvault_core::{NewClient, NewOrder, OrderItem, Vault, VaultConfig};
//!
//! let vault = Vault::in_memory(&VaultConfig::default()).unwrap();
//! let acme = vault
//!     .create_client(NewClient::new("Acme", "ops@acme.test", "555-0100"))
//!     .unwrap();
//! vault
//!     .create_order(NewOrder::new(acme.id, vec![OrderItem::new("Widget", 2, 10.0)]))
//!     .unwrap();
//!
//! let stats = vault.dashboard_stats().unwrap();
//! assert_eq!(stats.total_revenue, 20.0);
//! assert_eq!(stats.top_clients[0].name, "Acme");
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod auth;
mod bucket;
mod config;
mod error;
pub mod model;
mod records;
mod repository;
mod search;
mod stats;
mod transfer;
pub mod validation;
mod vault;

pub use auth::{hash_password, AuthService};
pub use bucket::{Bucket, BucketStore};
pub use config::{VaultConfig, DATA_DIR_ENV, DEFAULT_DATA_DIR, DEFAULT_SECRET, SECRET_ENV};
pub use error::{AuthError, CoreError, CoreResult};
pub use model::{
    Client, CustomField, CustomFieldValue, CustomValues, EntityType, FieldType, Order, OrderItem,
    OrderStatus, RecordId, User,
};
pub use records::{generate_order_number, NewClient, NewCustomField, NewOrder};
pub use repository::{Record, Repository, UserRepository};
pub use search::UNKNOWN_CLIENT;
pub use stats::{DashboardStats, TopClient, TOP_CLIENT_LIMIT};
pub use transfer::{ExportDocument, EXPORT_FILE_NAME};
pub use vault::Vault;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
