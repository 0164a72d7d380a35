//! # ClientVault Storage
//!
//! Key/value store trait and implementations for ClientVault.
//!
//! This crate provides the lowest-level persistence abstraction for ClientVault.
//! Stores are **opaque string stores** - they do not interpret the values
//! they hold. Encryption and serialization happen one layer up.
//!
//! ## Design Principles
//!
//! - Stores are simple keyed slots (read, write, remove)
//! - Every write replaces the whole value under a key
//! - No expiry, no transactions, no cross-key atomicity
//! - Must be `Send + Sync` so one store can be shared by every repository
//!
//! ## Available Stores
//!
//! - [`InMemoryStore`] - For testing and ephemeral sessions
//! - [`FileStore`] - One file per key inside a data directory
//!
//! ## Example
//!
//! ```rust
//! use clientvault_storage::{KeyValueStore, InMemoryStore};
//!
//! let store = InMemoryStore::new();
//! store.write("clients", "opaque").unwrap();
//! assert_eq!(store.read("clients").unwrap().as_deref(), Some("opaque"));
//! store.remove("clients").unwrap();
//! assert!(store.read("clients").unwrap().is_none());
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod error;
mod file;
mod memory;
mod store;

pub use error::{StorageError, StorageResult};
pub use file::{FileStore, FILE_EXTENSION};
pub use memory::InMemoryStore;
pub use store::{validate_key, KeyValueStore};
