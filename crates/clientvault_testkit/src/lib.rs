//! # ClientVault Testkit
//!
//! Test utilities for ClientVault.
//!
//! This crate provides:
//! - Test fixtures and vault helpers
//! - Property-based test generators using proptest
//! - A harness that checks repositories against an in-memory model
//!
//! Cross-crate integration tests live in this crate's `tests/` directory.
//!
//! ## Usage
//!
//! ```rust
//! use clientvault_testkit::prelude::*;
//!
//! with_temp_vault(|vault| {
//!     let client = vault.create_client(sample_client("Acme")).unwrap();
//!     assert_eq!(vault.clients().count().unwrap(), 1);
//!     assert_eq!(vault.client_name(&client.id).unwrap(), "Acme");
//! });
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod fixtures;
pub mod generators;
pub mod integration;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::fixtures::*;
    pub use crate::generators::*;
    pub use crate::integration::*;
}

pub use fixtures::*;
pub use generators::*;
pub use integration::*;
