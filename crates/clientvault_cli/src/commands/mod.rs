//! CLI command implementations.

pub mod auth;
pub mod list;
pub mod stats;
pub mod transfer;
