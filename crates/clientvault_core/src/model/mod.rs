//! Record types persisted in the vault.
//!
//! Field names serialize in camelCase, optional fields are omitted when
//! absent, and timestamps are RFC 3339 UTC strings. The same shapes appear
//! inside encrypted buckets and in export documents.

mod client;
mod custom_field;
mod id;
mod order;
mod user;

pub use client::Client;
pub use custom_field::{CustomField, CustomFieldValue, CustomValues, EntityType, FieldType};
pub use id::RecordId;
pub use order::{Order, OrderItem, OrderStatus};
pub use user::User;
