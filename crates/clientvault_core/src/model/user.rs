use super::RecordId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The single registered account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Record ID.
    pub id: RecordId,
    /// Login name.
    pub username: String,
    /// Lowercase hex SHA-256 of the password.
    pub password_hash: String,
    /// Registration time.
    pub created_at: DateTime<Utc>,
}
