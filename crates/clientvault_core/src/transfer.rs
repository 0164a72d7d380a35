//! Whole-vault export, import and reset.
//!
//! The export document is plain JSON with exactly three arrays:
//!
//! ```json
//! { "clients": [...], "orders": [...], "customFields": [...] }
//! ```
//!
//! The user record is never exported, imported or reset.

use crate::error::{CoreError, CoreResult};
use crate::model::{Client, CustomField, Order};
use crate::vault::Vault;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

/// Suggested file name for exports.
pub const EXPORT_FILE_NAME: &str = "client-vault-backup.json";

const REQUIRED_KEYS: [&str; 3] = ["clients", "orders", "customFields"];

/// A snapshot of every data bucket.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportDocument {
    /// All clients.
    pub clients: Vec<Client>,
    /// All orders.
    pub orders: Vec<Order>,
    /// All custom field definitions.
    pub custom_fields: Vec<CustomField>,
}

impl ExportDocument {
    /// Parses an export document.
    ///
    /// # Errors
    ///
    /// Returns a validation error if `text` is not a JSON object or one of
    /// `clients`, `orders`, `customFields` is missing or not an array. Returns
    /// a JSON error if an entry does not match its record shape.
    pub fn from_json(text: &str) -> CoreResult<Self> {
        let value: Value = serde_json::from_str(text)
            .map_err(|e| CoreError::validation(format!("import file is not valid JSON: {e}")))?;
        let Some(object) = value.as_object() else {
            return Err(CoreError::validation("import file must be a JSON object"));
        };
        for key in REQUIRED_KEYS {
            match object.get(key) {
                Some(Value::Array(_)) => {}
                Some(_) => {
                    return Err(CoreError::validation(format!("{key} must be an array")));
                }
                None => {
                    return Err(CoreError::validation(format!(
                        "invalid backup file: missing {key}"
                    )));
                }
            }
        }
        Ok(serde_json::from_value(value)?)
    }

    /// Serializes the document.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self, pretty: bool) -> CoreResult<String> {
        let text = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(text)
    }
}

impl Vault {
    /// Snapshots clients, orders and custom fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying store fails.
    pub fn export_all(&self) -> CoreResult<ExportDocument> {
        Ok(ExportDocument {
            clients: self.clients().all()?,
            orders: self.orders().all()?,
            custom_fields: self.custom_fields().all()?,
        })
    }

    /// Snapshots the data buckets as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails or serialization fails.
    pub fn export_json(&self) -> CoreResult<String> {
        let document = self.export_all()?;
        info!(
            clients = document.clients.len(),
            orders = document.orders.len(),
            custom_fields = document.custom_fields.len(),
            "exported vault"
        );
        document.to_json(true)
    }

    /// Replaces clients, orders and custom fields with the document's
    /// contents, in that order.
    ///
    /// Buckets are written one at a time; a failure part-way leaves the
    /// earlier buckets replaced.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding or a store write fails.
    pub fn import_all(&self, document: &ExportDocument) -> CoreResult<()> {
        self.clients().replace_all(&document.clients)?;
        self.orders().replace_all(&document.orders)?;
        self.custom_fields().replace_all(&document.custom_fields)?;
        info!(
            clients = document.clients.len(),
            orders = document.orders.len(),
            custom_fields = document.custom_fields.len(),
            "imported vault"
        );
        Ok(())
    }

    /// Parses and imports an export document.
    ///
    /// Nothing is written unless the whole document parses.
    ///
    /// # Errors
    ///
    /// See [`ExportDocument::from_json`] and [`Vault::import_all`].
    pub fn import_json(&self, text: &str) -> CoreResult<ExportDocument> {
        let document = ExportDocument::from_json(text)?;
        self.import_all(&document)?;
        Ok(document)
    }

    /// Removes clients, orders and custom fields. The user is kept.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    pub fn reset_all(&self) -> CoreResult<()> {
        self.clients().clear()?;
        self.orders().clear()?;
        self.custom_fields().clear()?;
        info!("reset all data");
        Ok(())
    }
}
