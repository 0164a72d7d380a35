//! Lookups used by list views.

use crate::error::CoreResult;
use crate::model::{Client, CustomField, EntityType, Order, RecordId};
use crate::vault::Vault;

/// Name shown for orders whose client no longer exists.
pub const UNKNOWN_CLIENT: &str = "Unknown Client";

fn name_of<'a>(clients: &'a [Client], id: &RecordId) -> &'a str {
    clients
        .iter()
        .find(|c| &c.id == id)
        .map_or(UNKNOWN_CLIENT, |c| c.name.as_str())
}

impl Vault {
    /// Returns clients whose name, email or phone contains `term`, ignoring
    /// case. An empty term returns every client; whitespace is matched as
    /// typed.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying store fails.
    pub fn search_clients(&self, term: &str) -> CoreResult<Vec<Client>> {
        let needle = term.to_lowercase();
        let clients = self.clients().all()?;
        if needle.is_empty() {
            return Ok(clients);
        }
        Ok(clients.into_iter().filter(|c| c.matches(&needle)).collect())
    }

    /// Returns orders whose number or client name contains `term`, ignoring
    /// case. An empty term returns every order; whitespace is matched as
    /// typed.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying store fails.
    pub fn search_orders(&self, term: &str) -> CoreResult<Vec<Order>> {
        let needle = term.to_lowercase();
        let orders = self.orders().all()?;
        if needle.is_empty() {
            return Ok(orders);
        }

        let clients = self.clients().all()?;
        Ok(orders
            .into_iter()
            .filter(|o| {
                o.order_number.to_lowercase().contains(&needle)
                    || name_of(&clients, &o.client_id)
                        .to_lowercase()
                        .contains(&needle)
            })
            .collect())
    }

    /// Returns the client's name, or [`UNKNOWN_CLIENT`] if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying store fails.
    pub fn client_name(&self, client_id: &RecordId) -> CoreResult<String> {
        Ok(name_of(&self.clients().all()?, client_id).to_string())
    }

    /// Returns a client's orders.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying store fails.
    pub fn client_orders(&self, client_id: &RecordId) -> CoreResult<Vec<Order>> {
        self.orders().for_client(client_id)
    }

    /// Returns the custom field definitions that apply to `entity`.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying store fails.
    pub fn custom_fields_for(&self, entity: EntityType) -> CoreResult<Vec<CustomField>> {
        Ok(self
            .custom_fields()
            .all()?
            .into_iter()
            .filter(|f| f.applies_to(entity))
            .collect())
    }
}
