//! Validated create/update/delete paths for clients, orders and custom fields.
//!
//! These wrap the raw repositories with the checks a form submission needs:
//! required fields, custom value types, and order totals that are always
//! recomputed from the items.

use crate::error::{CoreError, CoreResult};
use crate::model::{
    Client, CustomField, CustomValues, EntityType, FieldType, Order, OrderItem, OrderStatus,
    RecordId,
};
use crate::validation;
use crate::vault::Vault;
use chrono::Utc;
use tracing::info;

/// Input for a new client.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewClient {
    /// Display name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Contact phone.
    pub phone: String,
    /// Street address.
    pub address: Option<String>,
    /// City.
    pub city: Option<String>,
    /// State or region.
    pub state: Option<String>,
    /// Postal code.
    pub zip_code: Option<String>,
    /// Free-form notes.
    pub notes: Option<String>,
    /// Custom field values.
    pub custom_fields: CustomValues,
}

impl NewClient {
    /// Creates input with the three required fields.
    #[must_use]
    pub fn new(name: impl Into<String>, email: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            phone: phone.into(),
            ..Self::default()
        }
    }
}

/// Input for a new order.
///
/// There is deliberately no total: it is always computed from `items`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewOrder {
    /// Owning client.
    pub client_id: RecordId,
    /// Order number; generated when `None`.
    pub order_number: Option<String>,
    /// Initial status.
    pub status: OrderStatus,
    /// Order lines.
    pub items: Vec<OrderItem>,
    /// Free-form notes.
    pub notes: Option<String>,
    /// Custom field values.
    pub custom_fields: CustomValues,
}

impl NewOrder {
    /// Creates input for `client_id` with the given lines.
    #[must_use]
    pub fn new(client_id: RecordId, items: Vec<OrderItem>) -> Self {
        Self {
            client_id,
            items,
            ..Self::default()
        }
    }
}

/// Input for a new custom field definition.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCustomField {
    /// Label.
    pub name: String,
    /// Declared value type.
    pub field_type: FieldType,
    /// Record type the field attaches to.
    pub entity_type: EntityType,
    /// Whether a value is mandatory.
    pub required: bool,
    /// Options for select fields.
    pub options: Vec<String>,
    /// Help text.
    pub description: Option<String>,
}

impl NewCustomField {
    /// Creates an optional field with no options.
    #[must_use]
    pub fn new(name: impl Into<String>, field_type: FieldType, entity_type: EntityType) -> Self {
        Self {
            name: name.into(),
            field_type,
            entity_type,
            required: false,
            options: Vec::new(),
            description: None,
        }
    }
}

/// Default order number: `ORD-` and the last six digits of the current
/// millisecond timestamp.
#[must_use]
pub fn generate_order_number() -> String {
    let millis = Utc::now().timestamp_millis().to_string();
    let tail = &millis[millis.len().saturating_sub(6)..];
    format!("ORD-{tail}")
}

impl Vault {
    fn field_definitions(&self) -> CoreResult<Vec<CustomField>> {
        self.custom_fields().all()
    }

    fn prepare_client(&self, client: &mut Client) -> CoreResult<()> {
        client.name = client.name.trim().to_string();
        client.email = client.email.trim().to_string();
        client.phone = client.phone.trim().to_string();

        let fields = self.field_definitions()?;
        validation::normalize_custom_values(
            EntityType::Client,
            &fields,
            &mut client.custom_fields,
        );
        validation::validate_client(client, &fields)
    }

    /// Validates and stores a new client.
    ///
    /// # Errors
    ///
    /// Returns a validation error before writing anything if the input is
    /// invalid, or a storage error if the write fails.
    pub fn create_client(&self, input: NewClient) -> CoreResult<Client> {
        let now = Utc::now();
        let mut client = Client {
            id: RecordId::new(),
            name: input.name,
            email: input.email,
            phone: input.phone,
            address: input.address,
            city: input.city,
            state: input.state,
            zip_code: input.zip_code,
            notes: input.notes,
            created_at: now,
            updated_at: now,
            custom_fields: input.custom_fields,
        };
        self.prepare_client(&mut client)?;

        self.clients().add(client.clone())?;
        info!(id = %client.id, "client created");
        Ok(client)
    }

    /// Validates and replaces an existing client, bumping `updated_at`.
    ///
    /// Contact fields are trimmed and legacy custom values converted to their
    /// field's type, as on create. Returns `false` if no client has that ID.
    ///
    /// # Errors
    ///
    /// Returns a validation error before writing anything if the client is
    /// invalid, or a storage error if the write fails.
    pub fn update_client(&self, mut client: Client) -> CoreResult<bool> {
        self.prepare_client(&mut client)?;
        client.updated_at = Utc::now();
        self.clients().update(client)
    }

    /// Deletes a client. Its orders are kept.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn delete_client(&self, id: &RecordId) -> CoreResult<bool> {
        self.clients().remove(id)
    }

    /// Validates and stores a new order with a computed total.
    ///
    /// # Errors
    ///
    /// Returns a validation error before writing anything if the input is
    /// invalid, or a storage error if the write fails.
    pub fn create_order(&self, input: NewOrder) -> CoreResult<Order> {
        let now = Utc::now();
        let mut order = Order {
            id: RecordId::new(),
            client_id: input.client_id,
            order_number: input
                .order_number
                .filter(|n| !n.trim().is_empty())
                .unwrap_or_else(generate_order_number),
            status: input.status,
            items: input.items,
            total: 0.0,
            notes: input.notes,
            created_at: now,
            updated_at: now,
            custom_fields: input.custom_fields,
        };
        self.prepare_order(&mut order)?;

        self.orders().add(order.clone())?;
        info!(id = %order.id, total = order.total, "order created");
        Ok(order)
    }

    /// Validates and replaces an existing order.
    ///
    /// The stored total is recomputed from the items regardless of what the
    /// caller passed, and `updated_at` is bumped. Returns `false` if no order
    /// has that ID.
    ///
    /// # Errors
    ///
    /// Returns a validation error before writing anything if the order is
    /// invalid, or a storage error if the write fails.
    pub fn update_order(&self, mut order: Order) -> CoreResult<bool> {
        self.prepare_order(&mut order)?;
        order.updated_at = Utc::now();
        self.orders().update(order)
    }

    /// Deletes an order.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn delete_order(&self, id: &RecordId) -> CoreResult<bool> {
        self.orders().remove(id)
    }

    fn prepare_order(&self, order: &mut Order) -> CoreResult<()> {
        for item in &mut order.items {
            item.name = item.name.trim().to_string();
            if item.id.is_blank() {
                item.id = RecordId::new();
            }
        }
        let fields = self.field_definitions()?;
        validation::normalize_custom_values(
            EntityType::Order,
            &fields,
            &mut order.custom_fields,
        );
        validation::validate_order(order, &fields)?;

        order.recompute_total();
        if !order.total.is_finite() {
            return Err(CoreError::validation("order total is too large"));
        }
        Ok(())
    }

    /// Validates and stores a new custom field definition.
    ///
    /// Select options are trimmed and blanks dropped; other types discard
    /// their options.
    ///
    /// # Errors
    ///
    /// Returns a validation error before writing anything if the definition is
    /// invalid, or a storage error if the write fails.
    pub fn create_custom_field(&self, input: NewCustomField) -> CoreResult<CustomField> {
        let mut field = CustomField {
            id: RecordId::new(),
            name: input.name.trim().to_string(),
            field_type: input.field_type,
            entity_type: input.entity_type,
            required: input.required,
            options: Some(input.options),
            description: input.description.filter(|d| !d.trim().is_empty()),
            created_at: Utc::now(),
        };
        validation::normalize_options(&mut field);
        validation::validate_custom_field(&field)?;

        self.custom_fields().add(field.clone())?;
        info!(id = %field.id, field_type = %field.field_type, "custom field created");
        Ok(field)
    }

    /// Validates and replaces an existing custom field definition.
    ///
    /// Returns `false` if no field has that ID.
    ///
    /// # Errors
    ///
    /// Returns a validation error before writing anything if the definition is
    /// invalid, or a storage error if the write fails.
    pub fn update_custom_field(&self, mut field: CustomField) -> CoreResult<bool> {
        validation::normalize_options(&mut field);
        validation::validate_custom_field(&field)?;
        self.custom_fields().update(field)
    }

    /// Deletes a custom field definition. Stored values are left in place.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn delete_custom_field(&self, id: &RecordId) -> CoreResult<bool> {
        self.custom_fields().remove(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::VaultConfig;
    use crate::model::CustomFieldValue;

    fn vault() -> Vault {
        Vault::in_memory(&VaultConfig::default()).unwrap()
    }

    #[test]
    fn order_number_format() {
        let number = generate_order_number();
        assert!(number.starts_with("ORD-"));
        assert_eq!(number.len(), 10);
        assert!(number[4..].chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn create_client_assigns_id_and_timestamps() {
        let vault = vault();
        let client = vault
            .create_client(NewClient::new(" Acme ", "ops@acme.test", "555-0100"))
            .unwrap();

        assert_eq!(client.name, "Acme");
        assert_eq!(client.created_at, client.updated_at);
        assert_eq!(vault.clients().find(&client.id).unwrap(), Some(client));
    }

    #[test]
    fn create_client_rejects_blank_phone_without_writing() {
        let vault = vault();
        let err = vault
            .create_client(NewClient::new("Acme", "ops@acme.test", " "))
            .unwrap_err();

        assert!(err.is_validation());
        assert!(!vault.buckets().is_set(crate::Bucket::Clients).unwrap());
    }

    #[test]
    fn create_order_computes_total() {
        let vault = vault();
        let order = vault
            .create_order(NewOrder::new(
                "client-1".into(),
                vec![OrderItem::new("Widget", 2, 10.0), OrderItem::new("Bolt", 1, 5.0)],
            ))
            .unwrap();

        assert_eq!(order.total, 25.0);
        assert!(order.order_number.starts_with("ORD-"));
        assert_eq!(order.status, OrderStatus::Pending);
    }

    #[test]
    fn update_order_ignores_caller_total() {
        let vault = vault();
        let mut order = vault
            .create_order(NewOrder::new("c".into(), vec![OrderItem::new("A", 1, 1.0)]))
            .unwrap();

        order.items = vec![OrderItem::new("Widget", 2, 10.0), OrderItem::new("Bolt", 1, 5.0)];
        order.total = 999.0;
        assert!(vault.update_order(order.clone()).unwrap());

        let stored = vault.orders().find(&order.id).unwrap().unwrap();
        assert_eq!(stored.total, 25.0);
        assert!(stored.updated_at >= order.updated_at);
    }

    #[test]
    fn create_order_requires_items_and_client() {
        let vault = vault();
        assert!(vault
            .create_order(NewOrder::new("c".into(), Vec::new()))
            .unwrap_err()
            .is_validation());
        assert!(vault
            .create_order(NewOrder::new("".into(), vec![OrderItem::new("A", 1, 1.0)]))
            .unwrap_err()
            .is_validation());
        assert_eq!(vault.orders().count().unwrap(), 0);
    }

    #[test]
    fn blank_item_ids_are_assigned() {
        let vault = vault();
        let mut item = OrderItem::new("A", 1, 3.0);
        item.id = "".into();

        let order = vault
            .create_order(NewOrder::new("c".into(), vec![item]))
            .unwrap();
        assert!(!order.items[0].id.is_blank());
    }

    #[test]
    fn select_field_without_options_rejected() {
        let vault = vault();
        let err = vault
            .create_custom_field(NewCustomField::new(
                "Tier",
                FieldType::Select,
                EntityType::Client,
            ))
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(vault.custom_fields().count().unwrap(), 0);
    }

    #[test]
    fn required_custom_field_enforced_on_clients() {
        let vault = vault();
        let mut input = NewCustomField::new("Tier", FieldType::Select, EntityType::Client);
        input.required = true;
        input.options = vec!["gold".into(), "silver".into()];
        let tier = vault.create_custom_field(input).unwrap();

        assert!(vault
            .create_client(NewClient::new("Acme", "a@b.c", "1"))
            .unwrap_err()
            .is_validation());

        let mut client = NewClient::new("Acme", "a@b.c", "1");
        client
            .custom_fields
            .insert(tier.id.clone(), CustomFieldValue::Select("gold".into()));
        assert!(vault.create_client(client).is_ok());

        // Order forms don't see client fields.
        assert!(vault
            .create_order(NewOrder::new("c".into(), vec![OrderItem::new("A", 1, 1.0)]))
            .is_ok());
    }

    #[test]
    fn deleting_field_keeps_values() {
        let vault = vault();
        let field = vault
            .create_custom_field(NewCustomField::new("Since", FieldType::Number, EntityType::Client))
            .unwrap();

        let mut input = NewClient::new("Acme", "a@b.c", "1");
        input
            .custom_fields
            .insert(field.id.clone(), CustomFieldValue::Number(2019.0));
        let client = vault.create_client(input).unwrap();

        assert!(vault.delete_custom_field(&field.id).unwrap());
        let stored = vault.clients().find(&client.id).unwrap().unwrap();
        assert_eq!(
            stored.custom_fields.get(&field.id),
            Some(&CustomFieldValue::Number(2019.0))
        );
    }

    #[test]
    fn update_missing_client_returns_false() {
        let vault = vault();
        let mut client = vault
            .create_client(NewClient::new("Acme", "a@b.c", "1"))
            .unwrap();
        client.id = RecordId::new();
        assert!(!vault.update_client(client).unwrap());
    }

    #[test]
    fn update_client_trims_contact_fields() {
        let vault = vault();
        let mut client = vault
            .create_client(NewClient::new("Acme", "a@b.c", "1"))
            .unwrap();

        client.name = "  Acme Corp ".into();
        client.email = " ops@acme.test\n".into();
        client.phone = "\t555-0100 ".into();
        assert!(vault.update_client(client.clone()).unwrap());

        let stored = vault.clients().find(&client.id).unwrap().unwrap();
        assert_eq!(stored.name, "Acme Corp");
        assert_eq!(stored.email, "ops@acme.test");
        assert_eq!(stored.phone, "555-0100");
    }

    #[test]
    fn non_finite_value_under_unknown_field_rejected() {
        let vault = vault();
        let existing = vault
            .create_client(NewClient::new("Existing", "e@x.test", "1"))
            .unwrap();

        let mut input = NewClient::new("Acme", "a@b.c", "1");
        input
            .custom_fields
            .insert("no-such-field".into(), CustomFieldValue::Number(f64::NAN));
        assert!(vault.create_client(input).unwrap_err().is_validation());

        let mut order = NewOrder::new(existing.id.clone(), vec![OrderItem::new("A", 1, 1.0)]);
        order
            .custom_fields
            .insert("no-such-field".into(), CustomFieldValue::Number(f64::INFINITY));
        assert!(vault.create_order(order).unwrap_err().is_validation());

        assert_eq!(vault.clients().all().unwrap(), vec![existing]);
        assert_eq!(vault.orders().count().unwrap(), 0);
    }

    #[test]
    fn overflowing_order_total_rejected() {
        let vault = vault();
        let existing = vault
            .create_order(NewOrder::new("c".into(), vec![OrderItem::new("A", 1, 1.0)]))
            .unwrap();

        let err = vault
            .create_order(NewOrder::new("c".into(), vec![OrderItem::new("Huge", 2, 1e308)]))
            .unwrap_err();
        assert!(err.is_validation());

        let mut grown = existing.clone();
        grown.items = vec![OrderItem::new("Huge", 1, 1e308), OrderItem::new("More", 1, 1e308)];
        assert!(vault.update_order(grown).unwrap_err().is_validation());

        assert_eq!(vault.orders().all().unwrap(), vec![existing]);
    }

    #[test]
    fn legacy_text_value_converted_on_update() {
        let vault = vault();
        let since = vault
            .create_custom_field(NewCustomField::new("Since", FieldType::Number, EntityType::Client))
            .unwrap();
        let mut client = vault
            .create_client(NewClient::new("Acme", "a@b.c", "1"))
            .unwrap();

        client
            .custom_fields
            .insert(since.id.clone(), CustomFieldValue::Text("2019".into()));
        assert!(vault.update_client(client.clone()).unwrap());

        let stored = vault.clients().find(&client.id).unwrap().unwrap();
        assert_eq!(
            stored.custom_fields.get(&since.id),
            Some(&CustomFieldValue::Number(2019.0))
        );
    }
}
