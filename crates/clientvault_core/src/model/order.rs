use super::custom_field::{custom_values, CustomValues};
use super::RecordId;
use crate::error::CoreError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle state of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Received, not started.
    #[default]
    Pending,
    /// Being worked on.
    Processing,
    /// Finished.
    Completed,
    /// Called off.
    Cancelled,
    /// Handed to the client.
    Delivered,
}

impl OrderStatus {
    /// All statuses in declaration order.
    pub const ALL: [OrderStatus; 5] = [
        OrderStatus::Pending,
        OrderStatus::Processing,
        OrderStatus::Completed,
        OrderStatus::Cancelled,
        OrderStatus::Delivered,
    ];

    /// Returns the wire name of the status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Processing => "processing",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
            OrderStatus::Delivered => "delivered",
        }
    }

    /// Pending and processing orders count as open on the dashboard.
    #[must_use]
    pub const fn is_open(self) -> bool {
        matches!(self, OrderStatus::Pending | OrderStatus::Processing)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| CoreError::validation(format!("unknown order status: {s}")))
    }
}

/// One line of an order. Owned by its order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    /// Line ID.
    pub id: RecordId,
    /// Product or service name.
    pub name: String,
    /// Units ordered, at least 1.
    pub quantity: u32,
    /// Unit price, at least 0.
    pub price: f64,
    /// Line description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl OrderItem {
    /// Creates a line with a fresh ID.
    #[must_use]
    pub fn new(name: impl Into<String>, quantity: u32, price: f64) -> Self {
        Self {
            id: RecordId::new(),
            name: name.into(),
            quantity,
            price,
            description: None,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Price times quantity.
    #[must_use]
    pub fn subtotal(&self) -> f64 {
        self.price * f64::from(self.quantity)
    }
}

/// A client's order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Record ID, immutable after creation.
    pub id: RecordId,
    /// Owning client. Not enforced; may dangle after the client is deleted.
    pub client_id: RecordId,
    /// Human-facing order number.
    pub order_number: String,
    /// Lifecycle state.
    pub status: OrderStatus,
    /// Order lines.
    pub items: Vec<OrderItem>,
    /// Sum of line subtotals as of the last save.
    pub total: f64,
    /// Free-form notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last modification time.
    pub updated_at: DateTime<Utc>,
    /// Custom field values keyed by field ID.
    #[serde(default, deserialize_with = "custom_values::deserialize")]
    pub custom_fields: CustomValues,
}

impl Order {
    /// Sum of `price * quantity` over `items`.
    #[must_use]
    pub fn items_total(items: &[OrderItem]) -> f64 {
        items.iter().map(OrderItem::subtotal).sum()
    }

    /// Recomputes `total` from the current items.
    pub fn recompute_total(&mut self) {
        self.total = Self::items_total(&self.items);
    }

    /// Returns `true` if the stored total matches the items.
    #[must_use]
    pub fn total_is_consistent(&self) -> bool {
        (self.total - Self::items_total(&self.items)).abs() < 1e-9
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subtotal_and_total() {
        let items = vec![OrderItem::new("Widget", 2, 10.0), OrderItem::new("Bolt", 1, 5.0)];
        assert_eq!(items[0].subtotal(), 20.0);
        assert_eq!(Order::items_total(&items), 25.0);
    }

    #[test]
    fn status_wire_names_and_open_set() {
        let json = serde_json::to_string(&OrderStatus::Cancelled).unwrap();
        assert_eq!(json, "\"cancelled\"");
        assert_eq!("DELIVERED".parse::<OrderStatus>().unwrap(), OrderStatus::Delivered);

        let open: Vec<_> = OrderStatus::ALL.into_iter().filter(|s| s.is_open()).collect();
        assert_eq!(open, vec![OrderStatus::Pending, OrderStatus::Processing]);
    }

    #[test]
    fn order_deserializes_without_custom_fields() {
        let json = r#"{
            "id": "1700000000000",
            "clientId": "1699999999999",
            "orderNumber": "ORD-000001",
            "status": "pending",
            "items": [{"id": "1", "name": "Consulting", "quantity": 3, "price": 120}],
            "total": 360,
            "createdAt": "2024-01-02T03:04:05.000Z",
            "updatedAt": "2024-01-02T03:04:05.000Z"
        }"#;

        let order: Order = serde_json::from_str(json).unwrap();
        assert!(order.custom_fields.is_empty());
        assert!(order.total_is_consistent());
        assert_eq!(order.items[0].description, None);
    }
}
