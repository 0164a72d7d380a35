//! Dashboard statistics.

use crate::error::CoreResult;
use crate::model::{Client, Order, OrderStatus, RecordId};
use crate::vault::Vault;
use serde::Serialize;

/// Number of clients listed in [`DashboardStats::top_clients`].
pub const TOP_CLIENT_LIMIT: usize = 5;

/// Revenue attributed to one client.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopClient {
    /// Client name at the time of computation.
    pub name: String,
    /// Number of orders placed.
    pub orders: usize,
    /// Sum of those orders' totals.
    pub revenue: f64,
}

/// Summary figures shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    /// Number of clients.
    pub total_clients: usize,
    /// Number of orders.
    pub total_orders: usize,
    /// Sum of every order total.
    pub total_revenue: f64,
    /// Orders that are pending or processing.
    pub pending_orders: usize,
    /// Completed orders.
    pub completed_orders: usize,
    /// Highest-revenue clients, best first.
    pub top_clients: Vec<TopClient>,
}

impl DashboardStats {
    /// Computes statistics from full collections.
    ///
    /// Orders whose client no longer exists still count toward the totals
    /// but are left out of `top_clients`. Clients with equal revenue keep the
    /// order in which their first order appears.
    #[must_use]
    pub fn compute(clients: &[Client], orders: &[Order]) -> Self {
        let mut top_clients: Vec<TopClient> = Vec::new();
        // Parallel to `top_clients`: the client ID each entry belongs to.
        let mut owners: Vec<&RecordId> = Vec::new();

        for order in orders {
            let Some(client) = clients.iter().find(|c| c.id == order.client_id) else {
                continue;
            };
            match owners.iter().position(|id| *id == &client.id) {
                Some(slot) => {
                    let entry: &mut TopClient = &mut top_clients[slot];
                    entry.orders += 1;
                    entry.revenue += order.total;
                }
                None => {
                    owners.push(&client.id);
                    top_clients.push(TopClient {
                        name: client.name.clone(),
                        orders: 1,
                        revenue: order.total,
                    });
                }
            }
        }

        top_clients.sort_by(|a, b| b.revenue.total_cmp(&a.revenue));
        top_clients.truncate(TOP_CLIENT_LIMIT);

        Self {
            total_clients: clients.len(),
            total_orders: orders.len(),
            total_revenue: orders.iter().map(|o| o.total).sum(),
            pending_orders: orders.iter().filter(|o| o.status.is_open()).count(),
            completed_orders: orders
                .iter()
                .filter(|o| o.status == OrderStatus::Completed)
                .count(),
            top_clients,
        }
    }
}

impl Vault {
    /// Computes dashboard statistics over the current clients and orders.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying store fails.
    pub fn dashboard_stats(&self) -> CoreResult<DashboardStats> {
        let clients = self.clients().all()?;
        let orders = self.orders().all()?;
        Ok(DashboardStats::compute(&clients, &orders))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CustomValues;
    use chrono::Utc;

    fn client(id: &str, name: &str) -> Client {
        let now = Utc::now();
        Client {
            id: id.into(),
            name: name.into(),
            email: format!("{id}@example.test"),
            phone: "555".into(),
            address: None,
            city: None,
            state: None,
            zip_code: None,
            notes: None,
            created_at: now,
            updated_at: now,
            custom_fields: CustomValues::new(),
        }
    }

    fn order(client_id: &str, total: f64, status: OrderStatus) -> Order {
        let now = Utc::now();
        Order {
            id: RecordId::new(),
            client_id: client_id.into(),
            order_number: "ORD-000001".into(),
            status,
            items: Vec::new(),
            total,
            notes: None,
            created_at: now,
            updated_at: now,
            custom_fields: CustomValues::new(),
        }
    }

    #[test]
    fn empty_collections() {
        let stats = DashboardStats::compute(&[], &[]);
        assert_eq!(stats.total_clients, 0);
        assert_eq!(stats.total_revenue, 0.0);
        assert!(stats.top_clients.is_empty());
    }

    #[test]
    fn revenue_and_ranking() {
        let clients = [client("a", "A"), client("b", "B")];
        let orders = [
            order("a", 100.0, OrderStatus::Pending),
            order("a", 50.0, OrderStatus::Completed),
            order("b", 30.0, OrderStatus::Processing),
        ];

        let stats = DashboardStats::compute(&clients, &orders);
        assert_eq!(stats.total_clients, 2);
        assert_eq!(stats.total_orders, 3);
        assert_eq!(stats.total_revenue, 180.0);
        assert_eq!(stats.pending_orders, 2);
        assert_eq!(stats.completed_orders, 1);
        assert_eq!(
            stats.top_clients,
            vec![
                TopClient { name: "A".into(), orders: 2, revenue: 150.0 },
                TopClient { name: "B".into(), orders: 1, revenue: 30.0 },
            ]
        );
    }

    #[test]
    fn dangling_orders_count_toward_totals_only() {
        let clients = [client("a", "A")];
        let orders = [
            order("a", 10.0, OrderStatus::Cancelled),
            order("gone", 90.0, OrderStatus::Delivered),
        ];

        let stats = DashboardStats::compute(&clients, &orders);
        assert_eq!(stats.total_revenue, 100.0);
        assert_eq!(stats.pending_orders, 0);
        assert_eq!(stats.top_clients.len(), 1);
        assert_eq!(stats.top_clients[0].revenue, 10.0);
    }

    #[test]
    fn ties_keep_first_encounter_order_and_truncate() {
        let clients: Vec<_> = ["c1", "c2", "c3", "c4", "c5", "c6", "c7"]
            .iter()
            .map(|id| client(id, &id.to_uppercase()))
            .collect();
        let orders: Vec<_> = ["c3", "c1", "c7", "c2", "c6", "c4", "c5"]
            .iter()
            .map(|id| order(id, 20.0, OrderStatus::Pending))
            .collect();

        let stats = DashboardStats::compute(&clients, &orders);
        let names: Vec<_> = stats.top_clients.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["C3", "C1", "C7", "C2", "C6"]);
    }

    #[test]
    fn serializes_camel_case() {
        let stats = DashboardStats::compute(&[client("a", "A")], &[order("a", 1.5, OrderStatus::Completed)]);
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["totalRevenue"], 1.5);
        assert_eq!(json["topClients"][0]["orders"], 1);
    }
}
