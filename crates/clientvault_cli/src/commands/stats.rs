//! Stats command implementation.

use clientvault_core::{DashboardStats, Vault};
use std::fmt::Write;

/// Runs the stats command.
pub fn run(vault: &Vault, format: &str) -> Result<(), Box<dyn std::error::Error>> {
    let stats = vault.dashboard_stats()?;

    match format {
        "json" => {
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
        _ => {
            print!("{}", render_text(&stats));
        }
    }

    Ok(())
}

fn render_text(stats: &DashboardStats) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Dashboard");
    let _ = writeln!(out, "  Clients:          {}", stats.total_clients);
    let _ = writeln!(out, "  Orders:           {}", stats.total_orders);
    let _ = writeln!(out, "  Revenue:          {:.2}", stats.total_revenue);
    let _ = writeln!(out, "  Pending orders:   {}", stats.pending_orders);
    let _ = writeln!(out, "  Completed orders: {}", stats.completed_orders);

    if stats.top_clients.is_empty() {
        return out;
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "Top clients");
    for (rank, client) in stats.top_clients.iter().enumerate() {
        let _ = writeln!(
            out,
            "  {}. {} - {} order(s), {:.2}",
            rank + 1,
            client.name,
            client.orders,
            client.revenue
        );
    }
    out
}
