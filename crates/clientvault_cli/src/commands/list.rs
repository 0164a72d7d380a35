//! Record listing commands.

use clientvault_core::{EntityType, Vault};

/// Lists clients matching `search`.
pub fn clients(vault: &Vault, search: &str) -> Result<(), Box<dyn std::error::Error>> {
    let clients = vault.search_clients(search)?;
    if clients.is_empty() {
        println!("No clients found");
        return Ok(());
    }

    for client in &clients {
        println!("{}  {}", client.id, client.name);
        println!("    {} | {}", client.email, client.phone);
        for (field, value) in &client.custom_fields {
            println!("    {field}: {value}");
        }
    }
    println!();
    println!("{} client(s)", clients.len());
    Ok(())
}

/// Lists orders matching `search`.
pub fn orders(vault: &Vault, search: &str) -> Result<(), Box<dyn std::error::Error>> {
    let orders = vault.search_orders(search)?;
    if orders.is_empty() {
        println!("No orders found");
        return Ok(());
    }

    for order in &orders {
        println!(
            "{}  {:<12} {:>10.2}  {}",
            order.order_number,
            order.status.as_str(),
            order.total,
            vault.client_name(&order.client_id)?
        );
        for item in &order.items {
            println!(
                "    {} x{} @ {:.2} = {:.2}",
                item.name,
                item.quantity,
                item.price,
                item.subtotal()
            );
        }
    }
    println!();
    println!("{} order(s)", orders.len());
    Ok(())
}

/// Lists custom field definitions, optionally for one record type.
pub fn fields(vault: &Vault, entity: Option<EntityType>) -> Result<(), Box<dyn std::error::Error>> {
    let fields = match entity {
        Some(entity) => vault.custom_fields_for(entity)?,
        None => vault.custom_fields().all()?,
    };
    if fields.is_empty() {
        println!("No custom fields defined");
        return Ok(());
    }

    for field in &fields {
        let required = if field.required { " (required)" } else { "" };
        println!(
            "{}  {} [{} on {}]{}",
            field.id, field.name, field.field_type, field.entity_type, required
        );
        if !field.options().is_empty() {
            println!("    options: {}", field.options().join(", "));
        }
        if let Some(description) = &field.description {
            println!("    {description}");
        }
    }
    Ok(())
}
