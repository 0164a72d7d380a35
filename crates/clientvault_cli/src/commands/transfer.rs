//! Export, import and reset commands.

use clientvault_core::Vault;
use std::fs;
use std::path::Path;
use tracing::info;

/// Writes every client, order and custom field to `output`.
pub fn export(vault: &Vault, output: &Path, pretty: bool) -> Result<(), Box<dyn std::error::Error>> {
    let document = vault.export_all()?;
    fs::write(output, document.to_json(pretty)?)?;

    println!("✓ Export written to {}", output.display());
    println!("  Clients:       {}", document.clients.len());
    println!("  Orders:        {}", document.orders.len());
    println!("  Custom fields: {}", document.custom_fields.len());
    Ok(())
}

/// Replaces all records with the contents of `input`.
pub fn import(vault: &Vault, input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    info!("Importing from {:?}", input);
    let text = fs::read_to_string(input)?;
    let document = vault.import_json(&text)?;

    println!("✓ Import complete");
    println!("  Clients:       {}", document.clients.len());
    println!("  Orders:        {}", document.orders.len());
    println!("  Custom fields: {}", document.custom_fields.len());
    Ok(())
}

/// Deletes all clients, orders and custom fields.
pub fn reset(vault: &Vault) -> Result<(), Box<dyn std::error::Error>> {
    vault.reset_all()?;
    println!("✓ All clients, orders and custom fields deleted");
    Ok(())
}
