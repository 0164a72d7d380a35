//! Account commands.

use clientvault_core::{AuthService, Vault};

/// Registers the vault's account.
pub fn register(
    vault: &Vault,
    username: &str,
    password: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let auth = AuthService::new(vault.clone());
    let user = auth.register(username, password)?;

    println!("✓ Registered {}", user.username);
    println!("  Created: {}", user.created_at.to_rfc3339());
    Ok(())
}

/// Checks credentials against the registered account.
pub fn login(
    vault: &Vault,
    username: &str,
    password: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let auth = AuthService::new(vault.clone());
    let user = auth.login(username, password)?;

    println!("✓ Credentials accepted for {}", user.username);
    Ok(())
}
