//! ClientVault CLI
//!
//! Command-line access to a ClientVault data directory.
//!
//! # Commands
//!
//! - `register` / `login` - Create or check the vault's single account
//! - `stats` - Display dashboard statistics
//! - `export` / `import` - Move all records to or from a JSON backup
//! - `reset` - Delete all clients, orders and custom fields
//! - `clients` / `orders` / `fields` - List and search records

mod commands;

use clap::{Parser, Subcommand};
use clientvault_core::{EntityType, Vault, VaultConfig, EXPORT_FILE_NAME};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// ClientVault command-line tools.
#[derive(Parser)]
#[command(name = "clientvault")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the data directory (defaults to $CLIENTVAULT_DATA_DIR or ./clientvault-data)
    #[arg(global = true, short, long)]
    data_dir: Option<PathBuf>,

    /// Enable verbose output
    #[arg(global = true, short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Register the vault's account
    Register {
        /// Login name
        #[arg(short, long)]
        username: String,

        /// Password
        #[arg(short, long)]
        password: String,
    },

    /// Check credentials against the registered account
    Login {
        /// Login name
        #[arg(short, long)]
        username: String,

        /// Password
        #[arg(short, long)]
        password: String,
    },

    /// Display dashboard statistics
    Stats {
        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// Export clients, orders and custom fields to JSON
    Export {
        /// Output file
        #[arg(short, long, default_value = EXPORT_FILE_NAME)]
        output: PathBuf,
    },

    /// Replace all records with the contents of a backup file
    Import {
        /// Backup file produced by `export`
        file: PathBuf,
    },

    /// Delete all clients, orders and custom fields
    Reset {
        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },

    /// List clients
    Clients {
        /// Only show clients whose name, email or phone contains this text
        #[arg(short, long)]
        search: Option<String>,
    },

    /// List orders
    Orders {
        /// Only show orders whose number or client name contains this text
        #[arg(short, long)]
        search: Option<String>,
    },

    /// List custom field definitions
    Fields {
        /// Only show fields for this record type (client, order)
        #[arg(short, long)]
        entity: Option<String>,
    },

    /// Show version information
    Version,
}

fn open_vault(config: &VaultConfig) -> Result<Vault, Box<dyn std::error::Error>> {
    Ok(config.open()?)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut config = VaultConfig::from_env();
    if let Some(dir) = cli.data_dir {
        config = config.data_dir(dir);
    }

    match cli.command {
        Commands::Register { username, password } => {
            commands::auth::register(&open_vault(&config)?, &username, &password)?;
        }
        Commands::Login { username, password } => {
            commands::auth::login(&open_vault(&config)?, &username, &password)?;
        }
        Commands::Stats { format } => {
            commands::stats::run(&open_vault(&config)?, &format)?;
        }
        Commands::Export { output } => {
            commands::transfer::export(&open_vault(&config)?, &output, config.pretty_export)?;
        }
        Commands::Import { file } => {
            commands::transfer::import(&open_vault(&config)?, &file)?;
        }
        Commands::Reset { yes } => {
            if !yes {
                return Err("Refusing to delete all data without --yes".into());
            }
            commands::transfer::reset(&open_vault(&config)?)?;
        }
        Commands::Clients { search } => {
            commands::list::clients(&open_vault(&config)?, search.as_deref().unwrap_or(""))?;
        }
        Commands::Orders { search } => {
            commands::list::orders(&open_vault(&config)?, search.as_deref().unwrap_or(""))?;
        }
        Commands::Fields { entity } => {
            let entity = entity.map(|e| e.parse::<EntityType>()).transpose()?;
            commands::list::fields(&open_vault(&config)?, entity)?;
        }
        Commands::Version => {
            println!("ClientVault CLI v{}", env!("CARGO_PKG_VERSION"));
            println!("ClientVault Core v{}", clientvault_core::VERSION);
        }
    }

    Ok(())
}
