//! SmartBuy CLI - Database migrations and management tools.
//!
//! # Usage
//!
//! ```bash
//! # Run database migrations (includes the sessions table)
//! smartbuy-cli migrate
//!
//! # Seed the database with a demo catalog
//! smartbuy-cli seed
//!
//! # Create a customer account
//! smartbuy-cli customer create -e jane@example.com -f "Jane Doe" -p <password>
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run database migrations
//! - `seed` - Seed the database with a demo catalog
//! - `customer create` - Create customer accounts

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "smartbuy-cli")]
#[command(author, version, about = "SmartBuy CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Seed the database with a demo catalog
    Seed,
    /// Manage customer accounts
    Customer {
        #[command(subcommand)]
        action: CustomerAction,
    },
}

#[derive(Subcommand)]
enum CustomerAction {
    /// Create a new customer account
    Create {
        /// Customer email address
        #[arg(short, long)]
        email: String,

        /// Customer display name
        #[arg(short, long)]
        full_name: String,

        /// Account password (min 8 characters)
        #[arg(short, long)]
        password: String,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Seed => commands::seed::run().await?,
        Commands::Customer { action } => match action {
            CustomerAction::Create {
                email,
                full_name,
                password,
            } => {
                commands::customer::create(&email, &full_name, &password).await?;
            }
        },
    }
    Ok(())
}
