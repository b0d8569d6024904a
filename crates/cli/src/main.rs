//! Shopwindow CLI - browse and edit the locally mirrored product catalog.
//!
//! # Usage
//!
//! ```bash
//! # Open a session (defaults: user / password, see SHOPWINDOW_USERNAME)
//! sw-cli login -u user -p password
//!
//! # Browse the catalog (first call fetches and mirrors it)
//! sw-cli list
//! sw-cli list --search backpack --category "men's clothing"
//! sw-cli show 7
//!
//! # Edit the local mirror (never written back to the remote API)
//! sw-cli update 7 --title "Travel Backpack" --price 8350.00
//! sw-cli delete 7
//!
//! # Drop the mirror so the next list refetches
//! sw-cli clear
//!
//! sw-cli logout
//! ```
//!
//! # Commands
//!
//! - `login` / `logout` - session gate
//! - `list` - full collection with optional search and category filter
//! - `show` - single product by id
//! - `update` / `delete` - optimistic local mutations
//! - `clear` - reset the mirror

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::print_stdout)]
#![allow(clippy::print_stderr)]

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;

mod commands;

use commands::CliError;

#[derive(Parser)]
#[command(name = "sw-cli")]
#[command(author, version, about = "Shopwindow catalog browser")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Open a session
    Login {
        /// Username to present to the gate
        #[arg(short, long)]
        username: String,
        /// Password to present to the gate
        #[arg(short, long)]
        password: String,
    },
    /// End the session
    Logout,
    /// List the product collection
    List {
        /// Case-insensitive title substring
        #[arg(short, long, default_value = "")]
        search: String,
        /// Exact category name
        #[arg(short, long)]
        category: Option<String>,
    },
    /// Show a single product
    Show {
        /// Product identifier
        id: u64,
    },
    /// Update fields of a product in the local mirror
    Update {
        /// Product identifier
        id: u64,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        price: Option<Decimal>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        image: Option<String>,
    },
    /// Delete a product from the local mirror
    Delete {
        /// Product identifier
        id: u64,
    },
    /// Drop the local mirror; the next list refetches remotely
    Clear,
}

#[tokio::main]
async fn main() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "shopwindow_catalog=warn,shopwindow_cli=info".into());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();

    if let Err(err) = run(cli.command).await {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

async fn run(command: Commands) -> Result<(), CliError> {
    match command {
        Commands::Login { username, password } => commands::session::login(&username, &password).await,
        Commands::Logout => commands::session::logout().await,
        Commands::List { search, category } => {
            commands::products::list(&search, category.as_deref()).await
        }
        Commands::Show { id } => commands::products::show(id).await,
        Commands::Update {
            id,
            title,
            price,
            description,
            category,
            image,
        } => {
            let patch = shopwindow_core::ProductPatch {
                title,
                price,
                description,
                category,
                image,
            };
            commands::products::update(id, patch).await
        }
        Commands::Delete { id } => commands::products::delete(id).await,
        Commands::Clear => commands::products::clear().await,
    }
}
