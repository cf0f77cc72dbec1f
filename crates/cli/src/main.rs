//! Go Marketplace CLI - Drive the local shopping cart from a terminal.
//!
//! # Usage
//!
//! ```bash
//! # Show the cart
//! gm-cli cart list
//!
//! # Add a product (quantity starts at 1, re-adding increments)
//! gm-cli cart add --id 1 --title "Shirt" --image-url http://x/1.png --price 29.90
//!
//! # Adjust quantities
//! gm-cli cart increment 1
//! gm-cli cart decrement 1
//!
//! # Item count and total
//! gm-cli cart summary
//!
//! # Show the configured theme palette
//! gm-cli theme
//! ```
//!
//! # Commands
//!
//! - `cart` - List and mutate the persisted cart
//! - `theme` - Print theme colors
//!
//! Configuration comes from `GO_MARKETPLACE_*` environment variables (see
//! `go_marketplace_storefront::config`).

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use go_marketplace_core::Price;
use go_marketplace_storefront::{AppState, StorefrontConfig};

mod commands;

#[derive(Parser)]
#[command(name = "gm-cli")]
#[command(author, version, about = "Go Marketplace cart tools")]
struct Cli {
    /// Print output as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List and mutate the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Print the theme palette
    Theme {
        /// Show the theme after toggling instead of the configured one
        #[arg(long)]
        toggle: bool,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Show all line items
    List,
    /// Show item count and total
    Summary,
    /// Add a product to the cart
    Add {
        /// Product identifier
        #[arg(long)]
        id: String,

        /// Display title
        #[arg(long)]
        title: String,

        /// Image URL
        #[arg(long, default_value = "")]
        image_url: String,

        /// Unit price (e.g. 29.90)
        #[arg(long)]
        price: Price,
    },
    /// Raise a product's quantity by one
    Increment {
        /// Product identifier
        id: String,
    },
    /// Lower a product's quantity by one
    Decrement {
        /// Product identifier
        id: String,
    },
}

#[tokio::main]
async fn main() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "go_marketplace_storefront=info,gm_cli=info".into());
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = StorefrontConfig::from_env()?;
    let state = AppState::new(config);
    let format = if cli.json {
        commands::OutputFormat::Json
    } else {
        commands::OutputFormat::Text
    };

    match cli.command {
        Commands::Cart { action } => {
            state.provide_file_cart().await?;
            match action {
                CartAction::List => commands::cart::list(&state, format)?,
                CartAction::Summary => commands::cart::summary(&state, format)?,
                CartAction::Add {
                    id,
                    title,
                    image_url,
                    price,
                } => commands::cart::add(&state, format, &id, &title, &image_url, price).await?,
                CartAction::Increment { id } => {
                    commands::cart::increment(&state, format, &id).await?;
                }
                CartAction::Decrement { id } => {
                    commands::cart::decrement(&state, format, &id).await?;
                }
            }
        }
        Commands::Theme { toggle } => {
            if toggle {
                state.toggle_theme();
            }
            commands::theme::show(&state, format)?;
        }
    }
    Ok(())
}
