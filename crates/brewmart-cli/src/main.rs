mod commands;
mod render;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "brewmart")]
#[command(about = "Browse the Brewmart coffee catalog from the terminal")]
struct Cli {
    /// Print the rendered view as JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Load the catalog, scrolling through up to N pages
    Browse {
        /// Number of pages to load
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        pages: u32,

        /// Wallet address to show in the header and load the cart for
        #[arg(long)]
        wallet: Option<String>,
    },
    /// Search the catalog
    Search {
        /// Free-text query
        query: String,
    },
    /// Show the cart summary
    Cart,
    /// Add a product to the cart
    Add {
        product_id: String,

        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        quantity: u32,

        /// Connected wallet address; required to add
        #[arg(long)]
        wallet: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = brewmart_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    tracing::debug!(env = %config.env, api_url = %config.api_url, "configuration loaded");

    let ctx = commands::Context::from_config(&config, cli.json)?;
    match cli.command {
        Commands::Browse { pages, wallet } => commands::run_browse(&ctx, pages, wallet).await,
        Commands::Search { query } => commands::run_search(&ctx, &query).await,
        Commands::Cart => commands::run_cart(&ctx).await,
        Commands::Add {
            product_id,
            quantity,
            wallet,
        } => commands::run_add(&ctx, &product_id, quantity, wallet).await,
    }
}
