//! Shopfront CLI - terminal client for the product catalog.
//!
//! Commands:
//! - `shopfront list` - render one page of the catalog
//! - `shopfront show` - product detail with related items
//! - `shopfront categories` - list the available category filters
//! - `shopfront browse` - interactive storefront session

mod commands;
mod config;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{BrowseArgs, CategoriesArgs, ListArgs, ShowArgs};

/// Shopfront - browse the product catalog from the terminal
#[derive(Parser)]
#[command(name = "shopfront")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Catalog API base URL override
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse a page of the product catalog
    List(ListArgs),

    /// Show a product with its related items
    Show(ShowArgs),

    /// List the available category filters
    Categories(CategoriesArgs),

    /// Interactive storefront session
    Browse(BrowseArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(if cli.verbose { "debug" } else { "warn" })
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let output = output::Output::new(cli.verbose);
    let ctx = context::Context::load(cli.config.as_deref(), cli.api_url.as_deref(), output)?;

    let result = match cli.command {
        Commands::List(args) => commands::list::run(args, &ctx).await,
        Commands::Show(args) => commands::show::run(args, &ctx).await,
        Commands::Categories(args) => commands::categories::run(args, &ctx).await,
        Commands::Browse(args) => commands::browse::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
