//! Parlor CLI - Command-line interface for the parlor ledger
//!
//! Provides `parlor inventory`, `parlor sales`, `parlor orders`,
//! `parlor products`, and `parlor report`.

mod commands;

use anyhow::Context;
use clap::{Parser, Subcommand};
use parlor_core::{BackendConfig, BlobStore, ParlorConfig, RecordStore};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use commands::ledger::LedgerCommands;
use commands::orders::OrderCommands;
use commands::products::ProductCommands;
use commands::report::ReportArgs;

#[derive(Parser)]
#[command(name = "parlor")]
#[command(about = "Parlor - inventory, sales and order ledger")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file (defaults to $PARLOR_CONFIG or ~/.parlor/config.json)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Keep datasets in this local directory instead of the configured backend
    #[arg(long, global = true, value_name = "DIR", conflicts_with = "config")]
    data_dir: Option<PathBuf>,

    /// Log every storage call
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Create missing datasets and seed the product catalog
    Init,
    /// Record inventory purchases
    Inventory {
        #[command(subcommand)]
        action: LedgerCommands,
    },
    /// Record sales
    Sales {
        #[command(subcommand)]
        action: LedgerCommands,
    },
    /// Record customer orders and update their status
    Orders {
        #[command(subcommand)]
        action: OrderCommands,
    },
    /// Manage the product catalog
    Products {
        #[command(subcommand)]
        action: ProductCommands,
    },
    /// Summarise inventory, sales and orders over a date range
    Report(ReportArgs),
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn open_records(cli: &Cli) -> anyhow::Result<RecordStore<Box<dyn BlobStore>>> {
    let config = match &cli.data_dir {
        Some(dir) => ParlorConfig::new(BackendConfig::Local { root: dir.clone() }),
        None => ParlorConfig::resolve(cli.config.as_deref())?,
    };
    let store = config.open_store().context("Failed to open storage backend")?;
    Ok(RecordStore::new(store))
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let records = open_records(&cli)?;

    match cli.command {
        Commands::Init => {
            records.ensure_datasets()?;
            let catalog = records.load_catalog()?;
            println!(
                "Datasets ready on {} backend ({} products in catalog).",
                records.store().kind().as_str(),
                catalog.len()
            );
        }
        Commands::Inventory { action } => {
            commands::ledger::execute(&records, parlor_core::Dataset::Inventory, action)?;
        }
        Commands::Sales { action } => {
            commands::ledger::execute(&records, parlor_core::Dataset::Sales, action)?;
        }
        Commands::Orders { action } => commands::orders::execute(&records, action)?,
        Commands::Products { action } => commands::products::execute(&records, action)?,
        Commands::Report(args) => commands::report::execute(&records, &args)?,
    }
    Ok(())
}
