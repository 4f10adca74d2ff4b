//! Product catalog CLI commands
//!
//! Handles: parlor products list/add

use clap::Subcommand;
use parlor_core::{BlobStore, RecordStore, Unit};
use serde_json::{Map, Value};

/// Product catalog commands
#[derive(Subcommand)]
pub enum ProductCommands {
    /// List products and their default units
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Add a product to the catalog
    Add {
        /// Product name (case-sensitive, must be new)
        name: String,
        /// Default unit (kg, ltr, nos)
        #[arg(long, default_value = "kg")]
        unit: Unit,
    },
}

/// Execute product command
pub fn execute(
    records: &RecordStore<Box<dyn BlobStore>>,
    cmd: ProductCommands,
) -> anyhow::Result<()> {
    match cmd {
        ProductCommands::List { json } => {
            let catalog = records.load_catalog()?;
            if json {
                let object: Map<String, Value> = catalog
                    .iter()
                    .map(|(name, unit)| (name.to_string(), Value::String(unit.to_string())))
                    .collect();
                println!("{}", serde_json::to_string_pretty(&Value::Object(object))?);
            } else {
                let width = catalog.names().map(|n| n.chars().count()).max().unwrap_or(0);
                println!("Products:");
                for (name, unit) in catalog.iter() {
                    println!("  {name:<width$}  {unit}");
                }
            }
        }
        ProductCommands::Add { name, unit } => {
            let name = name.trim();
            records.add_product(name, unit)?;
            println!("Product '{name}' added with unit '{unit}'.");
        }
    }
    Ok(())
}
