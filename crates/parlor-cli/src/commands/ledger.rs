//! Inventory and sales CLI commands
//!
//! Handles: parlor inventory add/list, parlor sales add/list

use chrono::NaiveDate;
use clap::{Args, Subcommand};
use parlor_core::{BlobStore, Dataset, LedgerEntry, RecordStore, Unit};

use super::{format_table, resolve_unit, table_json, today};

/// Inventory and sales commands
#[derive(Subcommand)]
pub enum LedgerCommands {
    /// Add an entry
    Add(EntryArgs),
    /// List all entries
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Arguments shared by every entry form
#[derive(Args)]
pub struct EntryArgs {
    /// Product name
    #[arg(long)]
    pub product: String,

    /// Quantity
    #[arg(long)]
    pub quantity: f64,

    /// Price per unit
    #[arg(long)]
    pub price: f64,

    /// Unit (kg, ltr, nos); defaults to the product's catalog unit
    #[arg(long)]
    pub unit: Option<Unit>,

    /// Entry date (YYYY-MM-DD); defaults to today
    #[arg(long)]
    pub date: Option<NaiveDate>,
}

impl EntryArgs {
    /// Build a validated entry, looking up the default unit if needed
    pub fn to_entry(
        &self,
        records: &RecordStore<Box<dyn BlobStore>>,
    ) -> anyhow::Result<LedgerEntry> {
        let unit = resolve_unit(records, self.product.trim(), self.unit)?;
        let entry = LedgerEntry::new(
            self.date.unwrap_or_else(today),
            self.product.trim(),
            self.quantity,
            unit,
            self.price,
        )?;
        Ok(entry)
    }
}

/// Execute an inventory or sales command
pub fn execute(
    records: &RecordStore<Box<dyn BlobStore>>,
    dataset: Dataset,
    cmd: LedgerCommands,
) -> anyhow::Result<()> {
    match cmd {
        LedgerCommands::Add(args) => {
            let entry = args.to_entry(records)?;
            records.append_entry(dataset, &entry)?;
            println!(
                "Added {dataset} entry: {} {} {} @ {} = {}",
                entry.product,
                entry.quantity,
                entry.unit,
                entry.price,
                format_money(entry.total())
            );
        }
        LedgerCommands::List { json } => {
            let table = records.load_dataset(dataset)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&table_json(&table))?);
            } else {
                println!("{}", format_table(&table));
            }
        }
    }
    Ok(())
}

/// Two-decimal amount, as shown in reports
pub fn format_money(value: f64) -> String {
    format!("{value:.2}")
}
