//! Order CLI commands
//!
//! Handles: parlor orders add/list/set-status

use clap::{Args, Subcommand};
use parlor_core::{BlobStore, Dataset, OrderEntry, OrderStatus, RecordStore};

use super::ledger::{format_money, EntryArgs};
use super::{format_table, table_json};

/// Order commands
#[derive(Subcommand)]
pub enum OrderCommands {
    /// Add a pending order
    Add(OrderAddArgs),
    /// List all orders with their row numbers
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Change the status of an existing order
    SetStatus {
        /// Row number as shown by `parlor orders list`
        row: usize,
        /// New status (Pending, Completed, Cancelled)
        status: OrderStatus,
    },
}

/// Arguments for `parlor orders add`
#[derive(Args)]
pub struct OrderAddArgs {
    #[command(flatten)]
    pub entry: EntryArgs,

    /// Party (customer) name
    #[arg(long, default_value = "")]
    pub party: String,

    /// Advance received
    #[arg(long, default_value_t = 0.0)]
    pub advance: f64,
}

/// Execute order command
pub fn execute(
    records: &RecordStore<Box<dyn BlobStore>>,
    cmd: OrderCommands,
) -> anyhow::Result<()> {
    match cmd {
        OrderCommands::Add(args) => {
            let line = args.entry.to_entry(records)?;
            let order = OrderEntry::new(line, args.party.trim(), args.advance)?;
            records.append_entry(Dataset::Orders, &order)?;
            println!(
                "Added order for '{}': {} {} {} = {} (advance {}, {})",
                order.party,
                order.line.product,
                order.line.quantity,
                order.line.unit,
                format_money(order.total()),
                format_money(order.advance),
                order.status
            );
        }
        OrderCommands::List { json } => {
            let table = records.load_dataset(Dataset::Orders)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&table_json(&table))?);
            } else {
                println!("{}", format_table(&table));
            }
        }
        OrderCommands::SetStatus { row, status } => {
            records.update_order_status(row, status)?;
            println!("Order {row} status set to {status}.");
        }
    }
    Ok(())
}
