//! Report CLI command
//!
//! Handles: parlor report

use chrono::NaiveDate;
use clap::Args;
use parlor_core::report::{ReportFilter, Summary};
use parlor_core::{BlobStore, Dataset, RecordStore};
use serde_json::json;

use super::ledger::format_money;
use super::{format_table, table_json, today};

/// Arguments for `parlor report`
#[derive(Args)]
pub struct ReportArgs {
    /// First day included (YYYY-MM-DD); defaults to today
    #[arg(long)]
    pub start: Option<NaiveDate>,

    /// Last day included (YYYY-MM-DD); defaults to today
    #[arg(long)]
    pub end: Option<NaiveDate>,

    /// Only this product
    #[arg(long)]
    pub product: Option<String>,

    /// Print only the totals
    #[arg(long)]
    pub summary_only: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Execute report command
pub fn execute(records: &RecordStore<Box<dyn BlobStore>>, args: &ReportArgs) -> anyhow::Result<()> {
    let start = args.start.unwrap_or_else(today);
    let end = args.end.unwrap_or_else(today);
    if start > end {
        anyhow::bail!("Start date {start} is after end date {end}");
    }

    let filter = ReportFilter::new(start, end).with_product(args.product.clone());
    let inventory = filter.apply(&records.load_dataset(Dataset::Inventory)?);
    let sales = filter.apply(&records.load_dataset(Dataset::Sales)?);
    let orders = filter.apply(&records.load_dataset(Dataset::Orders)?);
    let summary = Summary::compute(&inventory, &sales, &orders);

    if args.json {
        let report = json!({
            "start": start.to_string(),
            "end": end.to_string(),
            "product": args.product,
            "summary": summary,
            "inventory": table_json(&inventory),
            "sales": table_json(&sales),
            "orders": table_json(&orders),
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let scope = args.product.as_deref().unwrap_or("All Products");
    println!("Report {start} to {end} ({scope})");
    println!("  Inventory cost:      {}", format_money(summary.inventory_cost));
    println!("  Total sales:         {}", format_money(summary.sales_total));
    println!("  Inventory added qty: {}", format_money(summary.inventory_quantity));
    println!("  Total orders qty:    {}", format_money(summary.orders_quantity));

    if !args.summary_only {
        for (title, table) in [("Inventory", &inventory), ("Sales", &sales), ("Orders", &orders)] {
            println!("\n{title}");
            println!("{}", format_table(table));
        }
    }
    Ok(())
}
