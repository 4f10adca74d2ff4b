//! CLI command handlers
//!
//! Each dataset family (ledger, orders, products, report) has its own
//! module. Shared table output lives here.

pub mod ledger;
pub mod orders;
pub mod products;
pub mod report;

use chrono::{Local, NaiveDate};
use parlor_core::catalog::ProductCatalog;
use parlor_core::{BlobStore, RecordStore, Table, Unit};
use serde_json::{Map, Value};

/// Today's date in the local time zone
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Unit for a new entry: explicit flag, then the catalog default, then kg
///
/// The catalog is only fetched when no unit was given.
pub fn resolve_unit(
    records: &RecordStore<Box<dyn BlobStore>>,
    product: &str,
    explicit: Option<Unit>,
) -> anyhow::Result<Unit> {
    if let Some(unit) = explicit {
        return Ok(unit);
    }
    let catalog: ProductCatalog = records.load_catalog()?;
    if !catalog.contains(product) {
        tracing::warn!(product, "product is not in the catalog, defaulting to kg");
    }
    Ok(catalog.unit_of(product).unwrap_or_default())
}

/// Render a table as aligned text with a leading row number
pub fn format_table(table: &Table) -> String {
    if table.is_empty() {
        return "No data available.".to_string();
    }

    let mut widths: Vec<usize> = table.columns().iter().map(|c| c.chars().count()).collect();
    for row in table.rows() {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }
    let index_width = (table.len() - 1).to_string().len().max(1);

    let mut out = String::new();
    let header: Vec<String> = table
        .columns()
        .iter()
        .zip(&widths)
        .map(|(c, w)| format!("{c:<w$}"))
        .collect();
    out.push_str(&format!("{:<index_width$}  {}\n", "#", header.join("  ").trim_end()));

    for (i, row) in table.rows().iter().enumerate() {
        let cells: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(c, w)| format!("{c:<w$}"))
            .collect();
        out.push_str(&format!("{i:<index_width$}  {}\n", cells.join("  ").trim_end()));
    }
    out
}

/// Rows as JSON objects keyed by column
pub fn table_json(table: &Table) -> Value {
    let rows = table
        .rows()
        .iter()
        .map(|row| {
            let object: Map<String, Value> = table
                .columns()
                .iter()
                .zip(row)
                .map(|(c, v)| (c.clone(), Value::String(v.clone())))
                .collect();
            Value::Object(object)
        })
        .collect();
    Value::Array(rows)
}
