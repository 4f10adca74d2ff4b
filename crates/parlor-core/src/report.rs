//! Date-range and product reports

use chrono::NaiveDate;
use serde::Serialize;
use tracing::warn;

use crate::model::DATE_FORMAT;
use crate::table::Table;

/// Which rows a report covers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportFilter {
    /// First day included
    pub start: NaiveDate,
    /// Last day included
    pub end: NaiveDate,
    /// Exact product name, or `None` for all products
    pub product: Option<String>,
}

impl ReportFilter {
    #[must_use]
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start,
            end,
            product: None,
        }
    }

    /// Restrict to one product
    #[must_use]
    pub fn with_product(mut self, product: Option<String>) -> Self {
        self.product = product;
        self
    }

    /// Rows whose date is in range and whose product matches
    ///
    /// Rows with a missing or unparseable date are left out.
    #[must_use]
    pub fn apply(&self, table: &Table) -> Table {
        table.filter_rows(|t, i| {
            let in_range = t
                .cell(i, "Date")
                .and_then(parse_date)
                .is_some_and(|d| d >= self.start && d <= self.end);
            let product_matches = self
                .product
                .as_deref()
                .map_or(true, |p| t.cell(i, "Product") == Some(p));
            in_range && product_matches
        })
    }
}

/// Headline totals over the filtered datasets
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Summary {
    /// Sum of inventory `Total`
    pub inventory_cost: f64,
    /// Sum of sales `Total`
    pub sales_total: f64,
    /// Sum of inventory `Quantity`
    pub inventory_quantity: f64,
    /// Sum of orders `Quantity`
    pub orders_quantity: f64,
}

impl Summary {
    /// Compute totals from already-filtered tables
    #[must_use]
    pub fn compute(inventory: &Table, sales: &Table, orders: &Table) -> Self {
        Self {
            inventory_cost: column_sum(inventory, "Total"),
            sales_total: column_sum(sales, "Total"),
            inventory_quantity: column_sum(inventory, "Quantity"),
            orders_quantity: column_sum(orders, "Quantity"),
        }
    }
}

/// Sum a numeric column; blank or unparseable cells count as zero
#[must_use]
pub fn column_sum(table: &Table, column: &str) -> f64 {
    table
        .column_values(column)
        .filter(|v| !v.trim().is_empty())
        .map(|v| {
            v.trim().parse::<f64>().unwrap_or_else(|_| {
                warn!(column, value = v, "skipping non-numeric cell");
                0.0
            })
        })
        .fold(0.0, |acc, v| acc + v)
}

/// Parse a `Date` cell
///
/// Accepts `YYYY-MM-DD`, optionally followed by a time part.
#[must_use]
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    let day = value.get(..10).unwrap_or(value);
    NaiveDate::parse_from_str(day, DATE_FORMAT).ok()
}
