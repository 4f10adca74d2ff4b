//! Inventory, sale, and order entries

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{OrderStatus, Unit};

/// Date format used in every dataset
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Errors raised while building or validating an entry
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EntryError {
    #[error("Invalid unit: {0} (expected kg, ltr or nos)")]
    InvalidUnit(String),

    #[error("Invalid status: {0} (expected Pending, Completed or Cancelled)")]
    InvalidStatus(String),

    #[error("{field} must be a non-negative number, got {value}")]
    NegativeOrNotFinite { field: &'static str, value: f64 },

    #[error("Product name cannot be empty")]
    EmptyProduct,
}

/// A typed row that can be appended to a dataset
pub trait Record {
    /// Header columns, in file order
    fn columns() -> &'static [&'static str];

    /// Cell values aligned with [`Record::columns`]
    fn to_cells(&self) -> Vec<String>;

    /// Check the entry's invariants before it is written
    ///
    /// # Errors
    /// Returns an error if a numeric field is negative or not finite
    fn validate(&self) -> Result<(), EntryError>;
}

/// An inventory purchase or a sale: one product line with a computed total
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub date: NaiveDate,
    pub product: String,
    pub quantity: f64,
    pub unit: Unit,
    /// Price per unit
    pub price: f64,
}

impl LedgerEntry {
    pub const COLUMNS: &'static [&'static str] =
        &["Date", "Product", "Quantity", "Unit", "Price", "Total"];

    /// Create a new entry
    ///
    /// # Errors
    /// Returns an error if quantity or price is negative or not finite
    pub fn new(
        date: NaiveDate,
        product: impl Into<String>,
        quantity: f64,
        unit: Unit,
        price: f64,
    ) -> Result<Self, EntryError> {
        let entry = Self {
            date,
            product: product.into(),
            quantity,
            unit,
            price,
        };
        entry.validate()?;
        Ok(entry)
    }

    /// Line total, always `quantity * price`
    #[must_use]
    pub fn total(&self) -> f64 {
        self.quantity * self.price
    }
}

impl Record for LedgerEntry {
    fn columns() -> &'static [&'static str] {
        Self::COLUMNS
    }

    fn to_cells(&self) -> Vec<String> {
        vec![
            self.date.format(DATE_FORMAT).to_string(),
            self.product.clone(),
            format_number(self.quantity),
            self.unit.to_string(),
            format_number(self.price),
            format_number(self.total()),
        ]
    }

    fn validate(&self) -> Result<(), EntryError> {
        if self.product.trim().is_empty() {
            return Err(EntryError::EmptyProduct);
        }
        non_negative("Quantity", self.quantity)?;
        non_negative("Price", self.price)
    }
}

/// A customer order: a product line plus party, advance, and status
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderEntry {
    #[serde(flatten)]
    pub line: LedgerEntry,
    /// Customer name (free text)
    pub party: String,
    /// Advance payment received
    pub advance: f64,
    pub status: OrderStatus,
}

impl OrderEntry {
    pub const COLUMNS: &'static [&'static str] = &[
        "Date", "Product", "Quantity", "Unit", "Price", "Total", "Party", "Advance", "Status",
    ];

    /// Create a new pending order
    ///
    /// # Errors
    /// Returns an error if the advance is negative or not finite
    pub fn new(
        line: LedgerEntry,
        party: impl Into<String>,
        advance: f64,
    ) -> Result<Self, EntryError> {
        let order = Self {
            line,
            party: party.into(),
            advance,
            status: OrderStatus::Pending,
        };
        order.validate()?;
        Ok(order)
    }

    /// Line total, always `quantity * price`
    #[must_use]
    pub fn total(&self) -> f64 {
        self.line.total()
    }
}

impl Record for OrderEntry {
    fn columns() -> &'static [&'static str] {
        Self::COLUMNS
    }

    fn to_cells(&self) -> Vec<String> {
        let mut cells = self.line.to_cells();
        cells.push(self.party.clone());
        cells.push(format_number(self.advance));
        cells.push(self.status.to_string());
        cells
    }

    fn validate(&self) -> Result<(), EntryError> {
        self.line.validate()?;
        non_negative("Advance", self.advance)
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), EntryError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(EntryError::NegativeOrNotFinite { field, value })
    }
}

/// Format a real for a CSV cell
///
/// Integral values keep a trailing `.0` (`500.0`); everything else uses the
/// shortest representation that parses back to the same `f64`.
#[must_use]
pub fn format_number(value: f64) -> String {
    // Collapse -0.0 so a zero never prints with a sign
    let value = if value == 0.0 { 0.0 } else { value };
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}
