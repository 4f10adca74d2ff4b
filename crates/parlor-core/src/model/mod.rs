//! Ledger entry types
//!
//! Typed rows for the inventory, sales, and orders datasets, and the
//! closed vocabularies (units, order status) their cells draw from.

mod entry;
mod status;
mod unit;

pub use entry::{format_number, EntryError, LedgerEntry, OrderEntry, Record, DATE_FORMAT};
pub use status::OrderStatus;
pub use unit::Unit;
