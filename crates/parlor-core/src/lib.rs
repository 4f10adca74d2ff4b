//! Parlor Core - Record store, datasets, and storage backends
//!
//! This crate provides the typed ledger entries (inventory, sales, orders),
//! the product catalog, CSV tables, and the record store that keeps them in
//! a remote blob store.

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]

pub mod catalog;
pub mod config;
pub mod dataset;
pub mod model;
pub mod record_store;
pub mod report;
pub mod storage;
pub mod table;

pub use catalog::ProductCatalog;
pub use config::{BackendConfig, ParlorConfig};
pub use dataset::Dataset;
pub use model::{LedgerEntry, OrderEntry, OrderStatus, Record, Unit};
pub use record_store::RecordStore;
pub use storage::BlobStore;
pub use table::Table;
