//! Record store: datasets and the catalog on top of a blob store
//!
//! Every operation is a short sequence of whole-object round trips. Appends
//! and status edits are read-modify-write with no version check, so two
//! writers racing on the same object can lose one update (last write wins).

use thiserror::Error;
use tracing::{debug, info};

use crate::catalog::{CatalogError, ProductCatalog};
use crate::dataset::{Dataset, CATALOG_OBJECT};
use crate::model::{EntryError, OrderStatus, Record, Unit};
use crate::storage::{BlobStore, StorageError};
use crate::table::{Row, Table, TableError};

/// Name of the order status column
pub const STATUS_COLUMN: &str = "Status";

/// Record store errors
#[derive(Error, Debug)]
pub enum RecordStoreError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Table error in {name}: {source}")]
    Table {
        name: String,
        #[source]
        source: TableError,
    },

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Invalid entry: {0}")]
    Entry(#[from] EntryError),
}

impl RecordStoreError {
    fn table(name: &str, source: TableError) -> Self {
        Self::Table {
            name: name.to_string(),
            source,
        }
    }

    /// True when a product could not be added because it is already listed
    #[must_use]
    pub fn is_already_exists(&self) -> bool {
        matches!(self, Self::Catalog(CatalogError::AlreadyExists(_)))
    }
}

/// Datasets and the product catalog kept in a blob store
pub struct RecordStore<S> {
    store: S,
}

impl<S: BlobStore> RecordStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The underlying blob store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Create `name` as an empty table with the given header if it is absent
    ///
    /// Calling this again once the object exists does nothing.
    ///
    /// # Errors
    /// Returns an error if the existence check or the write fails
    pub fn ensure_exists<C: AsRef<str>>(
        &self,
        name: &str,
        columns: &[C],
    ) -> Result<(), RecordStoreError> {
        if self.store.exists(name)? {
            debug!(name, "object already present");
            return Ok(());
        }

        let bytes = Table::with_columns(columns)
            .to_csv()
            .map_err(|e| RecordStoreError::table(name, e))?;
        self.store.put(name, &bytes)?;
        info!(name, backend = self.store.kind().as_str(), "created empty dataset");
        Ok(())
    }

    /// Ensure every transactional dataset exists with its schema
    ///
    /// # Errors
    /// Returns an error if any dataset cannot be checked or created
    pub fn ensure_datasets(&self) -> Result<(), RecordStoreError> {
        for dataset in Dataset::all() {
            self.ensure_exists(dataset.object_name(), dataset.schema())?;
        }
        Ok(())
    }

    /// Fetch and parse a table
    ///
    /// An absent object loads as an empty table. Any other failure is
    /// returned, so a failed fetch is never mistaken for an empty dataset.
    ///
    /// # Errors
    /// Returns an error if the fetch fails or the CSV is malformed
    pub fn load(&self, name: &str) -> Result<Table, RecordStoreError> {
        let bytes = match self.store.get(name) {
            Ok(bytes) => bytes,
            Err(StorageError::NotFound(_)) => {
                debug!(name, "object absent, loading empty table");
                return Ok(Table::default());
            }
            Err(e) => return Err(e.into()),
        };
        Table::from_csv(&bytes).map_err(|e| RecordStoreError::table(name, e))
    }

    /// Overwrite `name` with the full table
    ///
    /// # Errors
    /// Returns an error if encoding or the write fails
    pub fn replace_all(&self, name: &str, table: &Table) -> Result<(), RecordStoreError> {
        let bytes = table
            .to_csv()
            .map_err(|e| RecordStoreError::table(name, e))?;
        self.store.put(name, &bytes)?;
        debug!(name, rows = table.len(), "replaced dataset");
        Ok(())
    }

    /// Append one row: load, push, replace
    ///
    /// # Errors
    /// Returns an error if the load or the write fails
    pub fn append_row(&self, name: &str, row: &Row) -> Result<(), RecordStoreError> {
        let mut table = self.load(name)?;
        table.push_named(row);
        self.replace_all(name, &table)?;
        info!(name, rows = table.len(), "appended row");
        Ok(())
    }

    /// Validate a typed entry and append it to a dataset
    ///
    /// # Errors
    /// Returns an error if the entry is invalid or the append fails
    pub fn append_entry<R: Record>(
        &self,
        dataset: Dataset,
        entry: &R,
    ) -> Result<(), RecordStoreError> {
        entry.validate()?;
        self.append_row(dataset.object_name(), &Row::from_record(entry))
    }

    /// Load a transactional dataset
    ///
    /// # Errors
    /// Returns an error if the load fails
    pub fn load_dataset(&self, dataset: Dataset) -> Result<Table, RecordStoreError> {
        self.load(dataset.object_name())
    }

    /// Set the status of one existing order row
    ///
    /// Only the status cell changes; every other cell is written back
    /// exactly as it was read. Nothing is written if the row or the status
    /// column is missing.
    ///
    /// # Errors
    /// Returns an error if the row index is out of range, the orders table
    /// has no status column, or the load/write fails
    pub fn update_order_status(
        &self,
        row: usize,
        status: OrderStatus,
    ) -> Result<(), RecordStoreError> {
        let name = Dataset::Orders.object_name();
        let mut table = self.load(name)?;
        table
            .set_cell(row, STATUS_COLUMN, status.as_str())
            .map_err(|e| RecordStoreError::table(name, e))?;
        self.replace_all(name, &table)?;
        info!(row, status = %status, "updated order status");
        Ok(())
    }

    /// Load the product catalog, seeding the defaults on first access
    ///
    /// # Errors
    /// Returns an error if the fetch fails, the JSON is malformed, or the
    /// seed cannot be written
    pub fn load_catalog(&self) -> Result<ProductCatalog, RecordStoreError> {
        match self.store.get(CATALOG_OBJECT) {
            Ok(bytes) => Ok(ProductCatalog::from_json(&bytes)?),
            Err(StorageError::NotFound(_)) => {
                let catalog = ProductCatalog::defaults();
                self.save_catalog(&catalog)?;
                info!(products = catalog.len(), "seeded default product catalog");
                Ok(catalog)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Overwrite the product catalog
    ///
    /// # Errors
    /// Returns an error if encoding or the write fails
    pub fn save_catalog(&self, catalog: &ProductCatalog) -> Result<(), RecordStoreError> {
        let bytes = catalog.to_json()?;
        self.store.put(CATALOG_OBJECT, &bytes)?;
        Ok(())
    }

    /// Add a product to the stored catalog and return the updated catalog
    ///
    /// A duplicate name leaves the stored catalog untouched.
    ///
    /// # Errors
    /// Returns an error if the name is blank or already listed, or the
    /// load/write fails
    pub fn add_product(
        &self,
        product: &str,
        unit: Unit,
    ) -> Result<ProductCatalog, RecordStoreError> {
        let mut catalog = self.load_catalog()?;
        catalog.add(product, unit)?;
        self.save_catalog(&catalog)?;
        info!(product, unit = %unit, "added product");
        Ok(catalog)
    }
}
