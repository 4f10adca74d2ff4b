//! Named datasets and their persisted objects

use std::fmt;

use crate::model::{LedgerEntry, OrderEntry};

/// Object name of the product catalog
pub const CATALOG_OBJECT: &str = "products.json";

/// A transactional dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dataset {
    Inventory,
    Sales,
    Orders,
}

impl Dataset {
    /// Every transactional dataset
    #[must_use]
    pub fn all() -> &'static [Dataset] {
        &[Self::Inventory, Self::Sales, Self::Orders]
    }

    /// Name of the object holding this dataset
    #[must_use]
    pub fn object_name(&self) -> &'static str {
        match self {
            Self::Inventory => "inventory.csv",
            Self::Sales => "sales.csv",
            Self::Orders => "orders.csv",
        }
    }

    /// Header columns a freshly created object gets
    #[must_use]
    pub fn schema(&self) -> &'static [&'static str] {
        match self {
            Self::Inventory | Self::Sales => LedgerEntry::COLUMNS,
            Self::Orders => OrderEntry::COLUMNS,
        }
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Inventory => write!(f, "inventory"),
            Self::Sales => write!(f, "sales"),
            Self::Orders => write!(f, "orders"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_names() {
        assert_eq!(Dataset::Inventory.object_name(), "inventory.csv");
        assert_eq!(Dataset::Sales.object_name(), "sales.csv");
        assert_eq!(Dataset::Orders.object_name(), "orders.csv");
    }

    #[test]
    fn test_schemas() {
        assert_eq!(
            Dataset::Sales.schema(),
            &["Date", "Product", "Quantity", "Unit", "Price", "Total"]
        );
        assert_eq!(Dataset::Orders.schema().len(), 9);
        assert_eq!(Dataset::Orders.schema()[8], "Status");
    }
}
