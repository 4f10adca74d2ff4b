//! Product catalog
//!
//! Maps each product name to the unit it is usually counted in. The catalog
//! only supplies defaults for entry forms; ledger rows are never checked
//! against it, so renamed or removed products stay valid in history.

use serde_json::{Map, Value};
use std::str::FromStr;
use thiserror::Error;

use crate::model::Unit;

/// Products written the first time a catalog is loaded
pub const DEFAULT_PRODUCTS: &[(&str, Unit)] = &[
    ("Dahi", Unit::Kg),
    ("Basundi", Unit::Ltr),
    ("Lassi", Unit::Ltr),
    ("Pedha", Unit::Nos),
    ("BadamShek", Unit::Ltr),
    ("GulabJamun", Unit::Nos),
    ("Paneer", Unit::Kg),
    ("Shrikhand", Unit::Kg),
    ("Milk", Unit::Ltr),
    ("Butter", Unit::Kg),
];

/// Catalog errors
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Product '{0}' already exists")]
    AlreadyExists(String),

    #[error("Product name cannot be empty")]
    EmptyName,

    #[error("Product '{product}' has invalid unit {unit}")]
    InvalidUnit { product: String, unit: String },

    #[error("Catalog must be a JSON object")]
    NotAnObject,

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Ordered mapping of product name to default unit
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductCatalog {
    products: Vec<(String, Unit)>,
}

impl ProductCatalog {
    /// The ten seed products
    #[must_use]
    pub fn defaults() -> Self {
        Self {
            products: DEFAULT_PRODUCTS
                .iter()
                .map(|(name, unit)| ((*name).to_string(), *unit))
                .collect(),
        }
    }

    /// Decode from a JSON object of `name: unit`
    ///
    /// # Errors
    /// Returns an error if the JSON is malformed, is not an object, or holds
    /// a unit outside kg/ltr/nos
    pub fn from_json(bytes: &[u8]) -> Result<Self, CatalogError> {
        let value: Value = serde_json::from_slice(bytes)?;
        let Value::Object(map) = value else {
            return Err(CatalogError::NotAnObject);
        };

        let mut products = Vec::with_capacity(map.len());
        for (product, unit) in map {
            let unit = unit
                .as_str()
                .and_then(|u| Unit::from_str(u).ok())
                .ok_or_else(|| CatalogError::InvalidUnit {
                    product: product.clone(),
                    unit: unit.to_string(),
                })?;
            products.push((product, unit));
        }
        Ok(Self { products })
    }

    /// Encode as a JSON object, preserving insertion order
    ///
    /// # Errors
    /// Returns an error if serialization fails
    pub fn to_json(&self) -> Result<Vec<u8>, CatalogError> {
        let map: Map<String, Value> = self
            .products
            .iter()
            .map(|(name, unit)| (name.clone(), Value::String(unit.to_string())))
            .collect();
        Ok(serde_json::to_vec(&Value::Object(map))?)
    }

    /// Default unit for a product
    #[must_use]
    pub fn unit_of(&self, product: &str) -> Option<Unit> {
        self.products
            .iter()
            .find(|(name, _)| name == product)
            .map(|(_, unit)| *unit)
    }

    /// Whether a product is listed (exact, case-sensitive)
    #[must_use]
    pub fn contains(&self, product: &str) -> bool {
        self.unit_of(product).is_some()
    }

    /// Add a product; existing entries are never overwritten
    ///
    /// # Errors
    /// Returns an error if the name is blank or already listed
    pub fn add(&mut self, product: &str, unit: Unit) -> Result<(), CatalogError> {
        if product.trim().is_empty() {
            return Err(CatalogError::EmptyName);
        }
        if self.contains(product) {
            return Err(CatalogError::AlreadyExists(product.to_string()));
        }
        self.products.push((product.to_string(), unit));
        Ok(())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.products.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Unit)> {
        self.products.iter().map(|(name, unit)| (name.as_str(), *unit))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let catalog = ProductCatalog::defaults();
        assert_eq!(catalog.len(), 10);
        assert_eq!(catalog.unit_of("Milk"), Some(Unit::Ltr));
        assert_eq!(catalog.unit_of("Pedha"), Some(Unit::Nos));
        assert_eq!(catalog.names().next(), Some("Dahi"));
        assert_eq!(catalog.names().last(), Some("Butter"));
    }

    #[test]
    fn test_json_preserves_order() {
        let catalog = ProductCatalog::defaults();
        let bytes = catalog.to_json().unwrap();
        let text = String::from_utf8(bytes.clone()).unwrap();
        assert!(text.starts_with("{\"Dahi\":\"kg\",\"Basundi\":\"ltr\""));
        assert_eq!(ProductCatalog::from_json(&bytes).unwrap(), catalog);
    }

    #[test]
    fn test_from_json_rejects_bad_input() {
        assert!(matches!(
            ProductCatalog::from_json(b"[\"Milk\"]"),
            Err(CatalogError::NotAnObject)
        ));
        assert!(matches!(
            ProductCatalog::from_json(b"{\"Milk\": \"gallon\"}"),
            Err(CatalogError::InvalidUnit { .. })
        ));
        assert!(matches!(
            ProductCatalog::from_json(b"{not json"),
            Err(CatalogError::Json(_))
        ));
    }

    #[test]
    fn test_add_rejects_duplicates() {
        let mut catalog = ProductCatalog::defaults();
        let err = catalog.add("Milk", Unit::Kg).unwrap_err();
        assert!(matches!(err, CatalogError::AlreadyExists(ref name) if name == "Milk"));
        assert_eq!(catalog.unit_of("Milk"), Some(Unit::Ltr));
        assert_eq!(catalog.len(), 10);
    }

    #[test]
    fn test_add_is_case_sensitive() {
        let mut catalog = ProductCatalog::defaults();
        catalog.add("milk", Unit::Kg).unwrap();
        assert_eq!(catalog.len(), 11);
        assert_eq!(catalog.unit_of("milk"), Some(Unit::Kg));
    }

    #[test]
    fn test_add_rejects_blank_name() {
        let mut catalog = ProductCatalog::default();
        assert!(matches!(catalog.add("   ", Unit::Kg), Err(CatalogError::EmptyName)));
        assert!(catalog.is_empty());
    }
}
