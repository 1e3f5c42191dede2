//! # Catalog Module
//!
//! Products offered for sale.
//!
//! ## Dual-Key Identity Pattern
//! Every product has:
//! - `id`: UUID v4 - immutable, used by carts and orders to match products
//! - `name`: human-readable, not unique

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::metric::Metric;
use crate::money::Money;
use crate::validation::{validate_category, validate_product_name, ValidationResult};

/// A product available for sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name.
    pub name: String,

    /// Price per one unit of `metric`.
    pub price: Money,

    /// What the product is sold in (pieces, kilograms, ...).
    pub metric: Metric,

    /// Catalog categories, kept sorted.
    #[serde(default)]
    pub categories: BTreeSet<String>,
}

impl Product {
    /// Creates a product sold in pieces.
    ///
    /// ## Errors
    /// The name must be non-empty and at most 200 characters.
    pub fn new(name: impl Into<String>, price: Money) -> ValidationResult<Self> {
        Product::with_metric(name, price, Metric::UNIT)
    }

    /// Creates a product sold in `metric` (e.g. coffee beans per kilogram).
    pub fn with_metric(
        name: impl Into<String>,
        price: Money,
        metric: Metric,
    ) -> ValidationResult<Self> {
        let name = name.into();
        validate_product_name(&name)?;

        Ok(Product {
            id: Uuid::new_v4().to_string(),
            name: name.trim().to_string(),
            price,
            metric,
            categories: BTreeSet::new(),
        })
    }

    /// Adds a category. Returns `false` if it was already present.
    pub fn add_category(&mut self, category: &str) -> ValidationResult<bool> {
        validate_category(category)?;
        Ok(self.categories.insert(category.trim().to_string()))
    }

    /// Removes a category. Returns `false` if it was not present.
    pub fn remove_category(&mut self, category: &str) -> bool {
        self.categories.remove(category.trim())
    }

    pub fn has_category(&self, category: &str) -> bool {
        self.categories.contains(category.trim())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;

    #[test]
    fn test_new_product() {
        let product = Product::new(" Espresso ", Money::euros(2)).unwrap();
        assert_eq!(product.name, "Espresso");
        assert_eq!(product.metric, Metric::UNIT);
        assert!(Uuid::parse_str(&product.id).is_ok());
    }

    #[test]
    fn test_products_get_distinct_ids() {
        let a = Product::new("Espresso", Money::euros(2)).unwrap();
        let b = Product::new("Espresso", Money::euros(2)).unwrap();
        assert_ne!(a.id, b.id);
        assert_ne!(a, b);
    }

    #[test]
    fn test_rejects_invalid_name() {
        assert!(matches!(
            Product::new("", Money::euros(1)),
            Err(ValidationError::Required { .. })
        ));
    }

    #[test]
    fn test_categories() {
        let mut beans = Product::with_metric("Beans", Money::euros(12), Metric::KILOGRAM).unwrap();
        assert!(beans.add_category("Coffee").unwrap());
        assert!(!beans.add_category(" Coffee ").unwrap());
        assert!(beans.has_category("Coffee"));
        assert!(beans.add_category("").is_err());
        assert!(beans.remove_category("Coffee"));
        assert!(!beans.has_category("Coffee"));
    }
}
