//! Catalog product records.

use serde::{Deserialize, Serialize};

use super::id::ProductId;
use super::price::Price;

/// Errors raised when a catalog record violates the product invariants.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ProductError {
    /// The product lists no sizes.
    #[error("product {0} has no sizes")]
    NoSizes(ProductId),
    /// The product lists no colors.
    #[error("product {0} has no colors")]
    NoColors(ProductId),
    /// The product name is blank.
    #[error("product {0} has an empty name")]
    EmptyName(ProductId),
}

/// A named color a product is offered in.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColorSwatch {
    pub name: String,
    /// Hex code such as `#1f2a44`, when the catalog provides one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hex: Option<String>,
}

impl ColorSwatch {
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            hex: None,
        }
    }
}

/// A product as described by the catalog document.
///
/// Deserialization validates the record, so a `Product` in memory always
/// has a name, at least one size, and at least one color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ProductRecord")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub gender: String,
    pub category: String,
    pub description: String,
    pub price: Price,
    pub material: String,
    pub sizes: Vec<String>,
    pub color: Vec<ColorSwatch>,
}

/// Unvalidated wire shape of a [`Product`].
#[derive(Debug, Deserialize)]
struct ProductRecord {
    id: ProductId,
    name: String,
    #[serde(default)]
    gender: String,
    #[serde(default)]
    category: String,
    #[serde(default)]
    description: String,
    price: Price,
    #[serde(default)]
    material: String,
    #[serde(default)]
    sizes: Vec<String>,
    #[serde(default)]
    color: Vec<ColorSwatch>,
}

impl TryFrom<ProductRecord> for Product {
    type Error = ProductError;

    fn try_from(record: ProductRecord) -> Result<Self, Self::Error> {
        let product = Self {
            id: record.id,
            name: record.name,
            gender: record.gender,
            category: record.category,
            description: record.description,
            price: record.price,
            material: record.material,
            sizes: record.sizes,
            color: record.color,
        };
        product.validate()?;
        Ok(product)
    }
}

impl Product {
    /// Check the record invariants.
    ///
    /// # Errors
    ///
    /// Returns a [`ProductError`] naming the first violated invariant.
    pub fn validate(&self) -> Result<(), ProductError> {
        if self.name.trim().is_empty() {
            return Err(ProductError::EmptyName(self.id));
        }
        if self.sizes.is_empty() {
            return Err(ProductError::NoSizes(self.id));
        }
        if self.color.is_empty() {
            return Err(ProductError::NoColors(self.id));
        }
        Ok(())
    }

    /// Color names in catalog order.
    pub fn color_names(&self) -> impl Iterator<Item = &str> {
        self.color.iter().map(|swatch| swatch.name.as_str())
    }

    #[must_use]
    pub fn has_size(&self, size: &str) -> bool {
        self.sizes.iter().any(|s| s == size)
    }

    #[must_use]
    pub fn has_color(&self, color: &str) -> bool {
        self.color_names().any(|c| c == color)
    }

    /// The first listed size, used for one-click adds.
    #[must_use]
    pub fn default_size(&self) -> Option<&str> {
        self.sizes.first().map(String::as_str)
    }

    /// The first listed color name, used for one-click adds.
    #[must_use]
    pub fn default_color(&self) -> Option<&str> {
        self.color.first().map(|swatch| swatch.name.as_str())
    }
}
