//! Shopping cart rows.

use serde::{Deserialize, Serialize};

use super::id::ProductId;
use super::quantity::Quantity;

/// One row in the cart.
///
/// A cart holds at most one line per `(product_id, size, color)`.
/// The product id is stored under `id` to match the persisted cart format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    #[serde(rename = "id")]
    pub product_id: ProductId,
    pub size: String,
    pub color: String,
    pub quantity: Quantity,
}

impl CartLine {
    #[must_use]
    pub fn new(
        product_id: ProductId,
        size: impl Into<String>,
        color: impl Into<String>,
        quantity: Quantity,
    ) -> Self {
        Self {
            product_id,
            size: size.into(),
            color: color.into(),
            quantity,
        }
    }

    /// Whether this line is for the given product variant.
    #[must_use]
    pub fn is_variant(&self, product_id: ProductId, size: &str, color: &str) -> bool {
        self.product_id == product_id && self.size == size && self.color == color
    }
}
