//! Cart operations.
//!
//! Every operation borrows the current cart and returns a new one, leaving
//! the input untouched. Callers swap in the result and persist it with
//! [`CartRepository::save`] after each mutation.
//!
//! Quantities below one are rejected with [`QuantityError::NotPositive`]
//! rather than clamped, both when adding and when setting a line.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tidewear_core::{CartLine, ProductId, Quantity, QuantityError};

use crate::store::{CART_KEY, KeyValueStore, StoreError, load_json, save_json};

/// Errors from cart operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    #[error("Cart line {index} does not exist (cart has {len} lines)")]
    LineNotFound { index: usize, len: usize },

    #[error("Invalid quantity: {0}")]
    Quantity(#[from] QuantityError),
}

/// The shopper's cart: an ordered list of lines, unique per variant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<CartLine>", into = "Vec<CartLine>")]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// An empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a cart from raw lines, merging any repeated variants.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Quantity` if merged quantities overflow.
    pub fn from_lines(lines: impl IntoIterator<Item = CartLine>) -> Result<Self, CartError> {
        let mut cart = Self::new();
        for line in lines {
            cart.merge_line(line)?;
        }
        Ok(cart)
    }

    fn merge_line(&mut self, line: CartLine) -> Result<(), CartError> {
        if let Some(existing) = self
            .lines
            .iter_mut()
            .find(|l| l.is_variant(line.product_id, &line.size, &line.color))
        {
            existing.quantity = existing.quantity.checked_add(line.quantity)?;
        } else {
            self.lines.push(line);
        }
        Ok(())
    }

    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&CartLine> {
        self.lines.get(index)
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total units across all lines, as shown on the cart badge.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.lines
            .iter()
            .map(|line| u64::from(line.quantity.get()))
            .sum()
    }

    fn line_mut(&mut self, index: usize) -> Result<&mut CartLine, CartError> {
        let len = self.lines.len();
        self.lines
            .get_mut(index)
            .ok_or(CartError::LineNotFound { index, len })
    }
}

impl TryFrom<Vec<CartLine>> for Cart {
    type Error = CartError;

    fn try_from(lines: Vec<CartLine>) -> Result<Self, Self::Error> {
        Self::from_lines(lines)
    }
}

impl From<Cart> for Vec<CartLine> {
    fn from(cart: Cart) -> Self {
        cart.lines
    }
}

/// Add `quantity` of a product variant.
///
/// If the cart already has a line for `(product_id, size, color)` its
/// quantity grows; otherwise a new line is appended.
///
/// # Errors
///
/// Returns `CartError::Quantity` if `quantity` is below one or the merged
/// quantity overflows.
pub fn add_item(
    cart: &Cart,
    product_id: ProductId,
    size: &str,
    color: &str,
    quantity: i64,
) -> Result<Cart, CartError> {
    let quantity = Quantity::new(quantity)?;
    let mut next = cart.clone();
    next.merge_line(CartLine::new(product_id, size, color, quantity))?;
    Ok(next)
}

/// Replace the quantity of the line at `index`. Lines are never merged.
///
/// # Errors
///
/// Returns `CartError::Quantity` if `quantity` is below one and
/// `CartError::LineNotFound` if `index` is out of range.
pub fn set_quantity(cart: &Cart, index: usize, quantity: i64) -> Result<Cart, CartError> {
    let quantity = Quantity::new(quantity)?;
    let mut next = cart.clone();
    next.line_mut(index)?.quantity = quantity;
    Ok(next)
}

/// Remove the line at `index`; later lines shift down by one.
///
/// # Errors
///
/// Returns `CartError::LineNotFound` if `index` is out of range.
pub fn remove_item(cart: &Cart, index: usize) -> Result<Cart, CartError> {
    if index >= cart.len() {
        return Err(CartError::LineNotFound {
            index,
            len: cart.len(),
        });
    }
    let mut next = cart.clone();
    next.lines.remove(index);
    Ok(next)
}

/// An empty cart, as after checkout.
#[must_use]
pub fn clear(_cart: &Cart) -> Cart {
    Cart::new()
}

/// Loads and saves the cart under [`CART_KEY`].
pub struct CartRepository;

impl CartRepository {
    /// Load the persisted cart; a missing entry is an empty cart.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the stored cart cannot be read or parsed.
    pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> Result<Cart, StoreError> {
        Ok(load_json(store, CART_KEY)?.unwrap_or_default())
    }

    /// Persist the cart.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the cart cannot be written.
    pub fn save<S: KeyValueStore + ?Sized>(store: &mut S, cart: &Cart) -> Result<(), StoreError> {
        save_json(store, CART_KEY, cart)
    }
}
