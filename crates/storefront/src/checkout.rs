//! Simulated checkout.
//!
//! There is no payment or order service: completing checkout prices the
//! cart, hands back a receipt, and empties the cart.

use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

use crate::pricing::OrderSummary;

/// Checkout errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckoutError {
    #[error("Your cart is empty")]
    EmptyCart,
}

/// Confirmation returned by a completed checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Receipt {
    pub order_id: Uuid,
    pub placed_at: DateTime<Utc>,
    /// Units purchased across all lines.
    pub item_count: u64,
    pub summary: OrderSummary,
}

impl Receipt {
    #[must_use]
    pub fn new(item_count: u64, summary: OrderSummary) -> Self {
        Self {
            order_id: Uuid::new_v4(),
            placed_at: Utc::now(),
            item_count,
            summary,
        }
    }
}
