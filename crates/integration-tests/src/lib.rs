//! Integration tests for Tidewear.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p tidewear-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `shop_flow` - End-to-end sessions over a file-backed store
//! - `pricing_scenarios` - Order summaries for known carts
//! - `browse_properties` - Property tests for filtering and sorting
//!
//! This crate holds the fixtures those tests share.

#![cfg_attr(not(test), forbid(unsafe_code))]

use serde_json::json;
use tidewear_core::Product;

/// The catalog shipped in `data/products.json`.
pub const SAMPLE_CATALOG: &str = include_str!("../../../data/products.json");

/// Build a product with the given attributes and a fixed description.
///
/// # Panics
///
/// Panics if the attributes do not form a valid product (no sizes, no
/// colors, empty name).
#[must_use]
pub fn product(
    id: i32,
    name: &str,
    gender: &str,
    category: &str,
    price: f64,
    sizes: &[&str],
    colors: &[&str],
) -> Product {
    let colors: Vec<_> = colors.iter().map(|name| json!({ "name": name })).collect();
    serde_json::from_value(json!({
        "id": id,
        "name": name,
        "gender": gender,
        "category": category,
        "description": format!("{name} fixture"),
        "price": price,
        "sizes": sizes,
        "color": colors,
    }))
    .expect("fixture product should be valid")
}

/// Serialize products into a catalog document.
///
/// # Panics
///
/// Panics if serialization fails, which cannot happen for valid products.
#[must_use]
pub fn catalog_json(products: &[Product]) -> String {
    serde_json::to_string(products).expect("products serialize")
}
