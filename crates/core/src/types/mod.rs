//! Core types for Tidewear.
//!
//! This module provides type-safe wrappers for the storefront's domain concepts.

pub mod cart_line;
pub mod id;
pub mod options;
pub mod price;
pub mod product;
pub mod quantity;

pub use cart_line::CartLine;
pub use id::*;
pub use options::{Destination, FilterGroup, ParseOptionError, ShippingMethod, SortKey};
pub use price::{Price, PriceError};
pub use product::{ColorSwatch, Product, ProductError};
pub use quantity::{Quantity, QuantityError};
