//! Unified error handling.
//!
//! Each storefront module has its own error enum; session operations return
//! [`StorefrontError`], which wraps them all.

use thiserror::Error;
use tidewear_core::ProductId;

use crate::cart::CartError;
use crate::catalog::CatalogError;
use crate::checkout::CheckoutError;
use crate::config::ConfigError;
use crate::pricing::PricingError;
use crate::store::StoreError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum StorefrontError {
    /// The catalog has not been loaded yet. Load it and retry.
    #[error("Catalog is not loaded yet")]
    CatalogNotReady,

    /// No product has the requested id.
    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    /// The product is not offered in the requested size or color.
    #[error("Product {product_id} is not available in size {size:?} and color {color:?}")]
    VariantUnavailable {
        product_id: ProductId,
        size: String,
        color: String,
    },

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Cart error: {0}")]
    Cart(#[from] CartError),

    #[error("Pricing error: {0}")]
    Pricing(#[from] PricingError),

    #[error("Checkout error: {0}")]
    Checkout(#[from] CheckoutError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl StorefrontError {
    /// Whether the error means the caller should load data and try again,
    /// rather than a real failure.
    #[must_use]
    pub const fn is_not_ready(&self) -> bool {
        matches!(self, Self::CatalogNotReady)
    }
}

/// Result type alias for `StorefrontError`.
pub type Result<T> = std::result::Result<T, StorefrontError>;
