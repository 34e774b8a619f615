//! The shopper session.
//!
//! [`ShopSession`] is the single owner of everything a shopper touches:
//! the catalog, the cart, browse filters, sort order and shipping choices.
//! Front ends hold one session and route every event through it.
//!
//! Cart changes are computed on a copy, persisted, and only then swapped in,
//! so a failed write leaves the session's cart unchanged.

use tidewear_core::{Destination, Product, ProductId, ShippingMethod, SortKey};
use tracing::instrument;

use crate::browse::{self, BrowseResults, FilterState};
use crate::cart::{self, Cart, CartRepository};
use crate::catalog::{
    Breadcrumb, Catalog, CatalogLoader, CatalogSource, FEATURED_COUNT, RELATED_COUNT, Readiness,
};
use crate::checkout::{CheckoutError, Receipt};
use crate::config::StorefrontConfig;
use crate::error::{Result, StorefrontError};
use crate::pricing::{OrderSummary, PricedLine, PricingPolicy, price_lines};
use crate::store::{KeyValueStore, StoreError};

/// Everything shown on a product page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductDetail<'a> {
    pub product: &'a Product,
    pub breadcrumb: Breadcrumb<'a>,
    pub related: Vec<&'a Product>,
}

/// A shopper's session over a key-value store.
#[derive(Debug)]
pub struct ShopSession<S> {
    store: S,
    catalog: Catalog,
    cart: Cart,
    filters: FilterState,
    sort: SortKey,
    shipping_method: ShippingMethod,
    destination: Destination,
    pricing: PricingPolicy,
}

impl<S: KeyValueStore> ShopSession<S> {
    /// Open a session, restoring the cached catalog (if any) and the cart.
    ///
    /// A stored cart that no longer parses is dropped with a warning; the
    /// next cart write replaces it.
    ///
    /// # Errors
    ///
    /// Returns `StorefrontError` if the store cannot be read or the cached
    /// catalog cannot be parsed.
    #[instrument(skip(store))]
    pub fn open(store: S) -> Result<Self> {
        let catalog = CatalogLoader::load_cached(&store)?.unwrap_or_default();
        let cart = match CartRepository::load(&store) {
            Ok(cart) => cart,
            Err(StoreError::Json { key, source }) => {
                tracing::warn!(%key, error = %source, "Stored cart is unreadable, starting empty");
                Cart::new()
            }
            Err(e) => return Err(e.into()),
        };

        tracing::info!(
            products = catalog.len(),
            cart_lines = cart.len(),
            "Session opened"
        );

        Ok(Self {
            store,
            catalog,
            cart,
            filters: FilterState::default(),
            sort: SortKey::default(),
            shipping_method: ShippingMethod::default(),
            destination: Destination::default(),
            pricing: PricingPolicy::default(),
        })
    }

    /// Apply configured shipping defaults.
    #[must_use]
    pub fn with_config(mut self, config: &StorefrontConfig) -> Self {
        self.shipping_method = config.shipping_method;
        self.destination = config.destination;
        self
    }

    /// Replace the pricing tables.
    #[must_use]
    pub fn with_pricing(mut self, pricing: PricingPolicy) -> Self {
        self.pricing = pricing;
        self
    }

    /// Load the catalog through the store's cache, reading `source` only if
    /// nothing is cached.
    ///
    /// # Errors
    ///
    /// Returns `StorefrontError::Catalog` if loading fails.
    pub fn load_catalog<C: CatalogSource + ?Sized>(&mut self, source: &C) -> Result<Readiness> {
        self.catalog = CatalogLoader::load(&mut self.store, source)?;
        Ok(self.catalog.readiness())
    }

    /// Drop the cached catalog and read `source` again.
    ///
    /// # Errors
    ///
    /// Returns `StorefrontError::Catalog` if the cache cannot be cleared or
    /// the source fails. The previously loaded catalog stays in memory.
    pub fn reload_catalog<C: CatalogSource + ?Sized>(&mut self, source: &C) -> Result<Readiness> {
        CatalogLoader::invalidate(&mut self.store)?;
        self.load_catalog(source)
    }

    #[must_use]
    pub fn readiness(&self) -> Readiness {
        self.catalog.readiness()
    }

    fn ready_catalog(&self) -> Result<&Catalog> {
        match self.catalog.readiness() {
            Readiness::Ready => Ok(&self.catalog),
            Readiness::NotReady => Err(StorefrontError::CatalogNotReady),
        }
    }

    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Give back the underlying store.
    pub fn into_store(self) -> S {
        self.store
    }

    // =========================================================================
    // Browse
    // =========================================================================

    #[must_use]
    pub const fn filters(&self) -> &FilterState {
        &self.filters
    }

    /// Mutable access to the browse filters.
    pub fn filters_mut(&mut self) -> &mut FilterState {
        &mut self.filters
    }

    /// Reset every filter group.
    pub fn clear_filters(&mut self) {
        self.filters.clear();
    }

    #[must_use]
    pub const fn sort(&self) -> SortKey {
        self.sort
    }

    pub fn set_sort(&mut self, sort: SortKey) {
        self.sort = sort;
    }

    /// Products matching the current filters, in the current sort order.
    ///
    /// # Errors
    ///
    /// Returns `StorefrontError::CatalogNotReady` before the catalog loads.
    pub fn browse(&self) -> Result<BrowseResults<'_>> {
        let catalog = self.ready_catalog()?;
        Ok(browse::filter_and_sort(
            catalog.products(),
            &self.filters,
            self.sort,
        ))
    }

    /// Products for the home page.
    ///
    /// # Errors
    ///
    /// Returns `StorefrontError::CatalogNotReady` before the catalog loads.
    pub fn featured(&self) -> Result<&[Product]> {
        Ok(self.ready_catalog()?.featured(FEATURED_COUNT))
    }

    /// Product page data.
    ///
    /// # Errors
    ///
    /// Returns `StorefrontError::CatalogNotReady` before the catalog loads and
    /// `StorefrontError::ProductNotFound` for an unknown id.
    pub fn product(&self, id: ProductId) -> Result<ProductDetail<'_>> {
        let catalog = self.ready_catalog()?;
        let product = catalog
            .find(id)
            .ok_or(StorefrontError::ProductNotFound(id))?;

        Ok(ProductDetail {
            product,
            breadcrumb: Breadcrumb::for_product(product),
            related: catalog.related(product, RELATED_COUNT),
        })
    }

    // =========================================================================
    // Cart
    // =========================================================================

    /// Add a product to the cart.
    ///
    /// `size` and `color` default to the product's first listed options, as
    /// the quick-add buttons do.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog is not loaded, the product or variant
    /// does not exist, the quantity is below one, or the cart cannot be saved.
    #[instrument(skip(self))]
    pub fn add_to_cart(
        &mut self,
        product_id: ProductId,
        size: Option<&str>,
        color: Option<&str>,
        quantity: i64,
    ) -> Result<&Cart> {
        let product = self
            .ready_catalog()?
            .find(product_id)
            .ok_or(StorefrontError::ProductNotFound(product_id))?;

        let size = size.or_else(|| product.default_size()).unwrap_or_default();
        let color = color.or_else(|| product.default_color()).unwrap_or_default();
        if !product.has_size(size) || !product.has_color(color) {
            tracing::warn!(%product_id, size, color, "Rejected unavailable variant");
            return Err(StorefrontError::VariantUnavailable {
                product_id,
                size: size.to_owned(),
                color: color.to_owned(),
            });
        }

        let next = cart::add_item(&self.cart, product_id, size, color, quantity)?;
        self.commit_cart(next)?;

        tracing::info!(item_count = self.cart.item_count(), "Item added to cart");
        Ok(&self.cart)
    }

    /// Change the quantity of cart line `index`.
    ///
    /// # Errors
    ///
    /// Returns an error if the line does not exist, the quantity is below
    /// one, or the cart cannot be saved.
    #[instrument(skip(self))]
    pub fn set_quantity(&mut self, index: usize, quantity: i64) -> Result<&Cart> {
        let next = cart::set_quantity(&self.cart, index, quantity)?;
        self.commit_cart(next)?;
        Ok(&self.cart)
    }

    /// Remove cart line `index`.
    ///
    /// # Errors
    ///
    /// Returns an error if the line does not exist or the cart cannot be saved.
    #[instrument(skip(self))]
    pub fn remove_item(&mut self, index: usize) -> Result<&Cart> {
        let next = cart::remove_item(&self.cart, index)?;
        self.commit_cart(next)?;
        Ok(&self.cart)
    }

    /// Empty the cart.
    ///
    /// # Errors
    ///
    /// Returns `StorefrontError::Store` if the cart cannot be saved.
    pub fn clear_cart(&mut self) -> Result<()> {
        let next = cart::clear(&self.cart);
        self.commit_cart(next)
    }

    fn commit_cart(&mut self, next: Cart) -> Result<()> {
        CartRepository::save(&mut self.store, &next)?;
        self.cart = next;
        Ok(())
    }

    // =========================================================================
    // Pricing & checkout
    // =========================================================================

    #[must_use]
    pub const fn shipping_method(&self) -> ShippingMethod {
        self.shipping_method
    }

    pub fn set_shipping_method(&mut self, method: ShippingMethod) {
        self.shipping_method = method;
    }

    #[must_use]
    pub const fn destination(&self) -> Destination {
        self.destination
    }

    pub fn set_destination(&mut self, destination: Destination) {
        self.destination = destination;
    }

    fn pricing_catalog(&self) -> Result<&Catalog> {
        if self.cart.is_empty() {
            Ok(&self.catalog)
        } else {
            self.ready_catalog()
        }
    }

    /// Cart lines joined with their products.
    ///
    /// # Errors
    ///
    /// Returns an error if a line references a product missing from the
    /// catalog, or the catalog is not loaded while the cart has lines.
    pub fn priced_lines(&self) -> Result<Vec<PricedLine<'_>>> {
        let catalog = self.pricing_catalog()?;
        Ok(price_lines(&self.cart, catalog.products())?)
    }

    /// Merchandise, shipping, tax and total for the current cart.
    ///
    /// # Errors
    ///
    /// Returns an error if a line references a product missing from the
    /// catalog, the catalog is not loaded while the cart has lines, or the
    /// selected shipping option has no rate.
    pub fn summary(&self) -> Result<OrderSummary> {
        let catalog = self.pricing_catalog()?;
        let summary = self.pricing.summarize(
            &self.cart,
            catalog.products(),
            self.shipping_method,
            self.destination,
        )?;
        Ok(summary)
    }

    /// Complete the order: price the cart, empty it, and return a receipt.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::EmptyCart` for an empty cart, or any pricing
    /// or store error. On error the cart is left as it was.
    #[instrument(skip(self))]
    pub fn checkout(&mut self) -> Result<Receipt> {
        if self.cart.is_empty() {
            tracing::warn!("Checkout attempted with an empty cart");
            return Err(CheckoutError::EmptyCart.into());
        }

        let summary = self.summary()?;
        let item_count = self.cart.item_count();
        self.clear_cart()?;

        let receipt = Receipt::new(item_count, summary);
        tracing::info!(
            order_id = %receipt.order_id,
            item_count,
            total = %receipt.summary.total,
            "Order completed"
        );
        Ok(receipt)
    }
}
