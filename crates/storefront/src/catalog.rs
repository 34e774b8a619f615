//! Product catalog loading and lookups.
//!
//! The catalog is read once per session. On first use it is read from a
//! [`CatalogSource`] and cached in the key-value store under
//! [`CATALOG_KEY`]; later loads use the cached copy verbatim and never touch
//! the source again.

use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::PathBuf;

use thiserror::Error;
use tidewear_core::{Product, ProductId};
use tracing::instrument;

use crate::store::{CATALOG_KEY, KeyValueStore, StoreError};

/// Number of products shown on the home page.
pub const FEATURED_COUNT: usize = 4;
/// Number of related products shown on a product page.
pub const RELATED_COUNT: usize = 3;

/// Catalog loading errors.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog source {path}: {source}")]
    Source {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid catalog document: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Duplicate product id in catalog: {0}")]
    DuplicateId(ProductId),

    #[error("Catalog store error: {0}")]
    Store(#[from] StoreError),
}

/// Whether catalog data is available yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Readiness {
    Ready,
    /// No products are loaded; the caller should load the catalog and retry.
    NotReady,
}

/// Where an uncached catalog document comes from.
pub trait CatalogSource {
    /// Read the raw JSON catalog document.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Source` if the document cannot be read.
    fn read(&self) -> Result<String, CatalogError>;

    /// Human-readable origin, for logs.
    fn describe(&self) -> String;
}

/// A catalog document on the local filesystem.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CatalogSource for FileSource {
    fn read(&self) -> Result<String, CatalogError> {
        fs::read_to_string(&self.path).map_err(|source| CatalogError::Source {
            path: self.path.clone(),
            source,
        })
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// A catalog document held in memory.
#[derive(Debug, Clone)]
pub struct JsonSource(pub String);

impl CatalogSource for JsonSource {
    fn read(&self) -> Result<String, CatalogError> {
        Ok(self.0.clone())
    }

    fn describe(&self) -> String {
        "inline document".to_owned()
    }
}

/// The read-only product list for a session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate product ids.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::DuplicateId` if two products share an id.
    pub fn new(products: Vec<Product>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(products.len());
        for product in &products {
            if !seen.insert(product.id) {
                return Err(CatalogError::DuplicateId(product.id));
            }
        }
        Ok(Self { products })
    }

    /// A catalog with no products, as before the first load.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parse and validate a JSON catalog document.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Parse` for malformed JSON or invalid products,
    /// and `CatalogError::DuplicateId` for repeated ids.
    pub fn from_json(raw: &str) -> Result<Self, CatalogError> {
        let products: Vec<Product> = serde_json::from_str(raw)?;
        Self::new(products)
    }

    #[must_use]
    pub fn readiness(&self) -> Readiness {
        if self.products.is_empty() {
            Readiness::NotReady
        } else {
            Readiness::Ready
        }
    }

    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    #[must_use]
    pub fn find(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// The first `count` products in catalog order.
    #[must_use]
    pub fn featured(&self, count: usize) -> &[Product] {
        self.products
            .get(..count.min(self.products.len()))
            .unwrap_or_default()
    }

    /// Up to `count` other products in the same category, in catalog order.
    #[must_use]
    pub fn related(&self, product: &Product, count: usize) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| p.category == product.category && p.id != product.id)
            .take(count)
            .collect()
    }
}

/// Navigation trail for a product page: Home, gender, category, name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Breadcrumb<'a> {
    pub gender: &'a str,
    pub category: &'a str,
    pub name: &'a str,
}

impl<'a> Breadcrumb<'a> {
    #[must_use]
    pub fn for_product(product: &'a Product) -> Self {
        Self {
            gender: &product.gender,
            category: &product.category,
            name: &product.name,
        }
    }

    #[must_use]
    pub const fn segments(&self) -> [&'a str; 4] {
        ["Home", self.gender, self.category, self.name]
    }
}

impl fmt::Display for Breadcrumb<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments().join(" > "))
    }
}

/// Loads the catalog through the key-value cache.
pub struct CatalogLoader;

impl CatalogLoader {
    /// Load the cached catalog, if one has been stored.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the cached document cannot be read or parsed.
    pub fn load_cached<S>(store: &S) -> Result<Option<Catalog>, CatalogError>
    where
        S: KeyValueStore + ?Sized,
    {
        store
            .get(CATALOG_KEY)?
            .map(|raw| Catalog::from_json(&raw))
            .transpose()
    }

    /// Load the catalog, reading `source` only when nothing is cached.
    ///
    /// A freshly read document is validated before it is cached, so a bad
    /// source never poisons the store.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the source, the store or the document fails.
    #[instrument(skip(store, source), fields(origin = %source.describe()))]
    pub fn load<S, C>(store: &mut S, source: &C) -> Result<Catalog, CatalogError>
    where
        S: KeyValueStore + ?Sized,
        C: CatalogSource + ?Sized,
    {
        if let Some(catalog) = Self::load_cached(store)? {
            tracing::info!(products = catalog.len(), "Loaded catalog from cache");
            return Ok(catalog);
        }

        tracing::info!("No cached catalog, reading source");
        let raw = source.read()?;
        let catalog = Catalog::from_json(&raw)?;
        store.set(CATALOG_KEY, &raw)?;

        tracing::info!(products = catalog.len(), "Catalog read and cached");
        Ok(catalog)
    }

    /// Drop the cached catalog so the next load reads the source again.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Store` if the cache cannot be cleared.
    pub fn invalidate<S: KeyValueStore + ?Sized>(store: &mut S) -> Result<(), CatalogError> {
        store.remove(CATALOG_KEY)?;
        Ok(())
    }
}
