//! Catalog commands.

use tidewear_core::ProductId;
use tidewear_storefront::store::KeyValueStore;
use tidewear_storefront::{Result, ShopSession};

use crate::render;

/// Report the loaded catalog. Loading (and refreshing) happens when the
/// session opens.
#[allow(clippy::print_stdout)]
pub fn load<S: KeyValueStore>(session: &ShopSession<S>) {
    println!("Catalog ready: {} products", session.catalog().len());
}

/// List every product, sorted by name.
///
/// # Errors
///
/// Returns `StorefrontError::CatalogNotReady` if no catalog is loaded.
#[allow(clippy::print_stdout)]
pub fn list<S: KeyValueStore>(session: &ShopSession<S>) -> Result<()> {
    let results = session.browse()?;
    print!("{}", render::product_list(&results.products));
    Ok(())
}

/// # Errors
///
/// Returns `StorefrontError::CatalogNotReady` if no catalog is loaded.
#[allow(clippy::print_stdout)]
pub fn featured<S: KeyValueStore>(session: &ShopSession<S>) -> Result<()> {
    let products: Vec<_> = session.featured()?.iter().collect();
    println!("Featured");
    print!("{}", render::product_list(&products));
    Ok(())
}

/// # Errors
///
/// Returns an error if the catalog is not loaded or the product is unknown.
#[allow(clippy::print_stdout)]
pub fn show<S: KeyValueStore>(session: &ShopSession<S>, id: ProductId) -> Result<()> {
    let detail = session.product(id)?;
    print!("{}", render::product_detail(&detail));
    Ok(())
}
