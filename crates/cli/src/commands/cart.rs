//! Cart commands. Line numbers arrive here already converted to 0-based
//! indexes.

use tidewear_core::{ProductId, Quantity};
use tidewear_storefront::store::KeyValueStore;
use tidewear_storefront::{Result, ShopSession};
use tracing::info;

use crate::render;

/// # Errors
///
/// Returns a pricing error if a line's product is missing from the catalog.
#[allow(clippy::print_stdout)]
pub fn show<S: KeyValueStore>(session: &ShopSession<S>) -> Result<()> {
    let lines = session.priced_lines()?;
    let summary = session.summary()?;
    println!(
        "Shipping: {} to {}",
        session.shipping_method(),
        session.destination()
    );
    print!(
        "{}",
        render::cart(&lines, &summary, session.cart().item_count())
    );
    Ok(())
}

/// # Errors
///
/// Returns an error if the product or variant is unknown or the cart cannot
/// be saved.
pub fn add<S: KeyValueStore>(
    session: &mut ShopSession<S>,
    id: ProductId,
    size: Option<&str>,
    color: Option<&str>,
    qty: Quantity,
) -> Result<()> {
    session.add_to_cart(id, size, color, i64::from(qty.get()))?;
    info!(product_id = %id, quantity = qty.get(), "Added to cart");
    show(session)
}

/// # Errors
///
/// Returns an error if the line does not exist or the cart cannot be saved.
pub fn set<S: KeyValueStore>(session: &mut ShopSession<S>, line: usize, qty: Quantity) -> Result<()> {
    session.set_quantity(line, i64::from(qty.get()))?;
    show(session)
}

/// # Errors
///
/// Returns an error if the line does not exist or the cart cannot be saved.
pub fn remove<S: KeyValueStore>(session: &mut ShopSession<S>, line: usize) -> Result<()> {
    session.remove_item(line)?;
    show(session)
}

/// # Errors
///
/// Returns an error if the cart cannot be saved.
#[allow(clippy::print_stdout)]
pub fn clear<S: KeyValueStore>(session: &mut ShopSession<S>) -> Result<()> {
    session.clear_cart()?;
    println!("Cart cleared.");
    Ok(())
}
