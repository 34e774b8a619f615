//! Checkout command.

use tidewear_storefront::store::KeyValueStore;
use tidewear_storefront::{Result, ShopSession};

use crate::render;

/// Place the order and print the receipt.
///
/// # Errors
///
/// Returns `CheckoutError::EmptyCart` for an empty cart, or any pricing or
/// store error.
#[allow(clippy::print_stdout)]
pub fn run<S: KeyValueStore>(session: &mut ShopSession<S>) -> Result<()> {
    let receipt = session.checkout()?;
    print!("{}", render::receipt(&receipt));
    Ok(())
}
