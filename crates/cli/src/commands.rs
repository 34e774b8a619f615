//! Command handlers. Each one drives the shopper session and prints a view
//! from [`crate::render`].

pub mod browse;
pub mod cart;
pub mod catalog;
pub mod checkout;

use tidewear_storefront::ShopSession;
use tidewear_storefront::store::KeyValueStore;

use crate::ShippingArgs;

/// Override the configured shipping choices with command-line flags.
pub fn apply_shipping<S: KeyValueStore>(session: &mut ShopSession<S>, args: &ShippingArgs) {
    if let Some(method) = args.method {
        session.set_shipping_method(method);
    }
    if let Some(destination) = args.destination {
        session.set_destination(destination);
    }
}
