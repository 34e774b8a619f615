//! Cart pricing: merchandise subtotal, shipping, tax and order total.
//!
//! Amounts are kept at full decimal precision. Nothing here rounds; the
//! presentation layer rounds with `Price::display`.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;
use tidewear_core::{CartLine, Destination, Price, Product, ProductId, ShippingMethod};
use tracing::instrument;

use crate::cart::Cart;

/// Merchandise totals strictly above this ship free.
pub const FREE_SHIPPING_THRESHOLD: u32 = 500;

/// Pricing errors. Both indicate bad data and must not be papered over.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PricingError {
    #[error("Cart references unknown product {0}")]
    UnknownProduct(ProductId),

    #[error("No shipping rate for {method} to {destination}")]
    UnknownRate {
        destination: Destination,
        method: ShippingMethod,
    },
}

/// Flat shipping rates keyed by destination and method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateTable {
    rates: HashMap<(Destination, ShippingMethod), Price>,
}

impl RateTable {
    /// The store's published rates.
    #[must_use]
    pub fn standard() -> Self {
        use Destination::{Canada, International, UnitedStates};
        use ShippingMethod::{Express, Priority, Standard};

        Self::from_entries([
            (Canada, Standard, 10),
            (Canada, Express, 25),
            (Canada, Priority, 35),
            (UnitedStates, Standard, 15),
            (UnitedStates, Express, 25),
            (UnitedStates, Priority, 50),
            (International, Standard, 20),
            (International, Express, 30),
            (International, Priority, 50),
        ])
    }

    /// Build a table from `(destination, method, whole units)` entries.
    ///
    /// Combinations left out have no rate and fail on lookup.
    #[must_use]
    pub fn from_entries(
        entries: impl IntoIterator<Item = (Destination, ShippingMethod, u32)>,
    ) -> Self {
        let rates = entries
            .into_iter()
            .map(|(destination, method, units)| ((destination, method), Price::from_units(units)))
            .collect();
        Self { rates }
    }

    /// Look up a rate.
    ///
    /// # Errors
    ///
    /// Returns `PricingError::UnknownRate` if the table has no entry.
    pub fn rate(
        &self,
        destination: Destination,
        method: ShippingMethod,
    ) -> Result<Price, PricingError> {
        self.rates
            .get(&(destination, method))
            .copied()
            .ok_or(PricingError::UnknownRate {
                destination,
                method,
            })
    }
}

impl Default for RateTable {
    fn default() -> Self {
        Self::standard()
    }
}

/// Sales tax charged for a single jurisdiction; every other destination is
/// untaxed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaxRule {
    pub jurisdiction: Destination,
    /// Fraction of merchandise plus shipping, e.g. `0.05`.
    pub rate: Decimal,
}

impl TaxRule {
    /// Tax owed on `taxable` when shipping to `destination`.
    #[must_use]
    pub fn tax_for(&self, destination: Destination, taxable: Price) -> Price {
        if destination == self.jurisdiction {
            taxable.scaled(self.rate)
        } else {
            Price::ZERO
        }
    }
}

impl Default for TaxRule {
    fn default() -> Self {
        Self {
            jurisdiction: Destination::Canada,
            rate: Decimal::new(5, 2),
        }
    }
}

/// The fixed tables that turn a cart into an order summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricingPolicy {
    pub rates: RateTable,
    pub free_shipping_threshold: Price,
    pub tax: TaxRule,
}

impl Default for PricingPolicy {
    fn default() -> Self {
        Self {
            rates: RateTable::standard(),
            free_shipping_threshold: Price::from_units(FREE_SHIPPING_THRESHOLD),
            tax: TaxRule::default(),
        }
    }
}

/// Totals shown in the cart summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OrderSummary {
    pub merchandise_total: Price,
    pub shipping: Price,
    pub tax: Price,
    pub total: Price,
}

/// A cart line joined with its product, for the cart table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PricedLine<'a> {
    pub line: &'a CartLine,
    pub product: &'a Product,
    pub subtotal: Price,
}

impl PricedLine<'_> {
    #[must_use]
    pub fn unit_price(&self) -> Price {
        self.product.price
    }
}

impl PricingPolicy {
    /// Shipping for a merchandise total: free above the threshold, otherwise
    /// the table rate.
    ///
    /// # Errors
    ///
    /// Returns `PricingError::UnknownRate` if the table has no entry.
    pub fn shipping(
        &self,
        merchandise_total: Price,
        method: ShippingMethod,
        destination: Destination,
    ) -> Result<Price, PricingError> {
        if merchandise_total > self.free_shipping_threshold {
            return Ok(Price::ZERO);
        }
        self.rates.rate(destination, method)
    }

    /// Compute the full summary for a cart.
    ///
    /// # Errors
    ///
    /// Returns `PricingError::UnknownProduct` if a line's product is missing
    /// and `PricingError::UnknownRate` if shipping cannot be priced.
    #[instrument(skip(self, cart, products), fields(lines = cart.len()))]
    pub fn summarize(
        &self,
        cart: &Cart,
        products: &[Product],
        method: ShippingMethod,
        destination: Destination,
    ) -> Result<OrderSummary, PricingError> {
        let merchandise_total = merchandise_total(cart, products)?;
        let shipping = self.shipping(merchandise_total, method, destination)?;
        let tax = self.tax.tax_for(destination, merchandise_total + shipping);

        Ok(OrderSummary {
            merchandise_total,
            shipping,
            tax,
            total: merchandise_total + shipping + tax,
        })
    }
}

/// Compute the order summary with the store's default policy.
///
/// # Errors
///
/// See [`PricingPolicy::summarize`].
pub fn compute_summary(
    cart: &Cart,
    products: &[Product],
    method: ShippingMethod,
    destination: Destination,
) -> Result<OrderSummary, PricingError> {
    PricingPolicy::default().summarize(cart, products, method, destination)
}

/// Sum of quantity times unit price over every line.
///
/// # Errors
///
/// Returns `PricingError::UnknownProduct` for a line whose product is not in
/// `products`.
pub fn merchandise_total(cart: &Cart, products: &[Product]) -> Result<Price, PricingError> {
    Ok(price_lines(cart, products)?
        .into_iter()
        .map(|priced| priced.subtotal)
        .sum())
}

/// Join each cart line with its product and line subtotal.
///
/// # Errors
///
/// Returns `PricingError::UnknownProduct` for a line whose product is not in
/// `products`.
pub fn price_lines<'a>(
    cart: &'a Cart,
    products: &'a [Product],
) -> Result<Vec<PricedLine<'a>>, PricingError> {
    cart.lines()
        .iter()
        .map(|line| {
            let product = products
                .iter()
                .find(|p| p.id == line.product_id)
                .ok_or_else(|| {
                    tracing::warn!(product_id = %line.product_id, "Cart line has no matching product");
                    PricingError::UnknownProduct(line.product_id)
                })?;
            Ok(PricedLine {
                line,
                product,
                subtotal: product.price.times(line.quantity),
            })
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use tidewear_core::ColorSwatch;

    use super::*;
    use crate::cart::{add_item, remove_item};

    fn product(id: i32, units: u32) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Product {id}"),
            gender: "womens".to_owned(),
            category: "Tops".to_owned(),
            description: String::new(),
            price: Price::from_units(units),
            material: String::new(),
            sizes: vec!["M".to_owned()],
            color: vec![ColorSwatch::named("Red")],
        }
    }

    fn cart_worth(units: u32) -> (Cart, Vec<Product>) {
        let products = vec![product(1, units)];
        let cart = add_item(&Cart::new(), ProductId::new(1), "M", "Red", 1).unwrap();
        (cart, products)
    }

    fn cents(value: i64) -> Price {
        Price::new(Decimal::new(value, 2)).unwrap()
    }

    #[test]
    fn test_canada_standard() {
        let (cart, products) = cart_worth(100);
        let summary =
            compute_summary(&cart, &products, ShippingMethod::Standard, Destination::Canada)
                .unwrap();

        assert_eq!(summary.merchandise_total, Price::from_units(100));
        assert_eq!(summary.shipping, Price::from_units(10));
        assert_eq!(summary.tax, cents(550));
        assert_eq!(summary.total, cents(11_550));
    }

    #[test]
    fn test_us_express_untaxed() {
        let (cart, products) = cart_worth(100);
        let summary = compute_summary(
            &cart,
            &products,
            ShippingMethod::Express,
            Destination::UnitedStates,
        )
        .unwrap();

        assert_eq!(summary.shipping, Price::from_units(25));
        assert_eq!(summary.tax, Price::ZERO);
        assert_eq!(summary.total, cents(12_500));
    }

    #[test]
    fn test_free_shipping_above_threshold() {
        let (cart, products) = cart_worth(520);
        for destination in Destination::ALL {
            for method in ShippingMethod::ALL {
                let summary = compute_summary(&cart, &products, method, destination).unwrap();
                assert_eq!(summary.shipping, Price::ZERO);
            }
        }
    }

    #[test]
    fn test_threshold_is_strict() {
        let (cart, products) = cart_worth(500);
        let summary = compute_summary(
            &cart,
            &products,
            ShippingMethod::Priority,
            Destination::International,
        )
        .unwrap();
        assert_eq!(summary.shipping, Price::from_units(50));
        assert_eq!(summary.total, Price::from_units(550));
    }

    #[test]
    fn test_free_shipping_tax_is_on_merchandise_only() {
        let (cart, products) = cart_worth(600);
        let summary =
            compute_summary(&cart, &products, ShippingMethod::Express, Destination::Canada)
                .unwrap();
        assert_eq!(summary.tax, Price::from_units(30));
        assert_eq!(summary.total, Price::from_units(630));
    }

    #[test]
    fn test_rate_table_matches_published_rates() {
        let table = RateTable::standard();
        let expected = [
            (Destination::Canada, [10, 25, 35]),
            (Destination::UnitedStates, [15, 25, 50]),
            (Destination::International, [20, 30, 50]),
        ];
        for (destination, rates) in expected {
            for (method, units) in ShippingMethod::ALL.into_iter().zip(rates) {
                assert_eq!(
                    table.rate(destination, method).unwrap(),
                    Price::from_units(units)
                );
            }
        }
    }

    #[test]
    fn test_missing_rate_fails_loudly() {
        let policy = PricingPolicy {
            rates: RateTable::from_entries([(Destination::Canada, ShippingMethod::Standard, 10)]),
            ..PricingPolicy::default()
        };
        let (cart, products) = cart_worth(100);

        let err = policy
            .summarize(&cart, &products, ShippingMethod::Express, Destination::Canada)
            .unwrap_err();
        assert_eq!(
            err,
            PricingError::UnknownRate {
                destination: Destination::Canada,
                method: ShippingMethod::Express,
            }
        );
    }

    #[test]
    fn test_unknown_product_is_an_error() {
        let products = vec![product(1, 100)];
        let cart = add_item(&Cart::new(), ProductId::new(1), "M", "Red", 1).unwrap();
        let cart = add_item(&cart, ProductId::new(42), "M", "Red", 1).unwrap();

        let err = compute_summary(&cart, &products, ShippingMethod::Standard, Destination::Canada)
            .unwrap_err();
        assert_eq!(err, PricingError::UnknownProduct(ProductId::new(42)));
    }

    #[test]
    fn test_remove_then_recompute() {
        let products = vec![product(1, 100), product(2, 40)];
        let cart = add_item(&Cart::new(), ProductId::new(1), "M", "Red", 2).unwrap();
        let cart = add_item(&cart, ProductId::new(2), "M", "Red", 1).unwrap();
        assert_eq!(
            merchandise_total(&cart, &products).unwrap(),
            Price::from_units(240)
        );

        let cart = remove_item(&cart, 0).unwrap();
        assert_eq!(
            merchandise_total(&cart, &products).unwrap(),
            Price::from_units(40)
        );
    }

    #[test]
    fn test_summary_is_pure() {
        let (cart, products) = cart_worth(100);
        let first =
            compute_summary(&cart, &products, ShippingMethod::Standard, Destination::Canada)
                .unwrap();
        let second =
            compute_summary(&cart, &products, ShippingMethod::Standard, Destination::Canada)
                .unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_price_lines() {
        let products = vec![product(1, 15), product(2, 40)];
        let cart = add_item(&Cart::new(), ProductId::new(2), "M", "Red", 3).unwrap();

        let lines = price_lines(&cart, &products).unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].product.id, ProductId::new(2));
        assert_eq!(lines[0].unit_price(), Price::from_units(40));
        assert_eq!(lines[0].subtotal, Price::from_units(120));
    }

    #[test]
    fn test_no_internal_rounding() {
        let mut item = product(1, 0);
        item.price = cents(333);
        let products = vec![item];
        let cart = add_item(&Cart::new(), ProductId::new(1), "M", "Red", 1).unwrap();

        let summary =
            compute_summary(&cart, &products, ShippingMethod::Standard, Destination::Canada)
                .unwrap();
        // (3.33 + 10) * 0.05 = 0.6665, kept exactly.
        assert_eq!(summary.tax.amount(), Decimal::new(6665, 4));
        assert_eq!(summary.total.display(), "$14.00");
    }
}
