//! Plain-text views of storefront data.
//!
//! Every function builds a `String`; printing happens in the command
//! handlers.

use std::fmt::Write as _;

use tidewear_core::Product;
use tidewear_storefront::browse::{ActiveFilter, BrowseResults};
use tidewear_storefront::checkout::Receipt;
use tidewear_storefront::pricing::{OrderSummary, PricedLine};
use tidewear_storefront::session::ProductDetail;

/// One catalog row: id, name, category and price.
pub fn product_row(product: &Product) -> String {
    format!(
        "{:>4}  {:<32} {:<14} {:>10}",
        product.id,
        product.name,
        product.category,
        product.price.display()
    )
}

pub fn product_list(products: &[&Product]) -> String {
    let mut out = String::new();
    for product in products {
        let _ = writeln!(out, "{}", product_row(product));
    }
    out
}

/// Product page: breadcrumb, details, options, related products.
pub fn product_detail(detail: &ProductDetail<'_>) -> String {
    let product = detail.product;
    let mut out = String::new();

    let _ = writeln!(out, "{}", detail.breadcrumb);
    let _ = writeln!(out);
    let _ = writeln!(out, "{}  {}", product.name, product.price.display());
    if !product.description.is_empty() {
        let _ = writeln!(out, "{}", product.description);
    }
    if !product.material.is_empty() {
        let _ = writeln!(out, "Material: {}", product.material);
    }
    let _ = writeln!(out, "Sizes:  {}", product.sizes.join(", "));
    let colors: Vec<&str> = product.color_names().collect();
    let _ = writeln!(out, "Colors: {}", colors.join(", "));

    if !detail.related.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "You may also like:");
        out.push_str(&product_list(&detail.related));
    }
    out
}

/// Filter chips shown above browse results, e.g. `[size: M] [color: Red]`.
pub fn filter_chips(filters: &[ActiveFilter]) -> String {
    filters
        .iter()
        .map(|filter| format!("[{}: {}]", filter.group, filter.value))
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn browse_results(results: &BrowseResults<'_>, filters: &[ActiveFilter]) -> String {
    let mut out = String::new();

    if !filters.is_empty() {
        let _ = writeln!(out, "Filters: {}", filter_chips(filters));
    }
    if results.is_empty() {
        let _ = writeln!(out, "No products match your filters.");
        return out;
    }

    let noun = if results.len() == 1 { "product" } else { "products" };
    let _ = writeln!(out, "Showing {} {noun}", results.len());
    out.push_str(&product_list(&results.products));
    out
}

/// Cart table with 1-based line numbers, followed by the order summary.
pub fn cart(lines: &[PricedLine<'_>], summary: &OrderSummary, item_count: u64) -> String {
    let mut out = String::new();

    if lines.is_empty() {
        let _ = writeln!(out, "Your cart is empty.");
    } else {
        for (number, priced) in (1..).zip(lines) {
            let _ = writeln!(
                out,
                "{number:>3}. {:<32} {:<4} {:<10} {:>3} x {:>9} = {:>10}",
                priced.product.name,
                priced.line.size,
                priced.line.color,
                priced.line.quantity,
                priced.unit_price().display(),
                priced.subtotal.display()
            );
        }
        let _ = writeln!(out, "Items: {item_count}");
    }

    let _ = writeln!(out);
    out.push_str(&order_summary(summary));
    out
}

pub fn order_summary(summary: &OrderSummary) -> String {
    let shipping = if summary.shipping.is_zero() {
        "FREE".to_owned()
    } else {
        summary.shipping.display()
    };

    let mut out = String::new();
    let _ = writeln!(out, "Subtotal: {:>10}", summary.merchandise_total.display());
    let _ = writeln!(out, "Shipping: {shipping:>10}");
    let _ = writeln!(out, "Tax:      {:>10}", summary.tax.display());
    let _ = writeln!(out, "Total:    {:>10}", summary.total.display());
    out
}

pub fn receipt(receipt: &Receipt) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Order placed. Thank you!");
    let _ = writeln!(out, "Order:  {}", receipt.order_id);
    let _ = writeln!(
        out,
        "Placed: {}",
        receipt.placed_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    let _ = writeln!(out, "Items:  {}", receipt.item_count);
    let _ = writeln!(out);
    out.push_str(&order_summary(&receipt.summary));
    out
}
