//! End-to-end shopper sessions over a file-backed store.
//!
//! Each test gets its own temporary directory, so sessions can be dropped
//! and reopened the way a shopper closes and reopens the storefront.

#![allow(clippy::unwrap_used)]

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use tidewear_core::{Destination, FilterGroup, ProductId, ShippingMethod, SortKey};
use tidewear_integration_tests::SAMPLE_CATALOG;
use tidewear_storefront::catalog::{CatalogError, CatalogLoader, FileSource, Readiness};
use tidewear_storefront::checkout::CheckoutError;
use tidewear_storefront::store::{CART_KEY, CATALOG_KEY, FileStore, KeyValueStore};
use tidewear_storefront::{ShopSession, StorefrontError};

/// Write the sample catalog next to the store and return its path.
fn write_catalog(dir: &Path) -> PathBuf {
    let path = dir.join("products.json");
    fs::write(&path, SAMPLE_CATALOG).unwrap();
    path
}

fn open(dir: &Path) -> ShopSession<FileStore> {
    ShopSession::open(FileStore::open(dir.join("store")).unwrap()).unwrap()
}

fn loaded(dir: &Path) -> ShopSession<FileStore> {
    let catalog = write_catalog(dir);
    let mut session = open(dir);
    session.load_catalog(&FileSource::new(catalog)).unwrap();
    session
}

#[test]
fn test_first_load_caches_catalog() {
    let tmp = TempDir::new().unwrap();
    let catalog = write_catalog(tmp.path());

    let mut session = open(tmp.path());
    assert_eq!(session.readiness(), Readiness::NotReady);

    let readiness = session.load_catalog(&FileSource::new(&catalog)).unwrap();
    assert_eq!(readiness, Readiness::Ready);
    assert_eq!(session.catalog().len(), 10);

    let cached = session.store().get(CATALOG_KEY).unwrap().unwrap();
    assert_eq!(cached, SAMPLE_CATALOG);
}

#[test]
fn test_cached_catalog_survives_missing_source() {
    let tmp = TempDir::new().unwrap();
    drop(loaded(tmp.path()));

    // The source is gone, but the cache answers.
    fs::remove_file(tmp.path().join("products.json")).unwrap();
    let mut session = open(tmp.path());
    assert_eq!(session.readiness(), Readiness::Ready);

    let missing = FileSource::new(tmp.path().join("products.json"));
    assert_eq!(session.load_catalog(&missing).unwrap(), Readiness::Ready);
}

#[test]
fn test_missing_source_without_cache_fails() {
    let tmp = TempDir::new().unwrap();
    let mut session = open(tmp.path());

    let err = session
        .load_catalog(&FileSource::new(tmp.path().join("nope.json")))
        .unwrap_err();
    assert!(matches!(
        err,
        StorefrontError::Catalog(CatalogError::Source { .. })
    ));
    assert_eq!(session.readiness(), Readiness::NotReady);
}

#[test]
fn test_invalid_source_is_not_cached() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("products.json");
    fs::write(&path, r#"[{"id": 1, "name": "", "price": 10}]"#).unwrap();

    let mut session = open(tmp.path());
    assert!(session.load_catalog(&FileSource::new(&path)).is_err());
    assert_eq!(session.store().get(CATALOG_KEY).unwrap(), None);
}

#[test]
fn test_cart_persists_across_sessions() {
    let tmp = TempDir::new().unwrap();
    let mut session = loaded(tmp.path());

    session
        .add_to_cart(ProductId::new(2), Some("M"), Some("Navy"), 2)
        .unwrap();
    session.add_to_cart(ProductId::new(10), None, None, 1).unwrap();
    session
        .add_to_cart(ProductId::new(2), Some("M"), Some("Navy"), 1)
        .unwrap();
    drop(session);

    let reopened = open(tmp.path());
    let cart = reopened.cart();
    assert_eq!(cart.len(), 2);
    assert_eq!(cart.item_count(), 4);

    let dress = cart.get(0).unwrap();
    assert_eq!(dress.product_id, ProductId::new(2));
    assert_eq!(dress.size, "M");
    assert_eq!(dress.color, "Navy");
    assert_eq!(dress.quantity.get(), 3);

    // Quick add picks the first size and color.
    let tee = cart.get(1).unwrap();
    assert_eq!(tee.size, "S");
    assert_eq!(tee.color, "White");
}

#[test]
fn test_stored_cart_uses_wire_names() {
    let tmp = TempDir::new().unwrap();
    let mut session = loaded(tmp.path());
    session.add_to_cart(ProductId::new(3), None, None, 2).unwrap();

    let raw = session.store().get(CART_KEY).unwrap().unwrap();
    let lines: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(
        lines,
        serde_json::json!([{ "id": 3, "size": "XS", "color": "Black", "quantity": 2 }])
    );
}

#[test]
fn test_update_and_remove_lines() {
    let tmp = TempDir::new().unwrap();
    let mut session = loaded(tmp.path());
    session.add_to_cart(ProductId::new(1), None, None, 1).unwrap();
    session.add_to_cart(ProductId::new(4), None, None, 1).unwrap();

    session.set_quantity(1, 3).unwrap();
    session.remove_item(0).unwrap();
    assert!(session.set_quantity(0, 0).is_err());
    drop(session);

    let reopened = open(tmp.path());
    assert_eq!(reopened.cart().len(), 1);
    assert_eq!(reopened.cart().get(0).unwrap().product_id, ProductId::new(4));
    assert_eq!(reopened.cart().item_count(), 3);
}

#[test]
fn test_summary_for_session_cart() {
    let tmp = TempDir::new().unwrap();
    let mut session = loaded(tmp.path());
    session.add_to_cart(ProductId::new(2), None, None, 2).unwrap();
    session.add_to_cart(ProductId::new(10), None, None, 1).unwrap();

    // 2 x 98.50 + 35.00 = 232.00, standard to Canada
    let summary = session.summary().unwrap();
    assert_eq!(summary.merchandise_total.display(), "$232.00");
    assert_eq!(summary.shipping.display(), "$10.00");
    assert_eq!(summary.tax.display(), "$12.10");
    assert_eq!(summary.total.display(), "$254.10");

    session.set_destination(Destination::UnitedStates);
    session.set_shipping_method(ShippingMethod::Priority);
    let summary = session.summary().unwrap();
    assert_eq!(summary.shipping.display(), "$50.00");
    assert!(summary.tax.is_zero());
    assert_eq!(summary.total.display(), "$282.00");
}

#[test]
fn test_checkout_clears_persisted_cart() {
    let tmp = TempDir::new().unwrap();
    let mut session = loaded(tmp.path());
    session.add_to_cart(ProductId::new(5), None, None, 3).unwrap();

    // 630 is above the free shipping threshold.
    let receipt = session.checkout().unwrap();
    assert_eq!(receipt.item_count, 3);
    assert!(receipt.summary.shipping.is_zero());
    assert_eq!(receipt.summary.total.display(), "$661.50");
    assert!(session.cart().is_empty());
    drop(session);

    assert!(open(tmp.path()).cart().is_empty());
}

#[test]
fn test_checkout_with_empty_cart() {
    let tmp = TempDir::new().unwrap();
    let mut session = loaded(tmp.path());

    let err = session.checkout().unwrap_err();
    assert!(matches!(
        err,
        StorefrontError::Checkout(CheckoutError::EmptyCart)
    ));
}

#[test]
fn test_browse_and_product_pages() {
    let tmp = TempDir::new().unwrap();
    let mut session = loaded(tmp.path());

    let featured: Vec<_> = session.featured().unwrap().iter().map(|p| p.id).collect();
    assert_eq!(featured, [1, 2, 3, 4].map(ProductId::new));

    let filters = session.filters_mut();
    filters.select(FilterGroup::Gender, "womens");
    filters.select(FilterGroup::Category, "Bottoms");
    session.set_sort(SortKey::Price);
    let names: Vec<_> = session
        .browse()
        .unwrap()
        .iter()
        .map(|p| p.name.as_str())
        .collect();
    assert_eq!(names, ["Slip Skirt", "Pleated Wide-Leg Trouser"]);

    let detail = session.product(ProductId::new(4)).unwrap();
    assert_eq!(detail.breadcrumb.to_string(), "Home > mens > Bottoms > Tapered Chino");
    let related: Vec<_> = detail.related.iter().map(|p| p.id).collect();
    assert_eq!(related, [7, 9].map(ProductId::new));

    let detail = session.product(ProductId::new(1)).unwrap();
    let related: Vec<_> = detail.related.iter().map(|p| p.id).collect();
    assert_eq!(related, [3, 6, 10].map(ProductId::new));
}

#[test]
fn test_unreadable_cart_is_replaced_on_clear() {
    let tmp = TempDir::new().unwrap();
    drop(loaded(tmp.path()));
    fs::write(
        tmp.path().join("store").join("a2-cart.json"),
        r#"[{"id":3,"size":"XS","color":"Black","quantity":0}]"#,
    )
    .unwrap();

    let mut session = open(tmp.path());
    assert!(session.cart().is_empty());
    assert_eq!(session.readiness(), Readiness::Ready);

    session.clear_cart().unwrap();
    drop(session);

    let session = open(tmp.path());
    assert!(session.cart().is_empty());
    assert_eq!(session.store().get(CART_KEY).unwrap().unwrap(), "[]");
}

#[test]
fn test_damaged_catalog_cache_recovers_after_invalidate() {
    let tmp = TempDir::new().unwrap();
    let source = FileSource::new(write_catalog(tmp.path()));
    let store_dir = tmp.path().join("store");
    let mut store = FileStore::open(&store_dir).unwrap();
    store
        .set(
            CATALOG_KEY,
            r#"[{"id":1,"name":"x","price":1,"sizes":[],"color":[]}]"#,
        )
        .unwrap();

    assert!(ShopSession::open(FileStore::open(&store_dir).unwrap()).is_err());

    CatalogLoader::invalidate(&mut store).unwrap();
    let mut session = open(tmp.path());
    assert_eq!(session.readiness(), Readiness::NotReady);

    assert_eq!(session.load_catalog(&source).unwrap(), Readiness::Ready);
    assert_eq!(session.catalog().len(), 10);
    assert_eq!(session.store().get(CATALOG_KEY).unwrap().unwrap(), SAMPLE_CATALOG);
}
