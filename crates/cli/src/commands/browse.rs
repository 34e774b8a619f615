//! Filtered, sorted catalog listing.

use tidewear_core::FilterGroup;
use tidewear_storefront::store::KeyValueStore;
use tidewear_storefront::{Result, ShopSession};

use crate::{BrowseArgs, render};

/// # Errors
///
/// Returns `StorefrontError::CatalogNotReady` if no catalog is loaded.
#[allow(clippy::print_stdout)]
pub fn run<S: KeyValueStore>(session: &mut ShopSession<S>, args: BrowseArgs) -> Result<()> {
    let filters = session.filters_mut();
    filters.set_group(FilterGroup::Gender, args.gender);
    filters.set_group(FilterGroup::Category, args.category);
    filters.set_group(FilterGroup::Size, args.size);
    filters.set_group(FilterGroup::Color, args.color);
    session.set_sort(args.sort);

    let active = session.filters().active_filters();
    let results = session.browse()?;
    print!("{}", render::browse_results(&results, &active));
    Ok(())
}
