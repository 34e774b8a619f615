//! Browse filtering and sorting.
//!
//! Filters combine with AND across groups and OR within a group: a product
//! is shown when, for every group that has selections, it matches at least
//! one selected value. Size and color match against any of the product's
//! sizes or color names; gender and category compare the single field.
//!
//! Sorting is stable, so products with equal keys keep their catalog order.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use tidewear_core::{FilterGroup, Product, SortKey};
use tracing::instrument;

/// Selected values for each filter group.
///
/// An empty group places no restriction on results. Values keep the order
/// they were selected in and are never duplicated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    #[serde(default)]
    pub gender: Vec<String>,
    #[serde(default)]
    pub category: Vec<String>,
    #[serde(default)]
    pub size: Vec<String>,
    #[serde(default)]
    pub color: Vec<String>,
}

/// One selected filter value, as shown in the active-filter chips.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveFilter {
    pub group: FilterGroup,
    pub value: String,
}

impl FilterState {
    /// A filter state with no selections.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Selected values for a group.
    #[must_use]
    pub fn values(&self, group: FilterGroup) -> &[String] {
        match group {
            FilterGroup::Gender => &self.gender,
            FilterGroup::Category => &self.category,
            FilterGroup::Size => &self.size,
            FilterGroup::Color => &self.color,
        }
    }

    fn values_mut(&mut self, group: FilterGroup) -> &mut Vec<String> {
        match group {
            FilterGroup::Gender => &mut self.gender,
            FilterGroup::Category => &mut self.category,
            FilterGroup::Size => &mut self.size,
            FilterGroup::Color => &mut self.color,
        }
    }

    /// True when no group has a selection.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        FilterGroup::ALL
            .iter()
            .all(|group| self.values(*group).is_empty())
    }

    /// Add a value to a group. Returns `false` if it was already selected.
    pub fn select(&mut self, group: FilterGroup, value: impl Into<String>) -> bool {
        let value = value.into();
        let values = self.values_mut(group);
        if values.contains(&value) {
            return false;
        }
        values.push(value);
        true
    }

    /// Remove a value from a group. Returns `false` if it was not selected.
    pub fn deselect(&mut self, group: FilterGroup, value: &str) -> bool {
        let values = self.values_mut(group);
        let before = values.len();
        values.retain(|v| v != value);
        values.len() != before
    }

    /// Flip a value's selection, like ticking a checkbox.
    pub fn toggle(&mut self, group: FilterGroup, value: impl Into<String>) {
        let value = value.into();
        if !self.deselect(group, &value) {
            self.values_mut(group).push(value);
        }
    }

    /// Replace a group's selection wholesale.
    pub fn set_group<I, V>(&mut self, group: FilterGroup, values: I)
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        self.values_mut(group).clear();
        for value in values {
            self.select(group, value);
        }
    }

    /// Drop every selection.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Every selected value, in group order then selection order.
    #[must_use]
    pub fn active_filters(&self) -> Vec<ActiveFilter> {
        FilterGroup::ALL
            .iter()
            .flat_map(|group| {
                self.values(*group).iter().map(|value| ActiveFilter {
                    group: *group,
                    value: value.clone(),
                })
            })
            .collect()
    }

    /// Whether a product passes every non-empty group.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        accepts(&self.gender, |v| product.gender == v)
            && accepts(&self.category, |v| product.category == v)
            && accepts(&self.size, |v| product.has_size(v))
            && accepts(&self.color, |v| product.has_color(v))
    }
}

fn accepts(selected: &[String], predicate: impl Fn(&str) -> bool) -> bool {
    selected.is_empty() || selected.iter().any(|v| predicate(v))
}

/// Filtered and ordered products for one browse request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowseResults<'a> {
    pub products: Vec<&'a Product>,
}

impl<'a> BrowseResults<'a> {
    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// True when the filters exclude every product.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a Product> + '_ {
        self.products.iter().copied()
    }
}

/// Filter `products` by `filters`, then order by `sort`.
///
/// The input slice is left untouched.
#[must_use]
#[instrument(skip(products), fields(catalog_size = products.len()))]
pub fn filter_and_sort<'a>(
    products: &'a [Product],
    filters: &FilterState,
    sort: SortKey,
) -> BrowseResults<'a> {
    let mut results: Vec<&Product> = products.iter().filter(|p| filters.matches(p)).collect();
    results.sort_by(|a, b| compare(a, b, sort));

    tracing::debug!(matched = results.len(), "Applied browse filters");
    BrowseResults { products: results }
}

fn compare(a: &Product, b: &Product, sort: SortKey) -> Ordering {
    match sort {
        SortKey::Name => compare_text(&a.name, &b.name),
        SortKey::Price => a.price.cmp(&b.price),
        SortKey::Category => compare_text(&a.category, &b.category),
    }
}

/// Case-aware text ordering: letters compare case-insensitively first, and
/// case only breaks ties, lowercase first ("apple" < "banana" < "Banana").
#[must_use]
pub fn compare_text(a: &str, b: &str) -> Ordering {
    let folded_a = a.chars().flat_map(char::to_lowercase);
    let folded_b = b.chars().flat_map(char::to_lowercase);
    folded_a.cmp(folded_b).then_with(|| b.cmp(a))
}
