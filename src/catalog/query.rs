use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::ops::RangeInclusive;

use crate::domain::{Category, ItemId, MenuItem};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    NameAsc,
    NameDesc,
    PriceAsc,
    PriceDesc,
    RatingDesc,
}

impl SortOrder {
    fn compare(self, a: &MenuItem, b: &MenuItem) -> Ordering {
        match self {
            SortOrder::NameAsc => compare_names(&a.name, &b.name),
            SortOrder::NameDesc => compare_names(&b.name, &a.name),
            SortOrder::PriceAsc => a.price.cmp(&b.price),
            SortOrder::PriceDesc => b.price.cmp(&a.price),
            SortOrder::RatingDesc => b.rating.total_cmp(&a.rating),
        }
    }
}

fn compare_names(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Browse-screen filters. `category: None` means all categories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuQuery {
    pub category: Option<Category>,
    pub search: String,
    pub favorites_only: bool,
    pub price_range: RangeInclusive<u64>,
    pub sort: SortOrder,
}

impl Default for MenuQuery {
    fn default() -> Self {
        Self {
            category: None,
            search: String::new(),
            favorites_only: false,
            price_range: 0..=100_000,
            sort: SortOrder::default(),
        }
    }
}

impl MenuQuery {
    pub fn apply(&self, items: &[MenuItem], favorites: &BTreeSet<ItemId>) -> Vec<MenuItem> {
        let search = self.search.trim();
        let mut result: Vec<MenuItem> = items
            .iter()
            .filter(|item| self.category.map_or(true, |category| item.category == category))
            .filter(|item| search.is_empty() || item.matches(search))
            .filter(|item| !self.favorites_only || favorites.contains(&item.id))
            .filter(|item| self.price_range.contains(&item.price))
            .cloned()
            .collect();

        // Stable, so ties keep catalog order.
        result.sort_by(|a, b| self.sort.compare(a, b));
        result
    }
}
