//! The menu catalog the store's cart and favorite operations refer to.

mod query;

pub use query::*;

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};

use crate::domain::{Category, ItemId, MenuItem, Review, ReviewDraft};
use crate::error::StoreError;

/// Read-only list of menu items.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: Vec<MenuItem>,
    last_review_id: u64,
}

impl Catalog {
    pub fn new(items: Vec<MenuItem>) -> Self {
        Self {
            items,
            last_review_id: 0,
        }
    }

    /// The restaurant's standard menu.
    pub fn seeded() -> Self {
        Self::new(vec![
            MenuItem::new(
                1,
                "Nasi Goreng Spesial",
                25_000,
                Category::MainCourse,
                "Nasi goreng dengan telur, ayam, dan sayuran",
            )
            .with_rating(4.5, 128),
            MenuItem::new(
                2,
                "Mie Goreng",
                20_000,
                Category::MainCourse,
                "Mie goreng pedas dengan telur dan sayuran",
            )
            .with_rating(4.3, 95),
            MenuItem::new(
                3,
                "Ayam Goreng Kriuk",
                30_000,
                Category::MainCourse,
                "Ayam goreng renyah dengan bumbu special",
            )
            .with_rating(4.8, 203),
            MenuItem::new(4, "Es Teh Manis", 5_000, Category::Drink, "Es teh manis segar")
                .with_rating(4.6, 312),
            MenuItem::new(
                5,
                "Jus Jeruk",
                12_000,
                Category::Drink,
                "Jus jeruk segar tanpa gula tambahan",
            )
            .with_rating(4.7, 156),
            MenuItem::new(
                6,
                "Sate Ayam",
                28_000,
                Category::MainCourse,
                "Sate ayam dengan bumbu kacang",
            )
            .with_rating(4.4, 87),
        ])
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    pub fn get(&self, id: ItemId) -> Option<&MenuItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Categories that have at least one item, in display order.
    pub fn categories(&self) -> Vec<Category> {
        let present: BTreeSet<Category> = self.items.iter().map(|item| item.category).collect();
        Category::ALL
            .into_iter()
            .filter(|category| present.contains(category))
            .collect()
    }

    /// Filters and sorts the menu for a browse screen.
    pub fn query(&self, query: &MenuQuery, favorites: &BTreeSet<ItemId>) -> Vec<MenuItem> {
        query.apply(&self.items, favorites)
    }

    /// Validates a review for one of the catalog's items.
    ///
    /// The review is returned to the caller only; the menu items are
    /// reference data and are not updated. Ids come from a counter and are
    /// only consumed by accepted reviews.
    pub fn submit_review(
        &mut self,
        item_id: ItemId,
        draft: ReviewDraft,
        now: DateTime<Utc>,
    ) -> Result<Review, StoreError> {
        if self.get(item_id).is_none() {
            return Err(StoreError::UnknownItem(item_id));
        }
        let review = draft.submit(self.last_review_id + 1, now)?;
        self.last_review_id = review.id;
        Ok(review)
    }
}
