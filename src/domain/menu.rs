use std::fmt;

use chrono::{DateTime, Utc};

use crate::error::StoreError;

/// Identifier of a menu item.
pub type ItemId = u32;

/// Menu section an item is listed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    MainCourse,
    Drink,
}

impl Category {
    pub const ALL: [Category; 2] = [Category::MainCourse, Category::Drink];

    /// Label shown on the menu tabs.
    pub fn label(&self) -> &'static str {
        match self {
            Category::MainCourse => "Makanan Utama",
            Category::Drink => "Minuman",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A customer review of a menu item.
#[derive(Debug, Clone, PartialEq)]
pub struct Review {
    pub id: u64,
    pub rating: u8,
    pub text: String,
    pub user_name: String,
    pub date: DateTime<Utc>,
}

/// Unvalidated review input as typed by the customer.
#[derive(Debug, Clone)]
pub struct ReviewDraft {
    pub rating: u8,
    pub text: String,
    pub user_name: String,
}

impl ReviewDraft {
    pub fn new(rating: u8, text: impl Into<String>, user_name: impl Into<String>) -> Self {
        Self {
            rating,
            text: text.into(),
            user_name: user_name.into(),
        }
    }

    /// Validates the draft and turns it into a [`Review`].
    ///
    /// # Errors
    /// - [`StoreError::InvalidRating`] unless the rating is between 1 and 5 stars
    /// - [`StoreError::BlankReview`] if the text is empty or whitespace
    pub fn submit(self, id: u64, date: DateTime<Utc>) -> Result<Review, StoreError> {
        if !(1..=5).contains(&self.rating) {
            return Err(StoreError::InvalidRating(self.rating));
        }
        if self.text.trim().is_empty() {
            return Err(StoreError::BlankReview);
        }
        Ok(Review {
            id,
            rating: self.rating,
            text: self.text,
            user_name: self.user_name,
            date,
        })
    }
}

/// A dish or drink on the menu. Reference data, never mutated by the store.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuItem {
    pub id: ItemId,
    pub name: String,
    /// Whole Rupiah.
    pub price: u64,
    pub category: Category,
    pub description: String,
    pub rating: f32,
    pub review_count: u32,
    pub reviews: Vec<Review>,
}

impl MenuItem {
    pub fn new(
        id: ItemId,
        name: impl Into<String>,
        price: u64,
        category: Category,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            category,
            description: description.into(),
            rating: 0.0,
            review_count: 0,
            reviews: Vec::new(),
        }
    }

    pub fn with_rating(mut self, rating: f32, review_count: u32) -> Self {
        self.rating = rating;
        self.review_count = review_count;
        self
    }

    /// Case-insensitive match against name and description.
    pub fn matches(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.name.to_lowercase().contains(&needle)
            || self.description.to_lowercase().contains(&needle)
    }
}
