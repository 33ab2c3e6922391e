use chrono::{DateTime, Utc};

use super::order::{Order, OrderStatus};
use crate::error::StoreError;

/// The customer's profile. `total_orders` and `total_spent` are derived from
/// order history and only change through [`Profile::refresh_totals`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub member_since: DateTime<Utc>,
    pub total_orders: usize,
    pub total_spent: u64,
}

/// Fields a customer may edit. `None` leaves the field unchanged.
#[derive(Debug, Clone, Default)]
pub struct ProfilePatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl Profile {
    pub fn guest(name: impl Into<String>, member_since: DateTime<Utc>) -> Self {
        Self {
            name: name.into(),
            email: String::new(),
            phone: String::new(),
            member_since,
            total_orders: 0,
            total_spent: 0,
        }
    }

    /// Applies an edit. A blank name is rejected before anything changes.
    pub fn apply(&mut self, patch: ProfilePatch) -> Result<(), StoreError> {
        if let Some(name) = &patch.name {
            if name.trim().is_empty() {
                return Err(StoreError::BlankProfileName);
            }
        }
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(email) = patch.email {
            self.email = email;
        }
        if let Some(phone) = patch.phone {
            self.phone = phone;
        }
        Ok(())
    }

    pub fn refresh_totals(&mut self, orders: &[Order]) {
        let totals = ProfileTotals::from_orders(orders);
        self.total_orders = totals.total_orders;
        self.total_spent = totals.total_spent;
    }
}

/// Aggregates recomputed from the full order history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProfileTotals {
    pub total_orders: usize,
    pub total_spent: u64,
}

impl ProfileTotals {
    pub fn from_orders(orders: &[Order]) -> Self {
        Self {
            total_orders: orders.len(),
            total_spent: orders
                .iter()
                .map(|order| order.total)
                .fold(0, u64::saturating_add),
        }
    }
}

/// Figures shown on the profile screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileStats {
    pub completed_orders: usize,
    pub in_progress_orders: usize,
    pub average_order_value: u64,
    pub favorite_count: usize,
    pub member_for: String,
}

impl ProfileStats {
    pub fn compute(
        profile: &Profile,
        orders: &[Order],
        favorite_count: usize,
        now: DateTime<Utc>,
    ) -> Self {
        let completed_orders = orders
            .iter()
            .filter(|order| order.status == OrderStatus::Delivered)
            .count();
        let average_order_value = match u64::try_from(orders.len()) {
            Ok(0) | Err(_) => 0,
            // Rounds half up.
            Ok(count) => {
                let remainder = profile.total_spent % count;
                profile.total_spent / count + u64::from(remainder >= count - remainder)
            }
        };

        Self {
            completed_orders,
            in_progress_orders: orders.len() - completed_orders,
            average_order_value,
            favorite_count,
            member_for: membership_duration(profile.member_since, now),
        }
    }
}

/// Human-readable membership length: days under a month, then months, then years.
pub fn membership_duration(since: DateTime<Utc>, now: DateTime<Utc>) -> String {
    const DAY_MS: i64 = 24 * 60 * 60 * 1000;

    let elapsed_ms = (now - since).num_milliseconds().abs();
    let days = (elapsed_ms + DAY_MS - 1) / DAY_MS;

    let (count, unit) = if days < 30 {
        (days, "day")
    } else if days < 365 {
        (days / 30, "month")
    } else {
        (days / 365, "year")
    };
    let plural = if count == 1 { "" } else { "s" };
    format!("{count} {unit}{plural}")
}
