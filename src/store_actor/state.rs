use std::collections::BTreeSet;

use chrono::{DateTime, TimeDelta, Utc};

use crate::app_system::StoreConfig;
use crate::domain::{
    Cart, CartLine, CustomerInfo, ItemId, LineUpdate, MenuItem, Notification, NotificationId,
    NotificationKind, Order, OrderId, PaymentMethod, Profile, ProfilePatch, ProfileStats,
};
use crate::error::StoreError;

/// Source of the current time. Injected so tests can pin it.
pub type Clock = Box<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// Owned copy of everything the presentation layer renders.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreSnapshot {
    pub cart: Vec<CartLine>,
    pub cart_total: u64,
    pub favorites: BTreeSet<ItemId>,
    pub orders: Vec<Order>,
    pub profile: Profile,
    pub notifications: Vec<Notification>,
    pub dark_mode: bool,
}

/// The store's state and every operation on it. Plain synchronous code; the
/// actor in `service.rs` serializes access.
pub struct StoreState {
    cart: Cart,
    favorites: BTreeSet<ItemId>,
    /// Most recent first.
    orders: Vec<Order>,
    profile: Profile,
    /// Most recent first.
    notifications: Vec<Notification>,
    dark_mode: bool,
    next_order_id: OrderId,
    next_notification_id: NotificationId,
    delivery_eta: TimeDelta,
    clock: Clock,
}

impl StoreState {
    pub fn new(config: &StoreConfig) -> Self {
        Self::with_clock(config, Utc::now)
    }

    pub fn with_clock(
        config: &StoreConfig,
        clock: impl Fn() -> DateTime<Utc> + Send + Sync + 'static,
    ) -> Self {
        let now = clock();
        Self {
            cart: Cart::default(),
            favorites: BTreeSet::new(),
            orders: Vec::new(),
            profile: Profile::guest(config.guest_name.clone(), now),
            notifications: Vec::new(),
            dark_mode: false,
            next_order_id: 1,
            next_notification_id: 1,
            delivery_eta: config.delivery_eta(),
            clock: Box::new(clock),
        }
    }

    // --- Cart ---

    /// Adds one unit of `item` and returns the line's quantity.
    pub fn add_to_cart(&mut self, item: &MenuItem) -> u32 {
        let quantity = self.cart.add(item);
        self.add_notification(
            format!("{} added to cart", item.name),
            NotificationKind::Success,
        );
        quantity
    }

    /// Removes the line for `item_id`. Returns whether it was in the cart.
    /// The removal notice is posted even when there was no line.
    pub fn remove_from_cart(&mut self, item_id: ItemId) -> bool {
        let removed = self.cart.remove(item_id);
        self.add_notification("Item removed from cart", NotificationKind::Info);
        removed
    }

    pub fn increase_quantity(&mut self, item_id: ItemId) -> LineUpdate {
        self.cart.increase(item_id)
    }

    /// Subtracts one unit; at quantity 1 the line is removed and the
    /// removal notice posted, as with [`Self::remove_from_cart`]. Unlike that
    /// method, a missing line is a silent [`LineUpdate::Missing`].
    pub fn decrease_quantity(&mut self, item_id: ItemId) -> LineUpdate {
        let update = self.cart.decrease(item_id);
        if update == LineUpdate::Removed {
            self.add_notification("Item removed from cart", NotificationKind::Info);
        }
        update
    }

    /// Sets a line's quantity; zero removes it with the removal notice. A
    /// missing line is a silent [`LineUpdate::Missing`].
    pub fn set_line_quantity(&mut self, item_id: ItemId, quantity: u32) -> LineUpdate {
        let update = self.cart.set_quantity(item_id, quantity);
        if update == LineUpdate::Removed {
            self.add_notification("Item removed from cart", NotificationKind::Info);
        }
        update
    }

    pub fn clear_cart(&mut self) {
        self.cart.clear();
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn cart_total(&self) -> u64 {
        self.cart.total()
    }

    // --- Favorites ---

    /// Flips membership of `item_id` and returns whether it is now a favorite.
    pub fn toggle_favorite(&mut self, item_id: ItemId) -> bool {
        if self.favorites.remove(&item_id) {
            self.add_notification("Removed from favorites", NotificationKind::Info);
            false
        } else {
            self.favorites.insert(item_id);
            self.add_notification("Added to favorites", NotificationKind::Success);
            true
        }
    }

    pub fn favorites(&self) -> &BTreeSet<ItemId> {
        &self.favorites
    }

    // --- Orders ---

    /// Turns the cart into a `Pending` order at the head of the history.
    ///
    /// All validation runs first; on error nothing changes.
    pub fn checkout(
        &mut self,
        customer: CustomerInfo,
        payment_method: Option<PaymentMethod>,
    ) -> Result<Order, StoreError> {
        if self.cart.is_empty() {
            return Err(StoreError::EmptyCart);
        }
        customer.validate()?;
        let payment_method = payment_method.ok_or(StoreError::MissingPaymentMethod)?;

        let id = self.next_order_id;
        self.next_order_id += 1;

        let order = Order::place(
            id,
            self.cart.take(),
            customer,
            payment_method,
            (self.clock)(),
            self.delivery_eta,
        );
        self.orders.insert(0, order.clone());
        self.history_changed();

        self.add_notification("Order placed successfully!", NotificationKind::Success);
        Ok(order)
    }

    /// Replaces the cart with the lines of a past order. Returns the number
    /// of lines now in the cart.
    pub fn reorder(&mut self, order: &Order) -> usize {
        self.cart = Cart::from_lines(order.items.iter().cloned());
        self.add_notification("Order added to cart", NotificationKind::Success);
        self.cart.len()
    }

    /// Advances every undelivered order by one status step, replacing the
    /// whole history. Returns how many orders moved.
    pub fn advance_statuses(&mut self) -> usize {
        let advanced = self
            .orders
            .iter()
            .filter(|order| !order.status.is_terminal())
            .count();
        if advanced == 0 {
            return 0;
        }

        self.orders = self
            .orders
            .iter()
            .map(|order| {
                if order.status.is_terminal() {
                    order.clone()
                } else {
                    order.advanced()
                }
            })
            .collect();
        self.history_changed();
        advanced
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn order(&self, id: OrderId) -> Option<&Order> {
        self.orders.iter().find(|order| order.id == id)
    }

    // --- Profile ---

    pub fn update_profile(&mut self, patch: ProfilePatch) -> Result<Profile, StoreError> {
        self.profile.apply(patch)?;
        Ok(self.profile.clone())
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn profile_stats(&self) -> ProfileStats {
        ProfileStats::compute(
            &self.profile,
            &self.orders,
            self.favorites.len(),
            (self.clock)(),
        )
    }

    pub fn toggle_dark_mode(&mut self) -> bool {
        self.dark_mode = !self.dark_mode;
        self.dark_mode
    }

    pub fn dark_mode(&self) -> bool {
        self.dark_mode
    }

    // --- Notifications ---

    pub fn add_notification(
        &mut self,
        message: impl Into<String>,
        kind: NotificationKind,
    ) -> NotificationId {
        let id = self.next_notification_id;
        self.next_notification_id += 1;
        self.notifications.insert(
            0,
            Notification {
                id,
                message: message.into(),
                kind,
                timestamp: (self.clock)(),
            },
        );
        id
    }

    pub fn clear_notification(&mut self, id: NotificationId) -> bool {
        let before = self.notifications.len();
        self.notifications.retain(|notification| notification.id != id);
        self.notifications.len() != before
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn snapshot(&self) -> StoreSnapshot {
        StoreSnapshot {
            cart: self.cart.lines().to_vec(),
            cart_total: self.cart.total(),
            favorites: self.favorites.clone(),
            orders: self.orders.clone(),
            profile: self.profile.clone(),
            notifications: self.notifications.clone(),
            dark_mode: self.dark_mode,
        }
    }

    fn history_changed(&mut self) {
        self.profile.refresh_totals(&self.orders);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::domain::OrderStatus;
    use chrono::TimeZone;

    fn state() -> StoreState {
        let now = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
        StoreState::with_clock(&StoreConfig::default(), move || now)
    }

    fn menu(id: ItemId) -> MenuItem {
        Catalog::seeded().get(id).cloned().unwrap()
    }

    fn customer() -> CustomerInfo {
        CustomerInfo::new("Sari", "08123456789", "Jl. Merdeka 1, Bandung")
    }

    #[test]
    fn starts_with_guest_profile() {
        let state = state();
        assert_eq!(state.profile().name, "Guest User");
        assert_eq!(state.profile().total_orders, 0);
        assert!(state.cart().is_empty());
        assert!(!state.dark_mode());
    }

    #[test]
    fn repeated_add_gives_one_line_with_call_count() {
        let mut state = state();
        let nasi = menu(1);
        for _ in 0..4 {
            state.add_to_cart(&nasi);
        }
        assert_eq!(state.cart().len(), 1);
        assert_eq!(state.cart().line(1).map(|line| line.quantity), Some(4));
        assert_eq!(state.notifications().len(), 4);
        assert_eq!(state.notifications()[0].kind, NotificationKind::Success);
    }

    #[test]
    fn remove_then_add_leaves_no_residual_quantity() {
        let mut state = state();
        let nasi = menu(1);
        state.add_to_cart(&nasi);
        state.add_to_cart(&nasi);
        assert!(state.remove_from_cart(1));
        assert_eq!(state.add_to_cart(&nasi), 1);
        assert_eq!(state.notifications()[1].kind, NotificationKind::Info);
    }

    #[test]
    fn decrease_to_zero_behaves_like_remove() {
        let mut state = state();
        state.add_to_cart(&menu(4));
        assert_eq!(state.increase_quantity(4), LineUpdate::Quantity(2));
        assert_eq!(state.decrease_quantity(4), LineUpdate::Quantity(1));
        assert_eq!(state.decrease_quantity(4), LineUpdate::Removed);
        assert!(state.cart().is_empty());
        assert_eq!(state.notifications()[0].message, "Item removed from cart");
    }

    #[test]
    fn quantity_changes_on_missing_lines_post_nothing() {
        let mut state = state();
        assert_eq!(state.decrease_quantity(4), LineUpdate::Missing);
        assert_eq!(state.set_line_quantity(4, 0), LineUpdate::Missing);
        assert_eq!(state.increase_quantity(4), LineUpdate::Missing);
        assert!(state.notifications().is_empty());

        assert!(!state.remove_from_cart(4));
        assert_eq!(state.notifications().len(), 1);
        assert_eq!(state.notifications()[0].message, "Item removed from cart");
    }

    #[test]
    fn checkout_on_empty_cart_changes_nothing() {
        let mut state = state();
        let before = state.snapshot();
        assert_eq!(
            state.checkout(customer(), Some(PaymentMethod::Qris)),
            Err(StoreError::EmptyCart)
        );
        assert_eq!(state.snapshot(), before);
    }

    #[test]
    fn checkout_with_missing_fields_keeps_cart() {
        let mut state = state();
        state.add_to_cart(&menu(1));
        let before = state.snapshot();

        let no_address = CustomerInfo::new("Sari", "0812", "   ");
        assert!(matches!(
            state.checkout(no_address, Some(PaymentMethod::Qris)),
            Err(StoreError::MissingField(_))
        ));
        assert_eq!(
            state.checkout(customer(), None),
            Err(StoreError::MissingPaymentMethod)
        );
        assert_eq!(state.snapshot(), before);
    }

    #[test]
    fn single_item_checkout() {
        let mut state = state();
        state.add_to_cart(&menu(1));

        let order = state
            .checkout(customer(), Some(PaymentMethod::CashOnDelivery))
            .unwrap();

        assert_eq!(order.total, 25_000);
        assert_eq!(order.status, OrderStatus::Pending);
        assert!(order.order_number.starts_with("ORD"));
        assert!(state.cart().is_empty());
        assert_eq!(state.orders().first(), Some(&order));
        assert_eq!(state.profile().total_orders, 1);
        assert_eq!(state.profile().total_spent, 25_000);
        assert_eq!(state.notifications()[0].message, "Order placed successfully!");
    }

    #[test]
    fn total_spent_tracks_every_checkout() {
        let mut state = state();
        let mut expected = 0;
        for (id, times) in [(1, 1), (4, 3), (6, 2), (5, 1)] {
            for _ in 0..times {
                state.add_to_cart(&menu(id));
            }
            expected += state
                .checkout(customer(), Some(PaymentMethod::EWallet))
                .unwrap()
                .total;
            let sum: u64 = state.orders().iter().map(|order| order.total).sum();
            assert_eq!(state.profile().total_spent, sum);
        }
        assert_eq!(state.profile().total_spent, expected);
        assert_eq!(state.profile().total_orders, 4);
        // Newest first, ids keep increasing.
        let ids: Vec<OrderId> = state.orders().iter().map(|order| order.id).collect();
        assert_eq!(ids, vec![4, 3, 2, 1]);
    }

    #[test]
    fn progression_is_one_step_per_tick_and_stops_at_delivered() {
        let mut state = state();
        state.add_to_cart(&menu(2));
        let order = state
            .checkout(customer(), Some(PaymentMethod::BankTransfer))
            .unwrap();

        let status = |state: &StoreState| state.order(order.id).map(|o| o.status);

        assert_eq!(state.advance_statuses(), 1);
        assert_eq!(status(&state), Some(OrderStatus::Processing));
        state.advance_statuses();
        assert_eq!(status(&state), Some(OrderStatus::Delivering));
        state.advance_statuses();
        assert_eq!(status(&state), Some(OrderStatus::Delivered));
        assert_eq!(state.advance_statuses(), 0);
        assert_eq!(status(&state), Some(OrderStatus::Delivered));
    }

    #[test]
    fn progression_leaves_delivered_orders_alone() {
        let mut state = state();
        state.add_to_cart(&menu(2));
        state.checkout(customer(), Some(PaymentMethod::Qris)).unwrap();
        for _ in 0..3 {
            state.advance_statuses();
        }
        state.add_to_cart(&menu(3));
        state.checkout(customer(), Some(PaymentMethod::Qris)).unwrap();

        assert_eq!(state.advance_statuses(), 1);
        let statuses: Vec<OrderStatus> = state.orders().iter().map(|o| o.status).collect();
        assert_eq!(
            statuses,
            vec![OrderStatus::Processing, OrderStatus::Delivered]
        );
        assert_eq!(state.profile().total_orders, 2);
    }

    #[test]
    fn favorite_toggle_pair_restores_the_set() {
        let mut state = state();
        assert!(state.favorites().is_empty());
        assert!(state.toggle_favorite(3));
        assert_eq!(state.favorites().iter().copied().collect::<Vec<_>>(), vec![3]);
        assert!(!state.toggle_favorite(3));
        assert!(state.favorites().is_empty());
        assert_eq!(state.notifications()[0].message, "Removed from favorites");
        assert_eq!(state.notifications()[1].message, "Added to favorites");
    }

    #[test]
    fn reorder_replaces_the_cart() {
        let mut state = state();
        state.add_to_cart(&menu(1));
        state.add_to_cart(&menu(1));
        state.add_to_cart(&menu(4));
        let order = state
            .checkout(customer(), Some(PaymentMethod::Qris))
            .unwrap();

        state.add_to_cart(&menu(6));
        assert_eq!(state.reorder(&order), 2);

        assert_eq!(state.cart().lines(), order.items.as_slice());
        assert!(state.cart().line(6).is_none());
        assert_eq!(state.cart_total(), order.total);
        // History untouched.
        assert_eq!(state.orders().len(), 1);
        assert_eq!(state.profile().total_orders, 1);
    }

    #[test]
    fn notifications_are_newest_first_and_clearable() {
        let mut state = state();
        let first = state.add_notification("first", NotificationKind::Info);
        let second = state.add_notification("second", NotificationKind::Warning);
        assert_ne!(first, second);
        assert_eq!(state.notifications()[0].message, "second");

        assert!(state.clear_notification(first));
        assert!(!state.clear_notification(first));
        assert_eq!(state.notifications().len(), 1);
        assert_eq!(state.notifications()[0].id, second);
    }

    #[test]
    fn profile_edit_validates_name() {
        let mut state = state();
        let result = state.update_profile(ProfilePatch {
            name: Some(String::new()),
            ..Default::default()
        });
        assert_eq!(result, Err(StoreError::BlankProfileName));

        let profile = state
            .update_profile(ProfilePatch {
                name: Some("Sari".into()),
                phone: Some("0812".into()),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(profile.name, "Sari");
        assert_eq!(state.profile().phone, "0812");
    }

    #[test]
    fn stats_count_favorites_and_orders() {
        let mut state = state();
        state.toggle_favorite(1);
        state.toggle_favorite(5);
        state.add_to_cart(&menu(1));
        state.checkout(customer(), Some(PaymentMethod::Qris)).unwrap();

        let stats = state.profile_stats();
        assert_eq!(stats.favorite_count, 2);
        assert_eq!(stats.in_progress_orders, 1);
        assert_eq!(stats.average_order_value, 25_000);
    }

    #[test]
    fn dark_mode_flips() {
        let mut state = state();
        assert!(state.toggle_dark_mode());
        assert!(!state.toggle_dark_mode());
    }
}
