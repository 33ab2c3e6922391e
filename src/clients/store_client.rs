use tokio::sync::{mpsc, watch};
use tracing::{debug, instrument};

use crate::domain::{
    CustomerInfo, ItemId, LineUpdate, MenuItem, NotificationId, NotificationKind, Order, OrderId,
    PaymentMethod, Profile, ProfilePatch, ProfileStats,
};
use crate::error::StoreError;
use crate::messages::StoreRequest;
use crate::store_actor::StoreSnapshot;

/// Cloneable handle to the store actor, used by the presentation layer.
#[derive(Clone)]
pub struct StoreClient {
    sender: mpsc::Sender<StoreRequest>,
    snapshots: watch::Receiver<StoreSnapshot>,
}

impl StoreClient {
    pub fn new(sender: mpsc::Sender<StoreRequest>, snapshots: watch::Receiver<StoreSnapshot>) -> Self {
        Self { sender, snapshots }
    }

    /// Receiver that sees a fresh [`StoreSnapshot`] after every mutation.
    pub fn subscribe(&self) -> watch::Receiver<StoreSnapshot> {
        self.snapshots.clone()
    }

    /// Manual method for special cases (no response needed)
    #[instrument(skip(self))]
    pub async fn shutdown(&self) -> Result<(), StoreError> {
        debug!("Sending shutdown request");
        self.sender
            .send(StoreRequest::Shutdown)
            .await
            .map_err(|e| StoreError::ActorCommunicationError(e.to_string()))
    }
}

// Cart
client_method!(StoreClient => fn add_to_cart(item: MenuItem) -> u32 as StoreRequest::AddToCart);
client_method!(StoreClient => fn remove_from_cart(item_id: ItemId) -> bool as StoreRequest::RemoveFromCart);
client_method!(StoreClient => fn increase_quantity(item_id: ItemId) -> LineUpdate as StoreRequest::IncreaseQuantity);
client_method!(StoreClient => fn decrease_quantity(item_id: ItemId) -> LineUpdate as StoreRequest::DecreaseQuantity);
client_method!(StoreClient => fn set_line_quantity(item_id: ItemId, quantity: u32) -> LineUpdate as StoreRequest::SetLineQuantity);
client_method!(StoreClient => fn clear_cart() -> () as StoreRequest::ClearCart);

// Favorites
client_method!(StoreClient => fn toggle_favorite(item_id: ItemId) -> bool as StoreRequest::ToggleFavorite);

// Orders
client_method!(StoreClient => fn checkout(customer: CustomerInfo, payment_method: Option<PaymentMethod>) -> Order as StoreRequest::Checkout);
client_method!(StoreClient => fn reorder(order: Order) -> usize as StoreRequest::Reorder);
client_method!(StoreClient => fn tick() -> usize as StoreRequest::Tick);
client_method!(StoreClient => fn get_order(id: OrderId) -> Option<Order> as StoreRequest::GetOrder);

// Profile and settings
client_method!(StoreClient => fn update_profile(patch: ProfilePatch) -> Profile as StoreRequest::UpdateProfile);
client_method!(StoreClient => fn profile_stats() -> ProfileStats as StoreRequest::GetProfileStats);
client_method!(StoreClient => fn toggle_dark_mode() -> bool as StoreRequest::ToggleDarkMode);

// Notifications
client_method!(StoreClient => fn add_notification(message: String, kind: NotificationKind) -> NotificationId as StoreRequest::AddNotification);
client_method!(StoreClient => fn clear_notification(id: NotificationId) -> bool as StoreRequest::ClearNotification);

client_method!(StoreClient => fn snapshot() -> StoreSnapshot as StoreRequest::GetSnapshot);
