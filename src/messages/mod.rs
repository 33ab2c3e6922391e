use tokio::sync::oneshot;

use crate::domain::{
    CustomerInfo, ItemId, LineUpdate, MenuItem, NotificationId, NotificationKind, Order, OrderId,
    PaymentMethod, Profile, ProfilePatch, ProfileStats,
};
use crate::error::StoreError;
use crate::store_actor::StoreSnapshot;

/// Generic type aliases for service communication
pub type ServiceResult<T> = std::result::Result<T, StoreError>;
pub type ServiceResponse<T> = oneshot::Sender<ServiceResult<T>>;

/// Requests understood by the store actor. Each variant carries its
/// parameters and a oneshot channel for the response.
#[derive(Debug)]
pub enum StoreRequest {
    AddToCart {
        item: MenuItem,
        respond_to: ServiceResponse<u32>,
    },
    RemoveFromCart {
        item_id: ItemId,
        respond_to: ServiceResponse<bool>,
    },
    IncreaseQuantity {
        item_id: ItemId,
        respond_to: ServiceResponse<LineUpdate>,
    },
    DecreaseQuantity {
        item_id: ItemId,
        respond_to: ServiceResponse<LineUpdate>,
    },
    SetLineQuantity {
        item_id: ItemId,
        quantity: u32,
        respond_to: ServiceResponse<LineUpdate>,
    },
    ClearCart {
        respond_to: ServiceResponse<()>,
    },
    ToggleFavorite {
        item_id: ItemId,
        respond_to: ServiceResponse<bool>,
    },
    Checkout {
        customer: CustomerInfo,
        payment_method: Option<PaymentMethod>,
        respond_to: ServiceResponse<Order>,
    },
    Reorder {
        order: Order,
        respond_to: ServiceResponse<usize>,
    },
    /// Sent by the status ticker.
    Tick {
        respond_to: ServiceResponse<usize>,
    },
    GetOrder {
        id: OrderId,
        respond_to: ServiceResponse<Option<Order>>,
    },
    UpdateProfile {
        patch: ProfilePatch,
        respond_to: ServiceResponse<Profile>,
    },
    GetProfileStats {
        respond_to: ServiceResponse<ProfileStats>,
    },
    ToggleDarkMode {
        respond_to: ServiceResponse<bool>,
    },
    AddNotification {
        message: String,
        kind: NotificationKind,
        respond_to: ServiceResponse<NotificationId>,
    },
    ClearNotification {
        id: NotificationId,
        respond_to: ServiceResponse<bool>,
    },
    GetSnapshot {
        respond_to: ServiceResponse<StoreSnapshot>,
    },
    Shutdown,
}
