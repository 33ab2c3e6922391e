use tokio::sync::{mpsc, watch};
use tracing::{debug, info, instrument, warn};

use super::state::{StoreSnapshot, StoreState};
use crate::clients::StoreClient;
use crate::domain::{
    CustomerInfo, ItemId, LineUpdate, MenuItem, NotificationId, NotificationKind, Order, OrderId,
    PaymentMethod, Profile, ProfilePatch,
};
use crate::messages::{ServiceResponse, StoreRequest};

/// The store actor. Sole owner of [`StoreState`]; every request runs to
/// completion before the next one is received.
pub struct StoreService {
    receiver: mpsc::Receiver<StoreRequest>,
    state: StoreState,
    snapshots: watch::Sender<StoreSnapshot>,
}

impl StoreService {
    pub fn new(buffer_size: usize, state: StoreState) -> (Self, StoreClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let (snapshots, snapshot_rx) = watch::channel(state.snapshot());
        let service = Self {
            receiver,
            state,
            snapshots,
        };
        let client = StoreClient::new(sender, snapshot_rx);
        (service, client)
    }

    #[instrument(name = "store_service", skip(self))]
    pub async fn run(mut self) {
        info!("StoreService starting");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                StoreRequest::AddToCart { item, respond_to } => {
                    self.handle_add_to_cart(item, respond_to);
                }
                StoreRequest::RemoveFromCart {
                    item_id,
                    respond_to,
                } => {
                    self.handle_remove_from_cart(item_id, respond_to);
                }
                StoreRequest::IncreaseQuantity {
                    item_id,
                    respond_to,
                } => {
                    let update = self.state.increase_quantity(item_id);
                    self.handle_line_update(item_id, update, respond_to);
                }
                StoreRequest::DecreaseQuantity {
                    item_id,
                    respond_to,
                } => {
                    let update = self.state.decrease_quantity(item_id);
                    self.handle_line_update(item_id, update, respond_to);
                }
                StoreRequest::SetLineQuantity {
                    item_id,
                    quantity,
                    respond_to,
                } => {
                    let update = self.state.set_line_quantity(item_id, quantity);
                    self.handle_line_update(item_id, update, respond_to);
                }
                StoreRequest::ClearCart { respond_to } => {
                    self.handle_clear_cart(respond_to);
                }
                StoreRequest::ToggleFavorite {
                    item_id,
                    respond_to,
                } => {
                    self.handle_toggle_favorite(item_id, respond_to);
                }
                StoreRequest::Checkout {
                    customer,
                    payment_method,
                    respond_to,
                } => {
                    self.handle_checkout(customer, payment_method, respond_to);
                }
                StoreRequest::Reorder { order, respond_to } => {
                    self.handle_reorder(order, respond_to);
                }
                StoreRequest::Tick { respond_to } => {
                    self.handle_tick(respond_to);
                }
                StoreRequest::GetOrder { id, respond_to } => {
                    self.handle_get_order(id, respond_to);
                }
                StoreRequest::UpdateProfile { patch, respond_to } => {
                    self.handle_update_profile(patch, respond_to);
                }
                StoreRequest::GetProfileStats { respond_to } => {
                    let _ = respond_to.send(Ok(self.state.profile_stats()));
                }
                StoreRequest::ToggleDarkMode { respond_to } => {
                    let dark_mode = self.state.toggle_dark_mode();
                    debug!(dark_mode, "Dark mode toggled");
                    self.publish();
                    let _ = respond_to.send(Ok(dark_mode));
                }
                StoreRequest::AddNotification {
                    message,
                    kind,
                    respond_to,
                } => {
                    self.handle_add_notification(message, kind, respond_to);
                }
                StoreRequest::ClearNotification { id, respond_to } => {
                    self.handle_clear_notification(id, respond_to);
                }
                StoreRequest::GetSnapshot { respond_to } => {
                    let _ = respond_to.send(Ok(self.state.snapshot()));
                }
                StoreRequest::Shutdown => {
                    info!("StoreService shutting down");
                    break;
                }
            }
        }

        info!("StoreService stopped");
    }

    /// Pushes the current state to subscribers. Called after every mutation.
    fn publish(&self) {
        self.snapshots.send_replace(self.state.snapshot());
    }

    #[instrument(fields(item_id = item.id, item_name = %item.name), skip(self, item, respond_to))]
    fn handle_add_to_cart(&mut self, item: MenuItem, respond_to: ServiceResponse<u32>) {
        debug!("Processing add_to_cart request");

        let quantity = self.state.add_to_cart(&item);
        info!(quantity, cart_total = self.state.cart_total(), "Item added to cart");

        self.publish();
        let _ = respond_to.send(Ok(quantity));
    }

    #[instrument(skip(self, respond_to))]
    fn handle_remove_from_cart(&mut self, item_id: ItemId, respond_to: ServiceResponse<bool>) {
        debug!("Processing remove_from_cart request");

        let removed = self.state.remove_from_cart(item_id);
        if removed {
            info!("Item removed from cart");
        } else {
            debug!("Item was not in cart");
        }

        self.publish();
        let _ = respond_to.send(Ok(removed));
    }

    #[instrument(skip(self, respond_to))]
    fn handle_line_update(
        &mut self,
        item_id: ItemId,
        update: LineUpdate,
        respond_to: ServiceResponse<LineUpdate>,
    ) {
        match update {
            LineUpdate::Missing => debug!("No cart line for item"),
            _ => debug!(cart_total = self.state.cart_total(), "Cart line updated"),
        }

        self.publish();
        let _ = respond_to.send(Ok(update));
    }

    #[instrument(skip(self, respond_to))]
    fn handle_clear_cart(&mut self, respond_to: ServiceResponse<()>) {
        debug!("Processing clear_cart request");

        self.state.clear_cart();
        info!("Cart cleared");

        self.publish();
        let _ = respond_to.send(Ok(()));
    }

    #[instrument(skip(self, respond_to))]
    fn handle_toggle_favorite(&mut self, item_id: ItemId, respond_to: ServiceResponse<bool>) {
        debug!("Processing toggle_favorite request");

        let favorite = self.state.toggle_favorite(item_id);
        info!(favorite, "Favorite toggled");

        self.publish();
        let _ = respond_to.send(Ok(favorite));
    }

    #[instrument(skip(self, customer, respond_to))]
    fn handle_checkout(
        &mut self,
        customer: CustomerInfo,
        payment_method: Option<PaymentMethod>,
        respond_to: ServiceResponse<Order>,
    ) {
        info!(lines = self.state.cart().len(), "Processing checkout request");

        let result = self.state.checkout(customer, payment_method);
        match &result {
            Ok(order) => {
                info!(
                    order_id = order.id,
                    order_number = %order.order_number,
                    total = order.total,
                    "Order placed"
                );
                self.publish();
            }
            Err(e) => warn!(error = %e, "Checkout rejected"),
        }

        let _ = respond_to.send(result);
    }

    #[instrument(fields(order_id = order.id, order_number = %order.order_number), skip(self, order, respond_to))]
    fn handle_reorder(&mut self, order: Order, respond_to: ServiceResponse<usize>) {
        debug!("Processing reorder request");

        let lines = self.state.reorder(&order);
        info!(lines, cart_total = self.state.cart_total(), "Cart replaced from order");

        self.publish();
        let _ = respond_to.send(Ok(lines));
    }

    #[instrument(skip(self, respond_to))]
    fn handle_tick(&mut self, respond_to: ServiceResponse<usize>) {
        let advanced = self.state.advance_statuses();
        if advanced > 0 {
            info!(advanced, "Order statuses advanced");
            self.publish();
        } else {
            debug!("No orders in progress");
        }

        let _ = respond_to.send(Ok(advanced));
    }

    #[instrument(skip(self, respond_to))]
    fn handle_get_order(&self, id: OrderId, respond_to: ServiceResponse<Option<Order>>) {
        debug!("Processing get_order request");

        let order = self.state.order(id).cloned();
        match &order {
            Some(order) => debug!(status = %order.status, total = order.total, "Order found"),
            None => debug!("Order not found"),
        }

        let _ = respond_to.send(Ok(order));
    }

    #[instrument(skip(self, patch, respond_to))]
    fn handle_update_profile(&mut self, patch: ProfilePatch, respond_to: ServiceResponse<Profile>) {
        debug!("Processing update_profile request");

        let result = self.state.update_profile(patch);
        match &result {
            Ok(profile) => {
                info!(profile_name = %profile.name, "Profile updated");
                self.publish();
            }
            Err(e) => warn!(error = %e, "Profile update rejected"),
        }

        let _ = respond_to.send(result);
    }

    #[instrument(skip(self, message, respond_to))]
    fn handle_add_notification(
        &mut self,
        message: String,
        kind: NotificationKind,
        respond_to: ServiceResponse<NotificationId>,
    ) {
        let id = self.state.add_notification(message, kind);
        debug!(notification_id = id, "Notification added");

        self.publish();
        let _ = respond_to.send(Ok(id));
    }

    #[instrument(skip(self, respond_to))]
    fn handle_clear_notification(&mut self, id: NotificationId, respond_to: ServiceResponse<bool>) {
        let cleared = self.state.clear_notification(id);
        debug!(cleared, "Notification cleared");

        if cleared {
            self.publish();
        }
        let _ = respond_to.send(Ok(cleared));
    }
}
