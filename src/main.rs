use std::time::Duration;

use tracing::{error, info, warn, Instrument};

use order_store::app_system::{setup_tracing, StoreConfig, StoreSystem};
use order_store::catalog::{Catalog, MenuQuery, SortOrder};
use order_store::domain::{Category, CustomerInfo, OrderStatus, PaymentMethod, ProfilePatch};

/// Scripted session: browse, fill the cart, check out, watch the order get
/// delivered, then reorder it.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Setup tracing once for the entire application
    setup_tracing();

    let config = StoreConfig::load()?;
    info!(tick_interval_secs = config.tick_interval_secs, "Starting order store");

    let system = StoreSystem::new(&config)?;
    let catalog = Catalog::seeded();
    let client = &system.client;

    let query = MenuQuery {
        category: Some(Category::MainCourse),
        sort: SortOrder::RatingDesc,
        ..Default::default()
    };
    let favorites = client.snapshot().await?.favorites;
    let menu = catalog.query(&query, &favorites);
    info!(items = menu.len(), "Browsing main courses");

    let span = tracing::info_span!("fill_cart");
    async {
        for item in menu.iter().take(2) {
            client.add_to_cart(item.clone()).await?;
        }
        if let Some(drink) = catalog.get(4) {
            client.add_to_cart(drink.clone()).await?;
            client.increase_quantity(drink.id).await?;
        }
        if let Some(first) = menu.first() {
            client.toggle_favorite(first.id).await?;
        }
        Ok::<_, order_store::error::StoreError>(())
    }
    .instrument(span)
    .await?;

    let cart_total = client.snapshot().await?.cart_total;
    info!(cart_total, "Cart ready");

    // Missing payment method is rejected without touching the cart.
    let customer = CustomerInfo::new("Sari", "08123456789", "Jl. Merdeka 1, Bandung")
        .with_notes("Tidak pedas");
    if let Err(e) = client.checkout(customer.clone(), None).await {
        warn!(error = %e, "Checkout rejected");
    }

    let order = client
        .checkout(customer, Some(PaymentMethod::CashOnDelivery))
        .await?;
    info!(
        order_number = %order.order_number,
        total = order.total,
        estimated_delivery = %order.estimated_delivery,
        "Order placed"
    );

    client
        .update_profile(ProfilePatch {
            name: Some("Sari".to_string()),
            ..Default::default()
        })
        .await?;

    // Follow the order through the status ticker.
    let mut updates = client.subscribe();
    let wait = config.tick_interval() * 4 + Duration::from_secs(1);
    let tracking = async {
        loop {
            let status = updates
                .borrow_and_update()
                .orders
                .iter()
                .find(|o| o.id == order.id)
                .map(|o| o.status);
            if let Some(status) = status {
                info!(%status, progress = status.progress_percent(), "Order status");
                if status == OrderStatus::Delivered {
                    break;
                }
            }
            if updates.changed().await.is_err() {
                break;
            }
        }
    };
    if tokio::time::timeout(wait, tracking).await.is_err() {
        error!("Order was not delivered in time");
    }

    let reordered = client.reorder(order).await?;
    info!(lines = reordered, "Reordered last order");

    let stats = client.profile_stats().await?;
    info!(
        completed = stats.completed_orders,
        average_order_value = stats.average_order_value,
        member_for = %stats.member_for,
        "Profile stats"
    );

    system.shutdown().await;

    info!("Session completed successfully");
    Ok(())
}
