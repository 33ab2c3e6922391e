//! # Mock Framework
//!
//! Utilities for testing code that talks to the store without spinning up a
//! real [`StoreService`](crate::store_actor::StoreService).
//!
//! Use [`create_mock_client`] to get a client and a receiver, then helpers
//! like [`expect_tick`] or [`expect_checkout`] to assert what was sent and to
//! answer on the actor's behalf.

use tokio::sync::{mpsc, watch};

use crate::app_system::StoreConfig;
use crate::clients::StoreClient;
use crate::domain::{CustomerInfo, MenuItem, Order, PaymentMethod};
use crate::messages::{ServiceResponse, StoreRequest};
use crate::store_actor::StoreState;

/// Creates a mock client and a receiver for asserting requests.
///
/// The client's snapshot receiver holds an empty store and never changes.
pub fn create_mock_client(buffer_size: usize) -> (StoreClient, mpsc::Receiver<StoreRequest>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    let (_, snapshots) = watch::channel(StoreState::new(&StoreConfig::default()).snapshot());
    (StoreClient::new(sender, snapshots), receiver)
}

/// Helper to verify that the next message is a Tick request
pub async fn expect_tick(
    receiver: &mut mpsc::Receiver<StoreRequest>,
) -> Option<ServiceResponse<usize>> {
    match receiver.recv().await {
        Some(StoreRequest::Tick { respond_to }) => Some(respond_to),
        _ => None,
    }
}

/// Helper to verify that the next message is an AddToCart request
pub async fn expect_add_to_cart(
    receiver: &mut mpsc::Receiver<StoreRequest>,
) -> Option<(MenuItem, ServiceResponse<u32>)> {
    match receiver.recv().await {
        Some(StoreRequest::AddToCart { item, respond_to }) => Some((item, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Checkout request
pub async fn expect_checkout(
    receiver: &mut mpsc::Receiver<StoreRequest>,
) -> Option<(CustomerInfo, Option<PaymentMethod>, ServiceResponse<Order>)> {
    match receiver.recv().await {
        Some(StoreRequest::Checkout {
            customer,
            payment_method,
            respond_to,
        }) => Some((customer, payment_method, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::error::StoreError;

    #[tokio::test]
    async fn test_mock_client() {
        let (client, mut receiver) = create_mock_client(10);

        let add_task = tokio::spawn(async move {
            let item = Catalog::seeded().get(2).cloned().unwrap();
            client.add_to_cart(item).await
        });

        let (item, responder) = expect_add_to_cart(&mut receiver)
            .await
            .expect("Expected AddToCart request");
        assert_eq!(item.name, "Mie Goreng");
        responder.send(Ok(1)).unwrap();

        let result = add_task.await.unwrap();
        assert_eq!(result, Ok(1));
    }

    #[tokio::test]
    async fn checkout_forwards_input_and_errors() {
        let (client, mut receiver) = create_mock_client(10);

        let checkout_task = tokio::spawn(async move {
            let customer = CustomerInfo::new("Sari", "0812", "Jl. Merdeka 1").with_notes("Pedas");
            client.checkout(customer, Some(PaymentMethod::Qris)).await
        });

        let (customer, payment_method, responder) = expect_checkout(&mut receiver)
            .await
            .expect("Expected Checkout request");
        assert_eq!(customer.notes.as_deref(), Some("Pedas"));
        assert_eq!(payment_method, Some(PaymentMethod::Qris));
        responder.send(Err(StoreError::EmptyCart)).unwrap();

        let result = checkout_task.await.unwrap();
        assert_eq!(result, Err(StoreError::EmptyCart));
    }

    #[tokio::test]
    async fn dropped_responder_is_a_communication_error() {
        let (client, mut receiver) = create_mock_client(10);

        let tick_task = tokio::spawn(async move { client.tick().await });

        let responder = expect_tick(&mut receiver).await.expect("Expected Tick request");
        drop(responder);

        let result = tick_task.await.unwrap();
        assert!(matches!(
            result,
            Err(StoreError::ActorCommunicationError(_))
        ));
    }
}
