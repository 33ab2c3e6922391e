//! # order-store
//!
//! The in-memory state store behind a food-ordering app: cart, favorites,
//! checkout, order history with simulated delivery progress, profile,
//! notifications, and the dark-mode flag.
//!
//! ## Pieces
//!
//! - **Domain types** - plain data for menu items, cart lines, orders and the profile → [`domain`]
//! - **Menu catalog** - reference data plus browse filtering and sorting → [`catalog::Catalog`]
//! - **Store state** - every operation as synchronous code → [`store_actor::StoreState`]
//! - **Store actor** - serializes access to the state over a channel → [`store_actor::StoreService`]
//! - **Client** - macro-generated, traced async methods → [`clients::StoreClient`]
//! - **Status ticker** - advances orders on a fixed period → [`ticker::StatusTicker`]
//! - **System coordinator** - startup, config and ordered shutdown → [`app_system::StoreSystem`]
//!
//! ## Example Usage
//!
//! ```no_run
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! use order_store::app_system::{StoreConfig, StoreSystem};
//! use order_store::catalog::Catalog;
//! use order_store::domain::{CustomerInfo, PaymentMethod};
//!
//! let system = StoreSystem::new(&StoreConfig::load()?)?;
//! let catalog = Catalog::seeded();
//!
//! if let Some(item) = catalog.get(1) {
//!     system.client.add_to_cart(item.clone()).await?;
//! }
//! let customer = CustomerInfo::new("Sari", "08123456789", "Jl. Merdeka 1");
//! let order = system
//!     .client
//!     .checkout(customer, Some(PaymentMethod::Qris))
//!     .await?;
//! println!("placed {}", order.order_number);
//!
//! system.shutdown().await;
//! # Ok(())
//! # }
//! ```

pub mod app_system;
pub mod catalog;
pub mod clients;
pub mod domain;
pub mod error;
pub mod messages;
pub mod store_actor;
pub mod ticker;

#[cfg(test)]
mod mock_framework;
