use std::fmt;

use thiserror::Error;

use crate::domain::ItemId;

/// Required checkout input that can be left blank.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutField {
    CustomerName,
    Phone,
    DeliveryAddress,
}

impl fmt::Display for CheckoutField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CheckoutField::CustomerName => "customer name",
            CheckoutField::Phone => "phone number",
            CheckoutField::DeliveryAddress => "delivery address",
        };
        f.write_str(label)
    }
}

/// Errors reported by store operations.
///
/// Everything except `ActorCommunicationError` is a user-input problem the
/// presentation layer should display; none of them leave the store changed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("Cart is empty")]
    EmptyCart,
    #[error("Missing {0}")]
    MissingField(CheckoutField),
    #[error("No payment method selected")]
    MissingPaymentMethod,
    #[error("Profile name must not be blank")]
    BlankProfileName,
    #[error("Invalid rating: {0} (expected 1 to 5 stars)")]
    InvalidRating(u8),
    #[error("Review text must not be blank")]
    BlankReview,
    #[error("Unknown menu item: {0}")]
    UnknownItem(ItemId),
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}
