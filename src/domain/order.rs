use std::fmt;

use chrono::{DateTime, Local, TimeDelta, Utc};

use super::cart::{sum_subtotals, CartLine};
use crate::error::{CheckoutField, StoreError};

/// Identifier of a placed order.
pub type OrderId = u64;

/// Delivery progress of an order. Only ever moves forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OrderStatus {
    Pending,
    Processing,
    Delivering,
    Delivered,
}

impl OrderStatus {
    /// The following step; `Delivered` stays `Delivered`.
    pub fn next(self) -> Self {
        match self {
            OrderStatus::Pending => OrderStatus::Processing,
            OrderStatus::Processing => OrderStatus::Delivering,
            OrderStatus::Delivering | OrderStatus::Delivered => OrderStatus::Delivered,
        }
    }

    pub fn is_terminal(self) -> bool {
        self == OrderStatus::Delivered
    }

    /// Fill level of the tracking bar.
    pub fn progress_percent(self) -> u8 {
        match self {
            OrderStatus::Pending => 25,
            OrderStatus::Processing => 50,
            OrderStatus::Delivering => 75,
            OrderStatus::Delivered => 100,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Processing => "Processing",
            OrderStatus::Delivering => "Delivering",
            OrderStatus::Delivered => "Delivered",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaymentMethod {
    CashOnDelivery,
    BankTransfer,
    EWallet,
    Qris,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 4] = [
        PaymentMethod::CashOnDelivery,
        PaymentMethod::BankTransfer,
        PaymentMethod::EWallet,
        PaymentMethod::Qris,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PaymentMethod::CashOnDelivery => "Cash on Delivery (COD)",
            PaymentMethod::BankTransfer => "Transfer Bank",
            PaymentMethod::EWallet => "E-Wallet",
            PaymentMethod::Qris => "QRIS",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            PaymentMethod::CashOnDelivery => "Bayar saat pesanan sampai",
            PaymentMethod::BankTransfer => "BCA, Mandiri, BNI, BRI",
            PaymentMethod::EWallet => "GoPay, OVO, Dana, ShopeePay",
            PaymentMethod::Qris => "Scan QR untuk bayar",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Contact and delivery details entered at checkout.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerInfo {
    pub name: String,
    pub phone: String,
    pub address: String,
    pub notes: Option<String>,
}

impl CustomerInfo {
    pub fn new(
        name: impl Into<String>,
        phone: impl Into<String>,
        address: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
            address: address.into(),
            notes: None,
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Checks the required fields in form order: name, phone, address.
    pub fn validate(&self) -> Result<(), StoreError> {
        let required = [
            (CheckoutField::CustomerName, &self.name),
            (CheckoutField::Phone, &self.phone),
            (CheckoutField::DeliveryAddress, &self.address),
        ];
        match required.iter().find(|(_, value)| value.trim().is_empty()) {
            Some((field, _)) => Err(StoreError::MissingField(*field)),
            None => Ok(()),
        }
    }
}

/// A placed order with a frozen copy of the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub id: OrderId,
    pub order_number: String,
    pub items: Vec<CartLine>,
    pub total: u64,
    pub customer_name: String,
    pub phone: String,
    pub delivery_address: String,
    pub notes: Option<String>,
    pub payment_method: PaymentMethod,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    /// Local wall-clock time, `HH:MM`.
    pub estimated_delivery: String,
}

impl Order {
    /// Builds a `Pending` order from validated checkout input.
    pub fn place(
        id: OrderId,
        items: Vec<CartLine>,
        customer: CustomerInfo,
        payment_method: PaymentMethod,
        created_at: DateTime<Utc>,
        delivery_eta: TimeDelta,
    ) -> Self {
        let total = sum_subtotals(&items);
        let notes = customer.notes.filter(|notes| !notes.trim().is_empty());
        Self {
            id,
            order_number: Self::order_number_for(created_at),
            items,
            total,
            customer_name: customer.name,
            phone: customer.phone,
            delivery_address: customer.address,
            notes,
            payment_method,
            status: OrderStatus::Pending,
            created_at,
            estimated_delivery: (created_at + delivery_eta)
                .with_timezone(&Local)
                .format("%H:%M")
                .to_string(),
        }
    }

    /// `ORD` followed by the last eight digits of the epoch milliseconds.
    pub fn order_number_for(created_at: DateTime<Utc>) -> String {
        let millis = created_at.timestamp_millis().rem_euclid(100_000_000);
        format!("ORD{millis:08}")
    }

    /// Copy of this order one status step further along.
    pub fn advanced(&self) -> Self {
        Self {
            status: self.status.next(),
            ..self.clone()
        }
    }

    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|line| line.quantity).sum()
    }
}
