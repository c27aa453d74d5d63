//! Order collaborator interface.
//!
//! The order component owns its own lifecycle; the ledger only needs the
//! fields that gate payment and refund: owner, status, settlement method,
//! and the amount due.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{OrderId, UserId};

/// Order lifecycle, seen from the ledger's side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum OrderStatus {
    /// Awaiting settlement; the only payable state.
    PendingPayment,
    /// Settled — via wallet or a verified manual receipt.
    Paid,
    /// Rejected by an admin after review.
    Rejected,
    /// Cancelled by the user before settlement.
    Cancelled,
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PendingPayment => write!(f, "PENDING_PAYMENT"),
            Self::Paid => write!(f, "PAID"),
            Self::Rejected => write!(f, "REJECTED"),
            Self::Cancelled => write!(f, "CANCELLED"),
        }
    }
}

/// How the buyer elected to settle the order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentMethod {
    /// Stored-value wallet — the only method the ledger moves money for.
    Wallet,
    /// Manual receipt upload, verified out of band.
    ManualReceipt,
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Wallet => write!(f, "WALLET"),
            Self::ManualReceipt => write!(f, "MANUAL_RECEIPT"),
        }
    }
}

/// The slice of an order the ledger workflows consume.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub user_id: UserId,
    pub status: OrderStatus,
    pub payment_method: PaymentMethod,
    /// Amount due after any discounts.
    pub price: Decimal,
}

impl Order {
    /// Whether the order can still be settled.
    #[must_use]
    pub fn is_payable(&self) -> bool {
        self.status == OrderStatus::PendingPayment
    }
}

/// Test helpers.
#[cfg(any(test, feature = "test-helpers"))]
impl Order {
    #[must_use]
    pub fn dummy_pending(user_id: UserId, price: Decimal) -> Self {
        Self {
            id: OrderId::new(),
            user_id,
            status: OrderStatus::PendingPayment,
            payment_method: PaymentMethod::Wallet,
            price,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_pending_payment_is_payable() {
        let mut order = Order::dummy_pending(UserId::new(), Decimal::new(150, 0));
        assert!(order.is_payable());

        for status in [
            OrderStatus::Paid,
            OrderStatus::Rejected,
            OrderStatus::Cancelled,
        ] {
            order.status = status;
            assert!(!order.is_payable(), "{status} should not be payable");
        }
    }

    #[test]
    fn status_display() {
        assert_eq!(OrderStatus::PendingPayment.to_string(), "PENDING_PAYMENT");
        assert_eq!(PaymentMethod::Wallet.to_string(), "WALLET");
    }

    #[test]
    fn order_serde_roundtrip() {
        let order = Order::dummy_pending(UserId::new(), Decimal::new(9999, 2));
        let json = serde_json::to_string(&order).unwrap();
        let back: Order = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id, order.id);
        assert_eq!(back.price, order.price);
    }
}
