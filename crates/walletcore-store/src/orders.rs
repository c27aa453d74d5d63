//! In-process stand-in for the order component.
//!
//! The order component is an external collaborator; the ledger only needs
//! a handful of operations at that boundary: look an order up,
//! mark it paid inside the payment atomic unit, mark it rejected during
//! refund orchestration.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use walletcore_types::{LedgerError, Order, OrderId, OrderStatus, Result};

/// Order state the ledger workflows read and transition.
#[derive(Default)]
pub struct OrderStore {
    inner: Mutex<HashMap<OrderId, Order>>,
}

impl OrderStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<OrderId, Order>>> {
        self.inner
            .lock()
            .map_err(|_| LedgerError::persistence("order store lock poisoned"))
    }

    /// Register an order (checkout does this before payment is attempted).
    pub fn insert(&self, order: Order) -> Result<()> {
        self.lock()?.insert(order.id, order);
        Ok(())
    }

    pub fn get(&self, id: OrderId) -> Result<Order> {
        self.lock()?
            .get(&id)
            .cloned()
            .ok_or(LedgerError::OrderNotFound(id))
    }

    /// Transition `PendingPayment` → `Paid`.
    ///
    /// # Errors
    /// [`LedgerError::OrderNotPayable`] if the order is in any other state.
    pub fn mark_paid(&self, id: OrderId) -> Result<Order> {
        let mut orders = self.lock()?;
        let order = orders.get_mut(&id).ok_or(LedgerError::OrderNotFound(id))?;
        if !order.is_payable() {
            return Err(LedgerError::OrderNotPayable {
                id,
                status: order.status,
            });
        }
        order.status = OrderStatus::Paid;
        Ok(order.clone())
    }

    /// Transition an order to `Rejected`. Idempotent: rejecting a rejected
    /// order is a no-op.
    pub fn mark_rejected(&self, id: OrderId) -> Result<Order> {
        let mut orders = self.lock()?;
        let order = orders.get_mut(&id).ok_or(LedgerError::OrderNotFound(id))?;
        order.status = OrderStatus::Rejected;
        Ok(order.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use walletcore_types::UserId;

    #[test]
    fn insert_and_get() {
        let store = OrderStore::new();
        let order = Order::dummy_pending(UserId::new(), Decimal::new(150, 0));
        store.insert(order.clone()).unwrap();
        let found = store.get(order.id).unwrap();
        assert_eq!(found.price, order.price);
        assert!(found.is_payable());
    }

    #[test]
    fn get_unknown_fails() {
        let store = OrderStore::new();
        let err = store.get(OrderId::new()).unwrap_err();
        assert!(matches!(err, LedgerError::OrderNotFound(_)));
    }

    #[test]
    fn mark_paid_once() {
        let store = OrderStore::new();
        let order = Order::dummy_pending(UserId::new(), Decimal::new(150, 0));
        store.insert(order.clone()).unwrap();

        let paid = store.mark_paid(order.id).unwrap();
        assert_eq!(paid.status, OrderStatus::Paid);

        let err = store.mark_paid(order.id).unwrap_err();
        assert!(matches!(
            err,
            LedgerError::OrderNotPayable {
                status: OrderStatus::Paid,
                ..
            }
        ));
    }

    #[test]
    fn mark_rejected_is_idempotent() {
        let store = OrderStore::new();
        let order = Order::dummy_pending(UserId::new(), Decimal::new(150, 0));
        store.insert(order.clone()).unwrap();

        store.mark_rejected(order.id).unwrap();
        let again = store.mark_rejected(order.id).unwrap();
        assert_eq!(again.status, OrderStatus::Rejected);
    }
}
