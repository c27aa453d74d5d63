//! Payment workflow: debit a wallet to settle an order.
//!
//! All preconditions are checked before any write; the debit, the completed
//! payment entry, and the order's paid transition then commit under the
//! user's guard as one unit. A failure after the debit would leave money
//! gone without a settled order, so it is alarmed and surfaced as fatal.

use rust_decimal::Decimal;
use walletcore_types::{
    EntryKind, LedgerEntry, LedgerError, OrderId, Result, TransactionId, UserId,
};

use crate::service::WalletService;

impl WalletService {
    /// Settle an order from the user's wallet.
    ///
    /// # Errors
    /// - [`LedgerError::OrderNotFound`] if the order does not exist or does
    ///   not belong to `user_id` (reported identically on purpose)
    /// - [`LedgerError::OrderNotPayable`] if the order was already settled
    /// - [`LedgerError::InvalidAmount`] if `amount` is non-positive or does
    ///   not match the order's due amount
    /// - [`LedgerError::InsufficientBalance`] if the wallet cannot cover it
    pub fn pay_order_from_wallet(
        &self,
        user_id: UserId,
        order_id: OrderId,
        amount: Decimal,
    ) -> Result<TransactionId> {
        if amount <= Decimal::ZERO {
            return Err(LedgerError::InvalidAmount {
                reason: "payment amount must be positive".into(),
            });
        }

        let guard = self.user_guard(user_id)?;
        let _held = guard
            .lock()
            .map_err(|_| LedgerError::persistence("user guard poisoned"))?;

        let order = self.orders().get(order_id)?;
        if order.user_id != user_id {
            // Do not reveal other users' orders.
            return Err(LedgerError::OrderNotFound(order_id));
        }
        if !order.is_payable() {
            return Err(LedgerError::OrderNotPayable {
                id: order_id,
                status: order.status,
            });
        }
        if amount != order.price {
            return Err(LedgerError::InvalidAmount {
                reason: format!("amount {amount} does not match order total {}", order.price),
            });
        }

        // Point of no return: the conditional debit is the first write.
        let wallet = self.wallets().apply_delta(user_id, -amount, EntryKind::Payment)?;

        let entry = LedgerEntry::completed(
            user_id,
            EntryKind::Payment,
            -amount,
            wallet.balance,
            Some(order_id),
        );
        let txn = entry.id;
        if let Err(err) = self.ledger().append(entry) {
            tracing::error!(order = %order_id, user = %user_id, %err,
                "payment entry append failed after debit; ledger and wallet diverged");
            return Err(LedgerError::persistence(format!(
                "payment for {order_id} failed after debit: {err}"
            )));
        }
        if let Err(err) = self.orders().mark_paid(order_id) {
            tracing::error!(order = %order_id, user = %user_id, %err,
                "order paid transition failed after debit; manual intervention required");
            return Err(LedgerError::persistence(format!(
                "order {order_id} could not be marked paid after debit: {err}"
            )));
        }

        tracing::info!(txn = %txn, order = %order_id, user = %user_id, %amount,
            balance = %wallet.balance, "order paid from wallet");
        Ok(txn)
    }
}
