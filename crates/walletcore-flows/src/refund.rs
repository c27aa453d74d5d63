//! Refund workflow: return a wallet-settled payment when an order is
//! rejected after the fact.
//!
//! The single most important correctness rule in the subsystem: an order
//! must never end up `Rejected` with the money never returned. The
//! orchestration therefore refunds first and flips the order status only
//! after the credit committed, and holds the user's guard across the whole
//! read-refund-flip sequence so a concurrent wallet payment cannot land
//! between the refund check and the status flip. The refund itself is
//! at-most-once per order, enforced by a ledger lookup under the guard and
//! backstopped by the store's refund index.

use walletcore_types::{
    EntryKind, LedgerEntry, LedgerError, Order, OrderId, OrderStatus, PaymentMethod, Result,
    TransactionId,
};

use crate::service::WalletService;

impl WalletService {
    /// Credit back the wallet payment recorded for a rejected order.
    ///
    /// The refund amount is the absolute value of the recorded payment
    /// entry, not the order's list price — a discounted order refunds
    /// exactly what was debited.
    ///
    /// # Errors
    /// - [`LedgerError::NothingToRefund`] if the order was not settled via
    ///   wallet (wrong method, or no completed payment entry)
    /// - [`LedgerError::DuplicateRefund`] if a refund was already issued;
    ///   the wallet is untouched, and the occurrence is logged as a likely
    ///   caller bug
    pub fn refund_rejected_order(&self, order: &Order) -> Result<TransactionId> {
        let guard = self.user_guard(order.user_id)?;
        let _held = guard
            .lock()
            .map_err(|_| LedgerError::persistence("user guard poisoned"))?;
        self.refund_locked(order)
    }

    /// Refund body. The caller must already hold the user's guard; the
    /// guard is not re-entrant, so `reject_order` calls this directly.
    fn refund_locked(&self, order: &Order) -> Result<TransactionId> {
        if order.payment_method != PaymentMethod::Wallet {
            return Err(LedgerError::NothingToRefund(order.id));
        }
        let Some(payment) = self.ledger().payment_for_order(order.id)? else {
            return Err(LedgerError::NothingToRefund(order.id));
        };

        if self.ledger().refund_for_order(order.id)?.is_some() {
            tracing::warn!(order = %order.id, user = %order.user_id,
                "duplicate refund attempt blocked; caller likely retried a finished rejection");
            return Err(LedgerError::DuplicateRefund(order.id));
        }

        let refund_amount = payment.amount.abs();
        let wallet =
            self.wallets()
                .apply_delta(order.user_id, refund_amount, EntryKind::Refund)?;

        let entry = LedgerEntry::completed(
            order.user_id,
            EntryKind::Refund,
            refund_amount,
            wallet.balance,
            Some(order.id),
        );
        let txn = entry.id;
        if let Err(err) = self.ledger().append(entry) {
            tracing::error!(order = %order.id, user = %order.user_id, %err,
                "refund entry append failed after credit; ledger and wallet diverged");
            return Err(LedgerError::persistence(format!(
                "refund for {} failed after credit: {err}",
                order.id
            )));
        }

        tracing::info!(txn = %txn, order = %order.id, user = %order.user_id,
            amount = %refund_amount, balance = %wallet.balance, "order refunded to wallet");
        Ok(txn)
    }

    /// Reject an order, refunding first when it was settled via wallet.
    ///
    /// The status flip happens only after the refund committed (or was
    /// already issued by an earlier attempt), so a refund failure leaves
    /// the order untouched rather than rejected-but-unrefunded. Idempotent
    /// for orders that are already rejected.
    ///
    /// The whole sequence runs under the owner's guard; a payment racing
    /// the rejection either lands first and gets refunded here, or finds
    /// the order already rejected and fails its payable check.
    pub fn reject_order(&self, order_id: OrderId) -> Result<Order> {
        // This first read only learns the owner; the authoritative read
        // happens again under that user's guard.
        let owner = self.orders().get(order_id)?.user_id;
        let guard = self.user_guard(owner)?;
        let _held = guard
            .lock()
            .map_err(|_| LedgerError::persistence("user guard poisoned"))?;

        let order = self.orders().get(order_id)?;
        if order.status == OrderStatus::Rejected {
            return Ok(order);
        }

        let wallet_settled = order.payment_method == PaymentMethod::Wallet
            && self.ledger().payment_for_order(order_id)?.is_some();
        if wallet_settled {
            match self.refund_locked(&order) {
                Ok(_) => {}
                // A previous attempt refunded but crashed before the status
                // flip; finishing the rejection is the right move.
                Err(LedgerError::DuplicateRefund(_)) => {}
                Err(err) => return Err(err),
            }
        }

        self.orders().mark_rejected(order_id)
    }
}
