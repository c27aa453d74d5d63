//! Topup workflow: deposit claim intake and admin resolution.
//!
//! A claim is recorded as a `Pending` entry without touching the balance —
//! the money is not real until an admin verifies the receipt. Approval
//! credits the wallet and finalizes the entry inside one per-user atomic
//! unit; rejection only finalizes the entry.

use rust_decimal::Decimal;
use walletcore_types::{
    EntryKind, EntryStatus, LedgerEntry, LedgerError, Result, TransactionId, UserId, Wallet,
};

use crate::notify::WalletEvent;
use crate::service::WalletService;

/// Admin verdict on a pending topup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopupDecision {
    Approve,
    Reject,
}

impl WalletService {
    /// Record a user-submitted deposit claim.
    ///
    /// The wallet balance is untouched: the entry sits `Pending` until an
    /// admin resolves it. Notification is best-effort; the claim is already
    /// durably recorded when it fires.
    ///
    /// # Errors
    /// - [`LedgerError::InvalidAmount`] if the amount is outside the
    ///   configured bounds
    /// - [`LedgerError::MissingField`] if `method` or `receipt_ref` is empty
    ///   or oversized
    pub fn request_topup(
        &self,
        user_id: UserId,
        amount: Decimal,
        method: &str,
        receipt_ref: &str,
    ) -> Result<TransactionId> {
        if amount <= Decimal::ZERO || !self.config().topup_in_bounds(amount) {
            return Err(LedgerError::InvalidAmount {
                reason: format!(
                    "topup must be between {} and {}",
                    self.config().min_topup,
                    self.config().max_topup
                ),
            });
        }
        validate_field(method, "method", self.config().max_note_len)?;
        validate_field(receipt_ref, "receipt_ref", self.config().max_note_len)?;

        // Touch the wallet row so the user exists in reconciliation sweeps.
        self.wallets().get_or_create(user_id)?;

        let entry = self
            .ledger()
            .append(LedgerEntry::pending_topup(user_id, amount, method, receipt_ref))?;

        tracing::info!(txn = %entry.id, user = %user_id, %amount, method, "topup requested");
        self.notify_best_effort(&WalletEvent::TopupRequested {
            transaction_id: entry.id,
            user_id,
            amount,
            method: method.to_string(),
        });

        Ok(entry.id)
    }

    /// Resolve a pending topup.
    ///
    /// Approve: credit the wallet, then finalize the entry `Completed` with
    /// the post-credit balance snapshot. Both happen under the user's guard;
    /// a failure between them is surfaced as [`LedgerError::PersistenceFailure`]
    /// and alarmed, because the ledger and wallet have diverged.
    ///
    /// Reject: finalize `Cancelled`; the wallet was never credited.
    ///
    /// # Errors
    /// - [`LedgerError::TransactionNotFound`] if the id is unknown or not a topup
    /// - [`LedgerError::AlreadyResolved`] if the entry is no longer pending
    ///   (admin double-click protection)
    pub fn resolve_topup(
        &self,
        id: TransactionId,
        decision: TopupDecision,
        note: Option<String>,
    ) -> Result<Wallet> {
        let entry = self.ledger().find(id)?;
        if entry.kind != EntryKind::Topup {
            return Err(LedgerError::TransactionNotFound(id));
        }

        let guard = self.user_guard(entry.user_id)?;
        let _held = guard
            .lock()
            .map_err(|_| LedgerError::persistence("user guard poisoned"))?;

        // Re-read under the guard: a concurrent resolution may have won.
        let entry = self.ledger().find(id)?;
        if entry.status != EntryStatus::Pending {
            return Err(LedgerError::AlreadyResolved(id));
        }

        match decision {
            TopupDecision::Approve => {
                let wallet =
                    self.wallets()
                        .apply_delta(entry.user_id, entry.amount, EntryKind::Topup)?;

                if let Err(err) = self.ledger().mark_finalized(
                    id,
                    EntryStatus::Completed,
                    Some(wallet.balance),
                    note.clone(),
                ) {
                    // The credit landed but the entry did not: the stores
                    // have diverged. Alarm and surface as fatal.
                    tracing::error!(txn = %id, user = %entry.user_id, %err,
                        "topup finalize failed after credit; ledger and wallet diverged");
                    return Err(LedgerError::persistence(format!(
                        "topup {id} finalize failed after credit: {err}"
                    )));
                }

                tracing::info!(txn = %id, user = %entry.user_id, amount = %entry.amount,
                    balance = %wallet.balance, "topup approved");
                self.notify_best_effort(&WalletEvent::TopupApproved {
                    transaction_id: id,
                    user_id: entry.user_id,
                    amount: entry.amount,
                    new_balance: wallet.balance,
                    note,
                });
                Ok(wallet)
            }
            TopupDecision::Reject => {
                self.ledger()
                    .mark_finalized(id, EntryStatus::Cancelled, None, note.clone())?;

                tracing::info!(txn = %id, user = %entry.user_id, amount = %entry.amount,
                    "topup rejected");
                self.notify_best_effort(&WalletEvent::TopupRejected {
                    transaction_id: id,
                    user_id: entry.user_id,
                    amount: entry.amount,
                    note,
                });
                self.wallets().get_or_create(entry.user_id)
            }
        }
    }
}

fn validate_field(value: &str, field: &'static str, max_len: usize) -> Result<()> {
    if value.trim().is_empty() || value.len() > max_len {
        return Err(LedgerError::MissingField { field });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::notify::doubles::RecordingGateway;
    use walletcore_store::OrderStore;
    use walletcore_types::LedgerConfig;

    fn service() -> (WalletService, Arc<RecordingGateway>) {
        let gateway = Arc::new(RecordingGateway::new());
        let service = WalletService::new(
            Arc::new(OrderStore::new()),
            gateway.clone(),
            LedgerConfig::default(),
        );
        (service, gateway)
    }

    #[test]
    fn request_does_not_pre_credit() {
        let (service, gateway) = service();
        let user = UserId::new();

        let txn = service
            .request_topup(user, Decimal::new(100, 0), "bank", "r1")
            .unwrap();

        let wallet = service.balance(user).unwrap();
        assert_eq!(wallet.balance, Decimal::ZERO);

        let entry = service.ledger().find(txn).unwrap();
        assert_eq!(entry.status, EntryStatus::Pending);
        assert!(entry.balance_after.is_none());

        assert_eq!(gateway.events().len(), 1);
        assert_eq!(gateway.events()[0].to_string(), "TOPUP_REQUESTED");
    }

    #[test]
    fn request_rejects_bad_amounts() {
        let (service, _) = service();
        let user = UserId::new();

        for amount in [Decimal::ZERO, Decimal::new(-100, 0)] {
            let err = service.request_topup(user, amount, "bank", "r1").unwrap_err();
            assert!(matches!(err, LedgerError::InvalidAmount { .. }));
        }
        assert!(service.ledger().is_empty().unwrap());
    }

    #[test]
    fn request_rejects_empty_fields() {
        let (service, _) = service();
        let user = UserId::new();

        let err = service
            .request_topup(user, Decimal::new(100, 0), "  ", "r1")
            .unwrap_err();
        assert!(matches!(err, LedgerError::MissingField { field: "method" }));

        let err = service
            .request_topup(user, Decimal::new(100, 0), "bank", "")
            .unwrap_err();
        assert!(matches!(
            err,
            LedgerError::MissingField {
                field: "receipt_ref"
            }
        ));
    }

    #[test]
    fn approve_credits_and_finalizes() {
        let (service, gateway) = service();
        let user = UserId::new();
        let txn = service
            .request_topup(user, Decimal::new(100, 0), "bank", "r1")
            .unwrap();

        let wallet = service
            .resolve_topup(txn, TopupDecision::Approve, Some("verified".into()))
            .unwrap();
        assert_eq!(wallet.balance, Decimal::new(100, 0));
        assert_eq!(wallet.total_topups, Decimal::new(100, 0));

        let entry = service.ledger().find(txn).unwrap();
        assert_eq!(entry.status, EntryStatus::Completed);
        assert_eq!(entry.balance_after, Some(Decimal::new(100, 0)));
        assert_eq!(entry.note.as_deref(), Some("verified"));

        let names: Vec<String> = gateway.events().iter().map(ToString::to_string).collect();
        assert_eq!(names, vec!["TOPUP_REQUESTED", "TOPUP_APPROVED"]);
    }

    #[test]
    fn reject_leaves_wallet_untouched() {
        let (service, gateway) = service();
        let user = UserId::new();
        let txn = service
            .request_topup(user, Decimal::new(100, 0), "bank", "r1")
            .unwrap();

        let wallet = service
            .resolve_topup(txn, TopupDecision::Reject, Some("blurry receipt".into()))
            .unwrap();
        assert_eq!(wallet.balance, Decimal::ZERO);

        let entry = service.ledger().find(txn).unwrap();
        assert_eq!(entry.status, EntryStatus::Cancelled);
        assert!(entry.balance_after.is_none());

        assert_eq!(gateway.events().last().unwrap().to_string(), "TOPUP_REJECTED");
    }

    #[test]
    fn second_resolution_is_already_resolved() {
        let (service, _) = service();
        let user = UserId::new();
        let txn = service
            .request_topup(user, Decimal::new(100, 0), "bank", "r1")
            .unwrap();

        service.resolve_topup(txn, TopupDecision::Approve, None).unwrap();
        let err = service
            .resolve_topup(txn, TopupDecision::Reject, None)
            .unwrap_err();
        assert!(matches!(err, LedgerError::AlreadyResolved(id) if id == txn));

        // Credited exactly once.
        assert_eq!(service.balance(user).unwrap().balance, Decimal::new(100, 0));
    }

    #[test]
    fn resolving_unknown_or_non_topup_is_not_found() {
        let (service, _) = service();
        let err = service
            .resolve_topup(TransactionId::new(), TopupDecision::Approve, None)
            .unwrap_err();
        assert!(matches!(err, LedgerError::TransactionNotFound(_)));
    }
}
