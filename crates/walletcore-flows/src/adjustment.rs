//! Adjustment workflow: signed operator corrections.
//!
//! Adjustments exist for support cases the three main workflows cannot
//! express (goodwill credit, clawing back a mistaken manual credit). They
//! are created `Completed` with a mandatory note for the audit trail and
//! leave the lifetime topup/spend totals alone.

use rust_decimal::Decimal;
use walletcore_types::{EntryKind, LedgerEntry, LedgerError, Result, TransactionId, UserId};

use crate::service::WalletService;

impl WalletService {
    /// Apply an operator correction to a wallet.
    ///
    /// `amount` is signed: positive credits, negative debits. Debits respect
    /// the non-negative balance invariant like any other debit.
    ///
    /// # Errors
    /// - [`LedgerError::InvalidAmount`] if `amount` is zero
    /// - [`LedgerError::MissingField`] if `note` is empty or oversized
    /// - [`LedgerError::InsufficientBalance`] if a debit would overdraw
    pub fn adjust_balance(
        &self,
        user_id: UserId,
        amount: Decimal,
        note: &str,
    ) -> Result<TransactionId> {
        if amount.is_zero() {
            return Err(LedgerError::InvalidAmount {
                reason: "adjustment amount must be non-zero".into(),
            });
        }
        if note.trim().is_empty() || note.len() > self.config().max_note_len {
            return Err(LedgerError::MissingField { field: "note" });
        }

        let guard = self.user_guard(user_id)?;
        let _held = guard
            .lock()
            .map_err(|_| LedgerError::persistence("user guard poisoned"))?;

        let wallet = self.wallets().apply_delta(user_id, amount, EntryKind::Adjustment)?;

        let entry = LedgerEntry::completed(user_id, EntryKind::Adjustment, amount, wallet.balance, None)
            .with_note(note);
        let txn = entry.id;
        if let Err(err) = self.ledger().append(entry) {
            tracing::error!(user = %user_id, %err,
                "adjustment entry append failed after delta; ledger and wallet diverged");
            return Err(LedgerError::persistence(format!(
                "adjustment for {user_id} failed after delta: {err}"
            )));
        }

        tracing::info!(txn = %txn, user = %user_id, %amount, balance = %wallet.balance,
            "balance adjusted");
        Ok(txn)
    }
}
