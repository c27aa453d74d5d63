//! Wallet Record accessor.
//!
//! `apply_delta` is the only sanctioned way to change a balance. It runs the
//! sufficiency check and the write under the same store lock — a conditional
//! update, so two concurrent debits can never both pass a stale check and
//! overdraw the wallet.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use chrono::Utc;
use rust_decimal::Decimal;
use walletcore_types::{EntryKind, LedgerError, Result, UserId, Wallet};

/// Read/modify access to the per-user summary rows.
#[derive(Default)]
pub struct WalletStore {
    inner: Mutex<HashMap<UserId, Wallet>>,
}

impl WalletStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<UserId, Wallet>>> {
        self.inner
            .lock()
            .map_err(|_| LedgerError::persistence("wallet store lock poisoned"))
    }

    /// Return the user's wallet, creating a zero-balance one on first touch.
    pub fn get_or_create(&self, user_id: UserId) -> Result<Wallet> {
        Ok(self
            .lock()?
            .entry(user_id)
            .or_insert_with(|| Wallet::new(user_id))
            .clone())
    }

    /// Atomically adjust the balance by `delta`.
    ///
    /// Bumps the lifetime totals according to `kind` (topups and payments
    /// only — refunds and adjustments leave the monotonic totals alone) and
    /// stamps `last_transaction_at`.
    ///
    /// # Errors
    /// Returns [`LedgerError::InsufficientBalance`] if the resulting balance
    /// would be negative; the wallet is unchanged.
    pub fn apply_delta(&self, user_id: UserId, delta: Decimal, kind: EntryKind) -> Result<Wallet> {
        let mut wallets = self.lock()?;
        let wallet = wallets
            .entry(user_id)
            .or_insert_with(|| Wallet::new(user_id));

        let new_balance = wallet.balance + delta;
        if new_balance < Decimal::ZERO {
            return Err(LedgerError::InsufficientBalance {
                needed: delta.abs(),
                available: wallet.balance,
            });
        }

        wallet.balance = new_balance;
        match kind {
            EntryKind::Topup => wallet.total_topups += delta,
            EntryKind::Payment => wallet.total_spent += delta.abs(),
            EntryKind::Refund | EntryKind::Adjustment => {}
        }
        wallet.last_transaction_at = Some(Utc::now());

        tracing::debug!(user = %user_id, %delta, kind = %kind, balance = %wallet.balance, "wallet delta");
        Ok(wallet.clone())
    }

    /// Snapshot of every wallet, for reconciliation sweeps.
    pub fn wallets(&self) -> Result<Vec<Wallet>> {
        Ok(self.lock()?.values().cloned().collect())
    }
}
