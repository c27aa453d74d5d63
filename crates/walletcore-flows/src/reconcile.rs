//! Reconciliation checker.
//!
//! Invariant enforced across the whole subsystem:
//! ```text
//! ∀ user: wallet.balance == Σ(amount) over entries with status == COMPLETED
//! ```
//!
//! If this ever breaks, an atomic unit committed partially — the ultimate
//! safety net behind every workflow.

use walletcore_types::{LedgerError, Result, UserId};

use crate::service::WalletService;

impl WalletService {
    /// Verify one user's wallet against the ledger's completed total.
    ///
    /// # Errors
    /// Returns [`LedgerError::LedgerMismatch`] if the balance diverged.
    pub fn verify_user(&self, user_id: UserId) -> Result<()> {
        let wallet = self.wallets().get_or_create(user_id)?;
        let ledger_total = self.ledger().completed_total(user_id)?;
        if wallet.balance != ledger_total {
            tracing::error!(user = %user_id, balance = %wallet.balance, %ledger_total,
                "ledger mismatch detected");
            return Err(LedgerError::LedgerMismatch {
                user_id,
                wallet_balance: wallet.balance,
                ledger_total,
            });
        }
        Ok(())
    }

    /// Sweep every known wallet. Stops at the first mismatch.
    pub fn verify_all(&self) -> Result<()> {
        for wallet in self.wallets().wallets()? {
            self.verify_user(wallet.user_id)?;
        }
        Ok(())
    }
}
