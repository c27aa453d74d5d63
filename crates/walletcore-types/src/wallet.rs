//! Wallet summary record — one mutable row per user.
//!
//! Derived from, and reconciled against, the ledger: `balance` must always
//! equal the sum of the user's completed entry amounts.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::UserId;

/// Per-user balance summary.
///
/// Created lazily on first ledger interaction, mutated only through
/// `WalletStore::apply_delta`, never deleted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Wallet {
    pub user_id: UserId,
    /// Current spendable value. Invariant: always ≥ 0.
    pub balance: Decimal,
    /// Lifetime sum of completed deposits. Monotonically non-decreasing.
    pub total_topups: Decimal,
    /// Lifetime sum of completed payments. Monotonically non-decreasing —
    /// refunds do not claw it back.
    pub total_spent: Decimal,
    /// Timestamp of the most recent balance-affecting event.
    pub last_transaction_at: Option<DateTime<Utc>>,
}

impl Wallet {
    /// A fresh zero-balance wallet.
    #[must_use]
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            balance: Decimal::ZERO,
            total_topups: Decimal::ZERO,
            total_spent: Decimal::ZERO,
            last_transaction_at: None,
        }
    }

    /// Whether the wallet has never moved money.
    #[must_use]
    pub fn is_untouched(&self) -> bool {
        self.last_transaction_at.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_wallet_is_zero() {
        let wallet = Wallet::new(UserId::new());
        assert_eq!(wallet.balance, Decimal::ZERO);
        assert_eq!(wallet.total_topups, Decimal::ZERO);
        assert_eq!(wallet.total_spent, Decimal::ZERO);
        assert!(wallet.is_untouched());
    }

    #[test]
    fn wallet_serde_roundtrip() {
        let mut wallet = Wallet::new(UserId::new());
        wallet.balance = Decimal::new(9950, 2); // 99.50
        wallet.total_topups = Decimal::new(10000, 2);
        wallet.total_spent = Decimal::new(50, 2);
        let json = serde_json::to_string(&wallet).unwrap();
        let back: Wallet = serde_json::from_str(&json).unwrap();
        assert_eq!(back, wallet);
    }
}
