//! Error types for the walletcore ledger subsystem.
//!
//! All errors use the `WL_ERR_` prefix convention for easy grepping in logs.
//! Error codes are grouped by subsystem:
//! - 1xx: Validation errors
//! - 2xx: Balance errors
//! - 3xx: Transaction lifecycle errors
//! - 4xx: Order errors
//! - 5xx: Persistence errors
//! - 9xx: Critical / invariant violations

use rust_decimal::Decimal;
use thiserror::Error;

use crate::{EntryStatus, OrderId, OrderStatus, TransactionId, UserId};

/// Central error enum for all ledger operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    // =================================================================
    // Validation Errors (1xx)
    // =================================================================
    /// The amount fails a precondition (non-positive, out of bounds,
    /// mismatched with the order total, ...). No state change.
    #[error("WL_ERR_100: Invalid amount: {reason}")]
    InvalidAmount { reason: String },

    /// A required free-form field was empty or oversized.
    #[error("WL_ERR_101: Missing or invalid field: {field}")]
    MissingField { field: &'static str },

    // =================================================================
    // Balance Errors (2xx)
    // =================================================================
    /// The debit would overdraw the wallet. No state change.
    #[error("WL_ERR_200: Insufficient balance: need {needed}, have {available}")]
    InsufficientBalance { needed: Decimal, available: Decimal },

    // =================================================================
    // Transaction Lifecycle Errors (3xx)
    // =================================================================
    /// No ledger entry with this id (or not one this operation acts on).
    #[error("WL_ERR_300: Transaction not found: {0}")]
    TransactionNotFound(TransactionId),

    /// An entry with this id already exists (defensive append guard).
    #[error("WL_ERR_301: Duplicate transaction: {0}")]
    DuplicateTransaction(TransactionId),

    /// Finalization attempted on an entry that is not pending.
    #[error("WL_ERR_302: Invalid transition for {id}: entry is {from}, not PENDING")]
    InvalidTransition { id: TransactionId, from: EntryStatus },

    /// Admin acted on a topup that was already approved or rejected.
    #[error("WL_ERR_303: Topup already resolved: {0}")]
    AlreadyResolved(TransactionId),

    // =================================================================
    // Order Errors (4xx)
    // =================================================================
    /// The referenced order does not exist — or does not belong to the
    /// calling user, which is reported identically.
    #[error("WL_ERR_400: Order not found: {0}")]
    OrderNotFound(OrderId),

    /// The order is not in a payable state.
    #[error("WL_ERR_401: Order {id} not payable: status is {status}")]
    OrderNotPayable { id: OrderId, status: OrderStatus },

    /// Refund requested for an order the wallet never settled.
    #[error("WL_ERR_402: Nothing to refund for {0}: no completed wallet payment")]
    NothingToRefund(OrderId),

    /// A refund for this order was already issued. No state change; if this
    /// fires outside a retry it is a likely bug in the caller.
    #[error("WL_ERR_403: Refund already issued for {0}")]
    DuplicateRefund(OrderId),

    // =================================================================
    // Persistence Errors (5xx)
    // =================================================================
    /// The atomic unit could not commit. Fatal: must propagate and be
    /// alarmed, never silently retried with partial effects.
    #[error("WL_ERR_500: Persistence failure: {reason}")]
    PersistenceFailure { reason: String },

    // =================================================================
    // Critical / Invariant Violations (9xx)
    // =================================================================
    /// Wallet balance diverged from the completed-entry sum — the ledger's
    /// conservation invariant is broken.
    #[error(
        "WL_ERR_900: Ledger mismatch for {user_id}: wallet balance {wallet_balance} \
         != completed ledger total {ledger_total}"
    )]
    LedgerMismatch {
        user_id: UserId,
        wallet_balance: Decimal,
        ledger_total: Decimal,
    },
}

impl LedgerError {
    /// Shorthand for lock-poisoning and similar commit-path failures.
    #[must_use]
    pub fn persistence(reason: impl Into<String>) -> Self {
        Self::PersistenceFailure {
            reason: reason.into(),
        }
    }
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, LedgerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_contains_prefix() {
        let err = LedgerError::TransactionNotFound(TransactionId::new());
        let msg = format!("{err}");
        assert!(msg.starts_with("WL_ERR_300"), "Got: {msg}");
    }

    #[test]
    fn insufficient_balance_display() {
        let err = LedgerError::InsufficientBalance {
            needed: Decimal::new(150, 0),
            available: Decimal::new(100, 0),
        };
        let msg = format!("{err}");
        assert!(msg.contains("WL_ERR_200"));
        assert!(msg.contains("150"));
        assert!(msg.contains("100"));
    }

    #[test]
    fn all_errors_have_wl_err_prefix() {
        let errors: Vec<Box<dyn std::error::Error>> = vec![
            Box::new(LedgerError::InvalidAmount {
                reason: "test".into(),
            }),
            Box::new(LedgerError::MissingField { field: "method" }),
            Box::new(LedgerError::AlreadyResolved(TransactionId::new())),
            Box::new(LedgerError::DuplicateRefund(OrderId::new())),
            Box::new(LedgerError::persistence("test")),
            Box::new(LedgerError::LedgerMismatch {
                user_id: UserId::new(),
                wallet_balance: Decimal::ONE,
                ledger_total: Decimal::ZERO,
            }),
        ];
        for err in errors {
            let msg = format!("{err}");
            assert!(
                msg.starts_with("WL_ERR_"),
                "Error missing WL_ERR_ prefix: {msg}"
            );
        }
    }

    #[test]
    fn invalid_transition_names_current_status() {
        let err = LedgerError::InvalidTransition {
            id: TransactionId::new(),
            from: EntryStatus::Completed,
        };
        assert!(format!("{err}").contains("COMPLETED"));
    }
}
