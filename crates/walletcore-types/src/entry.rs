//! Ledger entry types — the immutable transaction records.
//!
//! A [`LedgerEntry`] is created once and, apart from topup finalization,
//! never mutated. The signed `amount` convention makes the reconciliation
//! invariant a plain sum: positive for topup/refund/credit-adjustment,
//! negative for payment/debit-adjustment.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::{constants, OrderId, TransactionId, UserId};

/// What kind of balance-affecting event an entry records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum EntryKind {
    /// A user-claimed deposit awaiting (or past) admin verification.
    Topup,
    /// A wallet debit settling an order.
    Payment,
    /// A credit returning a wallet-settled payment for a rejected order.
    Refund,
    /// An operator correction, signed either way.
    Adjustment,
}

impl std::fmt::Display for EntryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Topup => write!(f, "TOPUP"),
            Self::Payment => write!(f, "PAYMENT"),
            Self::Refund => write!(f, "REFUND"),
            Self::Adjustment => write!(f, "ADJUSTMENT"),
        }
    }
}

/// Lifecycle status of a ledger entry.
///
/// Only `Topup` entries ever sit in `Pending`; payment, refund, and
/// adjustment entries are born `Completed` or never created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum EntryStatus {
    Pending,
    Completed,
    Cancelled,
    /// Reserved for entries quarantined by operator tooling.
    Failed,
}

impl EntryStatus {
    /// Terminal statuses admit no further transition.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending)
    }
}

impl std::fmt::Display for EntryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "PENDING"),
            Self::Completed => write!(f, "COMPLETED"),
            Self::Cancelled => write!(f, "CANCELLED"),
            Self::Failed => write!(f, "FAILED"),
        }
    }
}

/// An immutable record of one balance-affecting event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerEntry {
    /// Globally unique, generated at creation, immutable. Customer-support
    /// reference and idempotency key.
    pub id: TransactionId,
    pub user_id: UserId,
    pub kind: EntryKind,
    /// Signed value: positive credits the wallet, negative debits it.
    pub amount: Decimal,
    /// Audit snapshot of the balance after this entry applied. `None` until
    /// the entry reaches `Completed` — a pre-approval value is meaningless.
    pub balance_after: Option<Decimal>,
    pub status: EntryStatus,
    /// Present for payment and refund entries; backs the at-most-one-refund
    /// guard.
    pub related_order_id: Option<OrderId>,
    /// Deposit method as claimed by the user (e.g. "bank", "ewallet").
    pub method: Option<String>,
    /// Reference to the uploaded receipt, opaque to the ledger.
    pub receipt_ref: Option<String>,
    /// Free-form operator or workflow note.
    pub note: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl LedgerEntry {
    /// A pending topup claim. Does not carry `balance_after`: the credit has
    /// not been applied yet.
    #[must_use]
    pub fn pending_topup(
        user_id: UserId,
        amount: Decimal,
        method: impl Into<String>,
        receipt_ref: impl Into<String>,
    ) -> Self {
        Self {
            id: TransactionId::new(),
            user_id,
            kind: EntryKind::Topup,
            amount,
            balance_after: None,
            status: EntryStatus::Pending,
            related_order_id: None,
            method: Some(method.into()),
            receipt_ref: Some(receipt_ref.into()),
            note: None,
            created_at: Utc::now(),
        }
    }

    /// An entry born `Completed` — its preconditions were checked
    /// synchronously before creation.
    #[must_use]
    pub fn completed(
        user_id: UserId,
        kind: EntryKind,
        amount: Decimal,
        balance_after: Decimal,
        related_order_id: Option<OrderId>,
    ) -> Self {
        Self {
            id: TransactionId::new(),
            user_id,
            kind,
            amount,
            balance_after: Some(balance_after),
            status: EntryStatus::Completed,
            related_order_id,
            method: None,
            receipt_ref: None,
            note: None,
            created_at: Utc::now(),
        }
    }

    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    /// Whether this entry credits the wallet.
    #[must_use]
    pub fn is_credit(&self) -> bool {
        self.amount > Decimal::ZERO
    }
}

/// Filter for statement/history queries.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct EntryFilter {
    pub kind: Option<EntryKind>,
    pub status: Option<EntryStatus>,
}

impl EntryFilter {
    #[must_use]
    pub fn matches(&self, entry: &LedgerEntry) -> bool {
        self.kind.is_none_or(|k| k == entry.kind)
            && self.status.is_none_or(|s| s == entry.status)
    }
}

/// Offset/limit pagination for statement queries.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Page {
    pub offset: usize,
    pub limit: usize,
}

impl Page {
    #[must_use]
    pub fn new(offset: usize, limit: usize) -> Self {
        Self { offset, limit }
    }

    /// Limit clamped to the subsystem-wide maximum.
    #[must_use]
    pub fn clamped_limit(&self) -> usize {
        self.limit.min(constants::MAX_PAGE_SIZE)
    }
}

impl Default for Page {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: constants::DEFAULT_PAGE_SIZE,
        }
    }
}
