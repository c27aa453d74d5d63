//! The Ledger Store — durable home of immutable transaction records.
//!
//! Entries are append-mostly: the only mutation ever applied is topup
//! finalization, and `mark_finalized` refuses anything that is not a
//! pending → terminal transition. That refusal, executed under the store
//! lock, is what makes concurrent double-approval impossible.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use rust_decimal::Decimal;
use walletcore_types::{
    EntryFilter, EntryKind, EntryStatus, LedgerEntry, LedgerError, OrderId, Page, Result,
    TransactionId, UserId,
};

#[derive(Default)]
struct LedgerInner {
    by_id: HashMap<TransactionId, LedgerEntry>,
    /// Per-user entry ids in insertion (= creation) order.
    by_user: HashMap<UserId, Vec<TransactionId>>,
    /// Completed payment entry per order.
    payment_by_order: HashMap<OrderId, TransactionId>,
    /// Completed refund entry per order — backs the at-most-once guard.
    refund_by_order: HashMap<OrderId, TransactionId>,
}

/// Durable, queryable storage of [`LedgerEntry`] rows.
#[derive(Default)]
pub struct LedgerStore {
    inner: Mutex<LedgerInner>,
}

impl LedgerStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, LedgerInner>> {
        self.inner
            .lock()
            .map_err(|_| LedgerError::persistence("ledger store lock poisoned"))
    }

    /// Insert a new entry.
    ///
    /// # Errors
    /// - [`LedgerError::DuplicateTransaction`] if the id already exists
    ///   (defensive — ids are freshly generated UUIDv7s)
    /// - [`LedgerError::DuplicateRefund`] if a completed refund for the same
    ///   order already exists (backstop for the workflow-level check)
    pub fn append(&self, entry: LedgerEntry) -> Result<LedgerEntry> {
        let mut inner = self.lock()?;

        if inner.by_id.contains_key(&entry.id) {
            return Err(LedgerError::DuplicateTransaction(entry.id));
        }
        if entry.kind == EntryKind::Refund {
            if let Some(order_id) = entry.related_order_id {
                if inner.refund_by_order.contains_key(&order_id) {
                    return Err(LedgerError::DuplicateRefund(order_id));
                }
            }
        }

        if let Some(order_id) = entry.related_order_id {
            match entry.kind {
                EntryKind::Payment => {
                    inner.payment_by_order.insert(order_id, entry.id);
                }
                EntryKind::Refund => {
                    inner.refund_by_order.insert(order_id, entry.id);
                }
                EntryKind::Topup | EntryKind::Adjustment => {}
            }
        }
        inner.by_user.entry(entry.user_id).or_default().push(entry.id);
        inner.by_id.insert(entry.id, entry.clone());

        tracing::debug!(id = %entry.id, kind = %entry.kind, status = %entry.status, "ledger append");
        Ok(entry)
    }

    /// Look up a single entry.
    pub fn find(&self, id: TransactionId) -> Result<LedgerEntry> {
        self.lock()?
            .by_id
            .get(&id)
            .cloned()
            .ok_or(LedgerError::TransactionNotFound(id))
    }

    /// Statement query: a user's entries, newest first, filtered and paged.
    pub fn list_by_user(
        &self,
        user_id: UserId,
        filter: &EntryFilter,
        page: &Page,
    ) -> Result<Vec<LedgerEntry>> {
        let inner = self.lock()?;
        let Some(ids) = inner.by_user.get(&user_id) else {
            return Ok(Vec::new());
        };
        Ok(ids
            .iter()
            .rev()
            .filter_map(|id| inner.by_id.get(id))
            .filter(|entry| filter.matches(entry))
            .skip(page.offset)
            .take(page.clamped_limit())
            .cloned()
            .collect())
    }

    /// Finalize a pending entry into a terminal status.
    ///
    /// # Errors
    /// - [`LedgerError::TransactionNotFound`] if the id is unknown
    /// - [`LedgerError::InvalidTransition`] if the entry is not pending, or
    ///   the target status is not terminal
    pub fn mark_finalized(
        &self,
        id: TransactionId,
        status: EntryStatus,
        balance_after: Option<Decimal>,
        note: Option<String>,
    ) -> Result<LedgerEntry> {
        let mut inner = self.lock()?;
        let entry = inner
            .by_id
            .get_mut(&id)
            .ok_or(LedgerError::TransactionNotFound(id))?;

        if entry.status != EntryStatus::Pending || !status.is_terminal() {
            return Err(LedgerError::InvalidTransition {
                id,
                from: entry.status,
            });
        }

        entry.status = status;
        entry.balance_after = balance_after;
        if note.is_some() {
            entry.note = note;
        }

        tracing::debug!(id = %id, status = %status, "ledger finalize");
        Ok(entry.clone())
    }

    /// Sum of `amount` over a user's completed entries — the value the
    /// wallet balance must reconcile with.
    pub fn completed_total(&self, user_id: UserId) -> Result<Decimal> {
        let inner = self.lock()?;
        let Some(ids) = inner.by_user.get(&user_id) else {
            return Ok(Decimal::ZERO);
        };
        Ok(ids
            .iter()
            .filter_map(|id| inner.by_id.get(id))
            .filter(|entry| entry.status == EntryStatus::Completed)
            .map(|entry| entry.amount)
            .sum())
    }

    /// The completed payment entry that settled an order, if any.
    pub fn payment_for_order(&self, order_id: OrderId) -> Result<Option<LedgerEntry>> {
        let inner = self.lock()?;
        Ok(inner
            .payment_by_order
            .get(&order_id)
            .and_then(|id| inner.by_id.get(id))
            .cloned())
    }

    /// The completed refund entry issued for an order, if any.
    pub fn refund_for_order(&self, order_id: OrderId) -> Result<Option<LedgerEntry>> {
        let inner = self.lock()?;
        Ok(inner
            .refund_by_order
            .get(&order_id)
            .and_then(|id| inner.by_id.get(id))
            .cloned())
    }

    /// Number of entries stored.
    pub fn len(&self) -> Result<usize> {
        Ok(self.lock()?.by_id.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.lock()?.by_id.is_empty())
    }
}
