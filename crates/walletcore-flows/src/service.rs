//! The wallet service — owner of the stores and the per-user guards.
//!
//! Each workflow method lives in its own module (`topup`, `payment`,
//! `refund`, `adjustment`, `reconcile`); this module holds the shared
//! plumbing: construction, the per-user serialization discipline, the
//! best-effort notification helper, and the client-facing read API.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use walletcore_store::{LedgerStore, OrderStore, WalletStore};
use walletcore_types::{
    EntryFilter, LedgerConfig, LedgerEntry, LedgerError, Page, Result, UserId, Wallet,
};

use crate::notify::{NotificationGateway, WalletEvent};

/// Coordinates the ledger, wallet, and order stores under a per-user
/// concurrency discipline.
///
/// The wallet of a given user is the only contended resource: every
/// workflow holds that user's guard across its read-check-write sequence,
/// so operations on different users proceed fully in parallel while two
/// operations on one wallet serialize.
pub struct WalletService {
    wallets: WalletStore,
    ledger: LedgerStore,
    orders: Arc<OrderStore>,
    gateway: Arc<dyn NotificationGateway>,
    config: LedgerConfig,
    /// Lazily-populated per-user guards.
    user_locks: Mutex<HashMap<UserId, Arc<Mutex<()>>>>,
}

impl WalletService {
    #[must_use]
    pub fn new(
        orders: Arc<OrderStore>,
        gateway: Arc<dyn NotificationGateway>,
        config: LedgerConfig,
    ) -> Self {
        Self {
            wallets: WalletStore::new(),
            ledger: LedgerStore::new(),
            orders,
            gateway,
            config,
            user_locks: Mutex::new(HashMap::new()),
        }
    }

    pub(crate) fn wallets(&self) -> &WalletStore {
        &self.wallets
    }

    pub(crate) fn orders(&self) -> &OrderStore {
        &self.orders
    }

    pub(crate) fn config(&self) -> &LedgerConfig {
        &self.config
    }

    /// The ledger store, exposed read-only for statements and audits.
    pub fn ledger(&self) -> &LedgerStore {
        &self.ledger
    }

    /// Fetch the guard for one user's wallet. Workflows hold it across
    /// their whole read-check-write sequence.
    pub(crate) fn user_guard(&self, user_id: UserId) -> Result<Arc<Mutex<()>>> {
        let mut locks = self
            .user_locks
            .lock()
            .map_err(|_| LedgerError::persistence("user guard table poisoned"))?;
        Ok(Arc::clone(locks.entry(user_id).or_default()))
    }

    /// Fire a notification and swallow any failure after logging it.
    /// Financial correctness never depends on delivery.
    pub(crate) fn notify_best_effort(&self, event: &WalletEvent) {
        if let Err(err) = self.gateway.deliver(event) {
            tracing::warn!(%event, %err, "notification delivery failed; continuing");
        }
    }

    // -----------------------------------------------------------------
    // Client-facing read API
    // -----------------------------------------------------------------

    /// Current wallet summary for a user (zero-balance if never touched).
    pub fn balance(&self, user_id: UserId) -> Result<Wallet> {
        self.wallets.get_or_create(user_id)
    }

    /// Paginated transaction history, newest first. `None` takes the first
    /// page at the configured default size.
    pub fn history(
        &self,
        user_id: UserId,
        filter: &EntryFilter,
        page: Option<Page>,
    ) -> Result<Vec<LedgerEntry>> {
        let page = page.unwrap_or(Page::new(0, self.config.page_size));
        self.ledger.list_by_user(user_id, filter, &page)
    }
}
