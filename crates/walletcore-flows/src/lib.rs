//! # walletcore-flows
//!
//! **Workflow plane**: the money-moving operations over the ledger and
//! wallet stores, plus the notification seam and the reconciliation checker.
//!
//! ## Workflows
//!
//! 1. **Topup**: user claims a deposit → pending entry; admin approve/reject
//!    finalizes it (approval credits the wallet)
//! 2. **Payment**: debit a wallet to settle an order, all-or-nothing
//! 3. **Refund**: credit a wallet back when a wallet-settled order is
//!    rejected, at most once per order
//! 4. **Adjustment**: signed operator correction
//!
//! ## Flow
//!
//! ```text
//! user/admin action → WalletService (per-user guard)
//!     → WalletStore.apply_delta (conditional update)
//!     → LedgerStore.append / mark_finalized
//!     → best-effort NotificationGateway.deliver (failure logged, swallowed)
//! ```
//!
//! Every workflow either commits its full atomic unit or fails with no
//! partial state; a failure after the balance moved is surfaced as
//! `PersistenceFailure` and alarmed, never swallowed.

pub mod adjustment;
pub mod notify;
pub mod payment;
pub mod reconcile;
pub mod refund;
pub mod service;
pub mod topup;

pub use notify::{NoopGateway, NotificationGateway, NotifyError, WalletEvent};
pub use service::WalletService;
pub use topup::TopupDecision;
