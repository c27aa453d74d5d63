//! # walletcore-store
//!
//! **Storage plane**: durable, queryable state for the wallet ledger.
//! No business logic lives here — the flows crate composes these stores
//! into workflows.
//!
//! ## Architecture
//!
//! 1. **LedgerStore**: append-mostly collection of immutable
//!    [`LedgerEntry`](walletcore_types::LedgerEntry) rows, indexed by id,
//!    owner, and related order
//! 2. **WalletStore**: one summary row per user; `apply_delta` is the only
//!    sanctioned balance mutation and performs its sufficiency check under
//!    the store lock (conditional update)
//! 3. **OrderStore**: in-process stand-in for the order component, holding
//!    exactly the fields the ledger workflows need
//!
//! Every store is `Send + Sync` with interior locking, so workflows on
//! different users proceed in parallel while each individual mutation stays
//! atomic.

pub mod ledger;
pub mod orders;
pub mod wallet_store;

pub use ledger::LedgerStore;
pub use orders::OrderStore;
pub use wallet_store::WalletStore;
