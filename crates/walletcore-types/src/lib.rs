//! # walletcore-types
//!
//! Shared types, errors, and configuration for the **walletcore** ledger
//! subsystem.
//!
//! This crate is the leaf dependency of the workspace — every other crate
//! depends on it. It defines:
//!
//! - **Identifiers**: [`TransactionId`], [`UserId`], [`OrderId`]
//! - **Ledger model**: [`LedgerEntry`], [`EntryKind`], [`EntryStatus`], [`EntryFilter`], [`Page`]
//! - **Wallet model**: [`Wallet`]
//! - **Order collaborator interface**: [`Order`], [`OrderStatus`], [`PaymentMethod`]
//! - **Errors**: [`LedgerError`] with `WL_ERR_` prefix codes
//! - **Configuration**: [`LedgerConfig`]
//! - **Constants**: subsystem-wide limits and defaults

pub mod config;
pub mod constants;
pub mod entry;
pub mod error;
pub mod ids;
pub mod order;
pub mod wallet;

// Re-export all primary types at crate root for ergonomic imports:
//   use walletcore_types::{Wallet, LedgerEntry, EntryKind, ...};

pub use config::*;
pub use entry::*;
pub use error::*;
pub use ids::*;
pub use order::*;
pub use wallet::*;

// Constants are accessed via `walletcore_types::constants::FOO`
// (not re-exported to avoid name collisions).
