//! Configuration for the walletcore ledger subsystem.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants;

/// Tunables for the ledger workflows.
///
/// The process entry point owns one of these and hands it to the service;
/// the defaults match the storefront's production settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LedgerConfig {
    /// Smallest accepted topup claim.
    pub min_topup: Decimal,
    /// Largest accepted topup claim.
    pub max_topup: Decimal,
    /// Maximum length of free-form notes and method/receipt fields.
    pub max_note_len: usize,
    /// Default page size for statement queries.
    pub page_size: usize,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            min_topup: constants::DEFAULT_MIN_TOPUP,
            max_topup: constants::DEFAULT_MAX_TOPUP,
            max_note_len: constants::MAX_NOTE_LEN,
            page_size: constants::DEFAULT_PAGE_SIZE,
        }
    }
}

impl LedgerConfig {
    /// Whether a topup claim amount is within the configured bounds.
    #[must_use]
    pub fn topup_in_bounds(&self, amount: Decimal) -> bool {
        amount >= self.min_topup && amount <= self.max_topup
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_pull_constants() {
        let config = LedgerConfig::default();
        assert_eq!(config.min_topup, constants::DEFAULT_MIN_TOPUP);
        assert_eq!(config.max_topup, constants::DEFAULT_MAX_TOPUP);
        assert_eq!(config.page_size, constants::DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn topup_bounds() {
        let config = LedgerConfig::default();
        assert!(config.topup_in_bounds(Decimal::new(100, 0)));
        assert!(!config.topup_in_bounds(Decimal::ZERO));
        assert!(!config.topup_in_bounds(config.max_topup + Decimal::ONE));
    }

    #[test]
    fn config_serde_roundtrip() {
        let config = LedgerConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let back: LedgerConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.min_topup, config.min_topup);
        assert_eq!(back.max_note_len, config.max_note_len);
    }
}
