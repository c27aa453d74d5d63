//! Subsystem-wide constants for the walletcore ledger.

use rust_decimal::Decimal;

/// Smallest topup claim the storefront accepts (default).
pub const DEFAULT_MIN_TOPUP: Decimal = Decimal::ONE;

/// Largest topup claim the storefront accepts without manual review (default).
pub const DEFAULT_MAX_TOPUP: Decimal = Decimal::from_parts(10_000_000, 0, 0, false, 2);

/// Default statement page size.
pub const DEFAULT_PAGE_SIZE: usize = 50;

/// Maximum statement page size a client may request.
pub const MAX_PAGE_SIZE: usize = 200;

/// Maximum length of a free-form note attached to an entry.
pub const MAX_NOTE_LEN: usize = 500;

/// Version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Subsystem name.
pub const SUBSYSTEM_NAME: &str = "walletcore";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_max_topup_is_100k() {
        // 10_000_000 with scale 2 => 100_000.00
        assert_eq!(DEFAULT_MAX_TOPUP, Decimal::new(10_000_000, 2));
        assert_eq!(DEFAULT_MAX_TOPUP.to_string(), "100000.00");
    }

    #[test]
    fn page_bounds_sane() {
        assert!(DEFAULT_PAGE_SIZE <= MAX_PAGE_SIZE);
    }
}
