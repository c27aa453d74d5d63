//! Notification gateway seam.
//!
//! Delivery (email, Telegram, ...) lives outside the subsystem. The ledger
//! hands the gateway a plain data payload per transition and moves on: a
//! gateway failure is logged at `warn` and never propagates into a workflow
//! result, because a ledger mutation that has committed must not be rolled
//! back by a flaky notifier.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use walletcore_types::{TransactionId, UserId};

/// Plain data payload for one workflow transition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum WalletEvent {
    /// A user submitted a deposit claim.
    TopupRequested {
        transaction_id: TransactionId,
        user_id: UserId,
        amount: Decimal,
        method: String,
    },
    /// An admin verified the claim and the wallet was credited.
    TopupApproved {
        transaction_id: TransactionId,
        user_id: UserId,
        amount: Decimal,
        new_balance: Decimal,
        note: Option<String>,
    },
    /// An admin rejected the claim; the wallet was never touched.
    TopupRejected {
        transaction_id: TransactionId,
        user_id: UserId,
        amount: Decimal,
        note: Option<String>,
    },
}

impl std::fmt::Display for WalletEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TopupRequested { .. } => write!(f, "TOPUP_REQUESTED"),
            Self::TopupApproved { .. } => write!(f, "TOPUP_APPROVED"),
            Self::TopupRejected { .. } => write!(f, "TOPUP_REJECTED"),
        }
    }
}

/// Delivery failed somewhere downstream. Opaque to the ledger.
#[derive(Debug, thiserror::Error)]
#[error("notification delivery failed: {0}")]
pub struct NotifyError(pub String);

/// Outbound notification delivery, implemented by the hosting process.
pub trait NotificationGateway: Send + Sync {
    fn deliver(&self, event: &WalletEvent) -> Result<(), NotifyError>;
}

/// Gateway that drops every event. Useful when the storefront runs without
/// a notification channel configured.
pub struct NoopGateway;

impl NotificationGateway for NoopGateway {
    fn deliver(&self, _event: &WalletEvent) -> Result<(), NotifyError> {
        Ok(())
    }
}

/// Test doubles.
#[cfg(any(test, feature = "test-helpers"))]
pub mod doubles {
    use std::sync::Mutex;

    use super::{NotificationGateway, NotifyError, WalletEvent};

    /// Records every delivered event.
    #[derive(Default)]
    pub struct RecordingGateway {
        events: Mutex<Vec<WalletEvent>>,
    }

    impl RecordingGateway {
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        pub fn events(&self) -> Vec<WalletEvent> {
            self.events.lock().unwrap().clone()
        }
    }

    impl NotificationGateway for RecordingGateway {
        fn deliver(&self, event: &WalletEvent) -> Result<(), NotifyError> {
            self.events.lock().unwrap().push(event.clone());
            Ok(())
        }
    }

    /// Fails every delivery.
    pub struct FailingGateway;

    impl NotificationGateway for FailingGateway {
        fn deliver(&self, _event: &WalletEvent) -> Result<(), NotifyError> {
            Err(NotifyError("downstream unreachable".into()))
        }
    }
}
