//! Payment record as seen through the payment store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{InvoiceId, Money};

use super::state::{PaymentState, RemoteStatus};

/// Anything that carries a recorded amount for an invoice.
///
/// Notification reconciliation compares the notified `OutSum`
/// against this amount.
pub trait Payable {
    fn invoice_id(&self) -> InvoiceId;
    fn recorded_amount(&self) -> &Money;
}

/// A Robokassa payment for one invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentRecord {
    pub invoice_id: InvoiceId,
    pub amount: Money,
    pub state: PaymentState,
    /// Whether the redirect was issued in test mode (`IsTest=1`).
    pub test: bool,
    pub updated_at: DateTime<Utc>,
}

impl PaymentRecord {
    /// Creates a pending payment, as persisted when the redirect is issued.
    pub fn pending(invoice_id: InvoiceId, amount: Money, test: bool) -> Self {
        Self {
            invoice_id,
            amount,
            state: PaymentState::Pending,
            test,
            updated_at: Utc::now(),
        }
    }

    /// Moves the payment to `state`, touching `updated_at`.
    pub fn set_state(&mut self, state: PaymentState) {
        self.state = state;
        self.updated_at = Utc::now();
    }

    /// Externally-triggered cancellation. Always succeeds.
    pub fn cancel(&mut self) {
        self.set_state(PaymentState::cancelled());
    }

    /// Applies a provider-reported outcome.
    pub fn apply_remote_status(&mut self, status: RemoteStatus) {
        self.set_state(status.into());
    }
}

impl Payable for PaymentRecord {
    fn invoice_id(&self) -> InvoiceId {
        self.invoice_id
    }

    fn recorded_amount(&self) -> &Money {
        &self.amount
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pending() -> PaymentRecord {
        PaymentRecord::pending(
            InvoiceId::new(42).unwrap(),
            Money::parse("250.00", "RUB").unwrap(),
            false,
        )
    }

    #[test]
    fn new_record_is_pending() {
        let record = pending();
        assert_eq!(record.state, PaymentState::Pending);
        assert_eq!(record.recorded_amount().to_out_sum(), "250.00");
    }

    #[test]
    fn cancel_expires_from_any_state() {
        for start in [
            PaymentState::Pending,
            PaymentState::Completed,
            PaymentState::AuthorizationVoided,
            PaymentState::AuthorizationExpired,
        ] {
            let mut record = pending();
            record.state = start;
            record.cancel();
            assert_eq!(record.state, PaymentState::AuthorizationExpired);
        }
    }

    #[test]
    fn remote_status_is_applied() {
        let mut record = pending();
        record.apply_remote_status(RemoteStatus::Fail);
        assert_eq!(record.state, PaymentState::AuthorizationVoided);

        record.apply_remote_status(RemoteStatus::Success);
        assert_eq!(record.state, PaymentState::Completed);
    }

    #[test]
    fn set_state_touches_timestamp() {
        let mut record = pending();
        let before = record.updated_at;
        record.set_state(PaymentState::Completed);
        assert!(record.updated_at >= before);
    }
}
