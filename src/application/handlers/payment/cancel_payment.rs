//! CancelPaymentHandler - Externally-triggered payment cancellation.

use std::sync::Arc;

use tracing::info;

use crate::domain::foundation::InvoiceId;
use crate::domain::payment::PaymentRecord;
use crate::ports::PaymentStore;

use super::error::PaymentError;

/// Command to cancel a payment.
#[derive(Debug, Clone)]
pub struct CancelPaymentCommand {
    pub invoice_id: InvoiceId,
}

/// Handler for cancelling payments.
///
/// Cancellation involves no signature and succeeds from any state; the
/// payment ends up `authorization_expired`.
pub struct CancelPaymentHandler {
    payments: Arc<dyn PaymentStore>,
}

impl CancelPaymentHandler {
    pub fn new(payments: Arc<dyn PaymentStore>) -> Self {
        Self { payments }
    }

    pub async fn handle(&self, cmd: CancelPaymentCommand) -> Result<PaymentRecord, PaymentError> {
        let mut payment = self
            .payments
            .find_by_invoice_id(cmd.invoice_id)
            .await?
            .ok_or_else(|| PaymentError::payment_not_found(cmd.invoice_id))?;

        payment.cancel();
        self.payments.save(&payment).await?;

        info!(invoice_id = %cmd.invoice_id, state = %payment.state, "Payment cancelled");
        Ok(payment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{DomainError, Money};
    use crate::domain::payment::PaymentState;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct MockPaymentStore {
        payments: Mutex<Vec<PaymentRecord>>,
    }

    #[async_trait]
    impl PaymentStore for MockPaymentStore {
        async fn find_by_invoice_id(
            &self,
            invoice_id: InvoiceId,
        ) -> Result<Option<PaymentRecord>, DomainError> {
            let payments = self.payments.lock().unwrap();
            Ok(payments.iter().find(|p| p.invoice_id == invoice_id).cloned())
        }

        async fn save(&self, payment: &PaymentRecord) -> Result<(), DomainError> {
            let mut payments = self.payments.lock().unwrap();
            payments.retain(|p| p.invoice_id != payment.invoice_id);
            payments.push(payment.clone());
            Ok(())
        }
    }

    fn store_with(state: PaymentState) -> Arc<MockPaymentStore> {
        let mut payment = PaymentRecord::pending(
            InvoiceId::new(42).unwrap(),
            Money::parse("250.00", "RUB").unwrap(),
            false,
        );
        payment.set_state(state);
        Arc::new(MockPaymentStore {
            payments: Mutex::new(vec![payment]),
        })
    }

    #[tokio::test]
    async fn cancel_expires_pending_payment() {
        let store = store_with(PaymentState::Pending);
        let handler = CancelPaymentHandler::new(store.clone());

        let payment = handler
            .handle(CancelPaymentCommand {
                invoice_id: InvoiceId::new(42).unwrap(),
            })
            .await
            .unwrap();

        assert_eq!(payment.state, PaymentState::AuthorizationExpired);
        assert_eq!(
            store.payments.lock().unwrap()[0].state,
            PaymentState::AuthorizationExpired
        );
    }

    #[tokio::test]
    async fn cancel_succeeds_for_completed_payment() {
        let handler = CancelPaymentHandler::new(store_with(PaymentState::Completed));
        let payment = handler
            .handle(CancelPaymentCommand {
                invoice_id: InvoiceId::new(42).unwrap(),
            })
            .await
            .unwrap();
        assert_eq!(payment.state, PaymentState::AuthorizationExpired);
    }

    #[tokio::test]
    async fn cancel_unknown_payment_is_not_found() {
        let handler = CancelPaymentHandler::new(store_with(PaymentState::Pending));
        let err = handler
            .handle(CancelPaymentCommand {
                invoice_id: InvoiceId::new(9).unwrap(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, PaymentError::PaymentNotFound(id) if id.value() == 9));
    }
}
