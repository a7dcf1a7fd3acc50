//! ApplyRemoteStatusHandler - Maps a provider-reported outcome onto a payment.

use std::sync::Arc;

use tracing::info;

use crate::domain::foundation::InvoiceId;
use crate::domain::payment::{PaymentRecord, RemoteStatus};
use crate::ports::PaymentStore;

use super::error::PaymentError;

/// Command to apply a remote status.
#[derive(Debug, Clone)]
pub struct ApplyRemoteStatusCommand {
    pub invoice_id: InvoiceId,
    pub status: RemoteStatus,
}

/// Handler applying `success` / `fail` outside the notification path.
///
/// `success` completes the payment, `fail` voids it.
pub struct ApplyRemoteStatusHandler {
    payments: Arc<dyn PaymentStore>,
}

impl ApplyRemoteStatusHandler {
    pub fn new(payments: Arc<dyn PaymentStore>) -> Self {
        Self { payments }
    }

    pub async fn handle(&self, cmd: ApplyRemoteStatusCommand) -> Result<PaymentRecord, PaymentError> {
        let mut payment = self
            .payments
            .find_by_invoice_id(cmd.invoice_id)
            .await?
            .ok_or_else(|| PaymentError::payment_not_found(cmd.invoice_id))?;

        payment.apply_remote_status(cmd.status);
        self.payments.save(&payment).await?;

        info!(
            invoice_id = %cmd.invoice_id,
            remote_status = ?cmd.status,
            state = %payment.state,
            "Payment state updated"
        );
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
        fail_save: bool,
    }

    impl MockPaymentStore {
        fn new(fail_save: bool) -> Self {
            let payment = PaymentRecord::pending(
                InvoiceId::new(42).unwrap(),
                Money::parse("250.00", "RUB").unwrap(),
                false,
            );
            Self {
                payments: Mutex::new(vec![payment]),
                fail_save,
            }
        }
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
            if self.fail_save {
                return Err(DomainError::database("Simulated save failure"));
            }
            let mut payments = self.payments.lock().unwrap();
            payments.retain(|p| p.invoice_id != payment.invoice_id);
            payments.push(payment.clone());
            Ok(())
        }
    }

    fn cmd(status: RemoteStatus) -> ApplyRemoteStatusCommand {
        ApplyRemoteStatusCommand {
            invoice_id: InvoiceId::new(42).unwrap(),
            status,
        }
    }

    #[tokio::test]
    async fn success_completes_payment() {
        let handler = ApplyRemoteStatusHandler::new(Arc::new(MockPaymentStore::new(false)));
        let payment = handler.handle(cmd(RemoteStatus::Success)).await.unwrap();
        assert_eq!(payment.state, PaymentState::Completed);
    }

    #[tokio::test]
    async fn fail_voids_payment() {
        let store = Arc::new(MockPaymentStore::new(false));
        let handler = ApplyRemoteStatusHandler::new(store.clone());

        let payment = handler.handle(cmd(RemoteStatus::Fail)).await.unwrap();

        assert_eq!(payment.state, PaymentState::AuthorizationVoided);
        assert_eq!(
            store.payments.lock().unwrap()[0].state,
            PaymentState::AuthorizationVoided
        );
    }

    #[tokio::test]
    async fn save_failure_is_reported() {
        let handler = ApplyRemoteStatusHandler::new(Arc::new(MockPaymentStore::new(true)));
        let err = handler.handle(cmd(RemoteStatus::Success)).await.unwrap_err();
        assert!(matches!(err, PaymentError::Infrastructure(_)));
    }
}
