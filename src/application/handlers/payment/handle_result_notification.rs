//! HandleResultNotificationHandler - Processes Robokassa ResultURL callbacks.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::info;

use crate::domain::foundation::InvoiceId;
use crate::domain::payment::PaymentState;
use crate::domain::robokassa::{
    InboundNotificationValidator, NotificationRecord, PaymentGatewayConfig,
};
use crate::ports::PaymentStore;

use super::error::PaymentError;

/// Command carrying the raw notification form fields.
#[derive(Debug, Clone)]
pub struct HandleResultNotificationCommand {
    pub fields: BTreeMap<String, String>,
    /// `false` only on the unauthenticated fallback path.
    pub require_signature: bool,
}

/// Result of an accepted notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandleResultNotificationResult {
    pub invoice_id: InvoiceId,
    pub state: PaymentState,
    /// Body to return to Robokassa, `OK<InvId>`.
    pub acknowledgement: String,
    /// The payment had already been completed by an earlier delivery.
    pub replayed: bool,
}

/// Handler for Robokassa ResultURL notifications.
///
/// Authenticates the notification, loads the payment it refers to, checks
/// the amount and marks the payment `completed`. Robokassa retries delivery
/// until it gets the acknowledgement, so a notification for an already
/// completed payment is acknowledged again without another write.
pub struct HandleResultNotificationHandler {
    payments: Arc<dyn PaymentStore>,
    config: Arc<PaymentGatewayConfig>,
}

impl HandleResultNotificationHandler {
    pub fn new(payments: Arc<dyn PaymentStore>, config: Arc<PaymentGatewayConfig>) -> Self {
        Self { payments, config }
    }

    pub async fn handle(
        &self,
        cmd: HandleResultNotificationCommand,
    ) -> Result<HandleResultNotificationResult, PaymentError> {
        let validator = InboundNotificationValidator::new(&self.config);
        let record = NotificationRecord::new(cmd.fields);

        // 1. Shape, configuration and signature
        let verified = validator.authenticate(&record, cmd.require_signature)?;

        // 2. Load the payment
        let payment = match verified.invoice_id() {
            Ok(invoice_id) => self.payments.find_by_invoice_id(invoice_id).await?,
            Err(_) => None,
        };

        // 3. Amount reconciliation
        let acceptance = validator.reconcile(&verified, payment)?;
        let mut payment = acceptance.subject;

        if payment.state.is_completed() {
            info!(invoice_id = %acceptance.invoice_id, "Robokassa notification replayed");
            return Ok(HandleResultNotificationResult {
                invoice_id: acceptance.invoice_id,
                state: payment.state,
                acknowledgement: acceptance.acknowledgement,
                replayed: true,
            });
        }

        // 4. Persist the new state
        payment.set_state(acceptance.new_state);
        self.payments.save(&payment).await?;

        info!(
            invoice_id = %acceptance.invoice_id,
            state = %payment.state,
            "Payment state updated"
        );

        Ok(HandleResultNotificationResult {
            invoice_id: acceptance.invoice_id,
            state: payment.state,
            acknowledgement: acceptance.acknowledgement,
            replayed: false,
        })
    }
}
