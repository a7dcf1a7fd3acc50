//! StartCheckoutHandler - Builds the Robokassa redirect for an order.

use std::sync::Arc;

use tracing::info;

use crate::domain::foundation::InvoiceId;
use crate::domain::payment::PaymentRecord;
use crate::domain::robokassa::{OutboundRequestBuilder, PaymentGatewayConfig, PaymentRequest};
use crate::ports::{OrderReader, PaymentStore};

use super::error::PaymentError;

/// Command to start a Robokassa checkout.
#[derive(Debug, Clone)]
pub struct StartCheckoutCommand {
    pub invoice_id: InvoiceId,
    /// Forces `IsTest=1` even when the shop runs in live mode.
    pub test_mode: bool,
}

/// Result of a started checkout.
#[derive(Debug, Clone)]
pub struct StartCheckoutResult {
    pub request: PaymentRequest,
    pub payment: PaymentRecord,
}

/// Handler for starting checkouts.
///
/// Persists the payment as `pending` before handing the signed request back,
/// so the ResultURL notification always finds a record to reconcile against.
pub struct StartCheckoutHandler {
    orders: Arc<dyn OrderReader>,
    payments: Arc<dyn PaymentStore>,
    config: Arc<PaymentGatewayConfig>,
}

impl StartCheckoutHandler {
    pub fn new(
        orders: Arc<dyn OrderReader>,
        payments: Arc<dyn PaymentStore>,
        config: Arc<PaymentGatewayConfig>,
    ) -> Self {
        Self {
            orders,
            payments,
            config,
        }
    }

    pub async fn handle(&self, cmd: StartCheckoutCommand) -> Result<StartCheckoutResult, PaymentError> {
        // 1. Load the order
        let order = self
            .orders
            .find_by_invoice_id(cmd.invoice_id)
            .await?
            .ok_or_else(|| PaymentError::order_not_found(cmd.invoice_id))?;

        // 2. Build the signed request
        let test_mode = cmd.test_mode || self.config.test_mode;
        let request = OutboundRequestBuilder::new(&self.config).build(
            &order,
            test_mode,
            order.currency_label.as_deref(),
        )?;

        // 3. Record the pending payment, never downgrading a settled one.
        // The recorded amount is the rounded OutSum Robokassa will notify.
        let payment = match self.payments.find_by_invoice_id(order.id).await? {
            Some(existing) if existing.state.is_completed() => existing,
            _ => {
                let amount = order.total.rounded_to_out_sum();
                let payment = PaymentRecord::pending(order.id, amount, test_mode);
                self.payments.save(&payment).await?;
                payment
            }
        };

        info!(
            invoice_id = %order.id,
            out_sum = %order.total,
            test = test_mode,
            "Robokassa checkout started"
        );

        Ok(StartCheckoutResult { request, payment })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{DomainError, Money};
    use crate::domain::payment::{OrderItem, OrderSnapshot, PaymentState};
    use crate::domain::robokassa::{
        digest, DigestAlgorithm, InboundNotificationValidator, NotificationRecord,
        PaymentRequestError,
    };
    use async_trait::async_trait;
    use rust_decimal::Decimal;
    use std::sync::Mutex;

    // ════════════════════════════════════════════════════════════════════════════
    // Mock Implementations
    // ════════════════════════════════════════════════════════════════════════════

    struct MockOrderReader {
        orders: Vec<OrderSnapshot>,
    }

    #[async_trait]
    impl OrderReader for MockOrderReader {
        async fn find_by_invoice_id(
            &self,
            invoice_id: InvoiceId,
        ) -> Result<Option<OrderSnapshot>, DomainError> {
            Ok(self.orders.iter().find(|o| o.id == invoice_id).cloned())
        }
    }

    #[derive(Default)]
    struct MockPaymentStore {
        payments: Mutex<Vec<PaymentRecord>>,
        fail_save: bool,
    }

    impl MockPaymentStore {
        fn failing_save() -> Self {
            Self {
                payments: Mutex::new(Vec::new()),
                fail_save: true,
            }
        }

        fn with_payment(payment: PaymentRecord) -> Self {
            Self {
                payments: Mutex::new(vec![payment]),
                fail_save: false,
            }
        }

        fn get_payments(&self) -> Vec<PaymentRecord> {
            self.payments.lock().unwrap().clone()
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

    // ════════════════════════════════════════════════════════════════════════════
    // Test Helpers
    // ════════════════════════════════════════════════════════════════════════════

    fn invoice(id: u64) -> InvoiceId {
        InvoiceId::new(id).unwrap()
    }

    fn order(id: u64) -> OrderSnapshot {
        OrderSnapshot::new(invoice(id), Money::parse("250.00", "RUB").unwrap(), "buyer@example.com")
            .with_item(OrderItem::new("Tea", Decimal::new(25000, 2), Decimal::ONE).unwrap())
    }

    fn handler(
        orders: Vec<OrderSnapshot>,
        store: Arc<MockPaymentStore>,
        config: PaymentGatewayConfig,
    ) -> StartCheckoutHandler {
        StartCheckoutHandler::new(Arc::new(MockOrderReader { orders }), store, Arc::new(config))
    }

    fn config() -> PaymentGatewayConfig {
        PaymentGatewayConfig::new("demo-shop", "secret1", "secret2")
    }

    fn cmd(id: u64, test_mode: bool) -> StartCheckoutCommand {
        StartCheckoutCommand {
            invoice_id: invoice(id),
            test_mode,
        }
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn persists_pending_payment_and_returns_request() {
        let store = Arc::new(MockPaymentStore::default());
        let handler = handler(vec![order(42)], store.clone(), config());

        let result = handler.handle(cmd(42, false)).await.unwrap();

        assert_eq!(result.request.field("InvId"), Some("42"));
        assert_eq!(result.request.field("OutSum"), Some("250.00"));
        assert!(!result.request.is_test());
        assert_eq!(result.payment.state, PaymentState::Pending);

        let saved = store.get_payments();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].amount.to_out_sum(), "250.00");
    }

    #[tokio::test]
    async fn sub_kopeck_total_is_recorded_as_sent() {
        let total = Money::parse("100.005", "RUB").unwrap();
        let order = OrderSnapshot::new(invoice(9), total.clone(), "buyer@example.com")
            .with_item(OrderItem::new("Tea", total.amount(), Decimal::ONE).unwrap());
        let store = Arc::new(MockPaymentStore::default());
        let config = config();
        let handler = handler(vec![order], store.clone(), config.clone());

        let result = handler.handle(cmd(9, false)).await.unwrap();
        let out_sum = result.request.field("OutSum").unwrap().to_string();
        assert_eq!(out_sum, "100.01");

        let saved = store.get_payments().remove(0);
        assert_eq!(saved.amount, Money::parse("100.01", "RUB").unwrap());

        // The notification for what was sent reconciles against what was stored
        let signature = digest(
            &[&out_sum, "9", "secret2", "shp_label=drupal_official"],
            DigestAlgorithm::Md5,
        );
        let record = NotificationRecord::from_pairs([
            ("OutSum", out_sum.as_str()),
            ("InvId", "9"),
            ("SignatureValue", signature.as_str()),
        ]);
        let acceptance = InboundNotificationValidator::new(&config)
            .validate(&record, |_| Some(saved), true)
            .unwrap();
        assert_eq!(acceptance.acknowledgement, "OK9");
    }

    #[tokio::test]
    async fn shop_test_mode_marks_request_and_payment() {
        let store = Arc::new(MockPaymentStore::default());
        let mut config = config();
        config.test_mode = true;
        let handler = handler(vec![order(42)], store.clone(), config);

        let result = handler.handle(cmd(42, false)).await.unwrap();

        assert!(result.request.is_test());
        assert!(store.get_payments()[0].test);
    }

    #[tokio::test]
    async fn command_can_force_test_mode() {
        let store = Arc::new(MockPaymentStore::default());
        let handler = handler(vec![order(42)], store, config());

        let result = handler.handle(cmd(42, true)).await.unwrap();
        assert!(result.request.is_test());
    }

    #[tokio::test]
    async fn order_currency_label_is_forwarded() {
        let store = Arc::new(MockPaymentStore::default());
        let handler = handler(
            vec![order(42).with_currency_label("QCardR")],
            store,
            config(),
        );

        let result = handler.handle(cmd(42, false)).await.unwrap();
        assert_eq!(result.request.field("IncCurrLabel"), Some("QCardR"));
    }

    #[tokio::test]
    async fn unknown_order_is_not_found() {
        let store = Arc::new(MockPaymentStore::default());
        let handler = handler(vec![], store.clone(), config());

        let err = handler.handle(cmd(7, false)).await.unwrap_err();
        assert!(matches!(err, PaymentError::OrderNotFound(id) if id.value() == 7));
        assert!(store.get_payments().is_empty());
    }

    #[tokio::test]
    async fn completed_payment_is_not_downgraded() {
        let mut paid = PaymentRecord::pending(invoice(42), Money::parse("250.00", "RUB").unwrap(), false);
        paid.set_state(PaymentState::Completed);
        let store = Arc::new(MockPaymentStore::with_payment(paid));
        let handler = handler(vec![order(42)], store.clone(), config());

        let result = handler.handle(cmd(42, false)).await.unwrap();
        assert_eq!(result.payment.state, PaymentState::Completed);
        assert_eq!(store.get_payments()[0].state, PaymentState::Completed);
    }

    #[tokio::test]
    async fn missing_login_is_request_error() {
        let store = Arc::new(MockPaymentStore::default());
        let handler = handler(
            vec![order(42)],
            store.clone(),
            PaymentGatewayConfig::new("", "p1", "p2"),
        );

        let err = handler.handle(cmd(42, false)).await.unwrap_err();
        assert!(matches!(
            err,
            PaymentError::Request(PaymentRequestError::MissingMerchantLogin)
        ));
        assert!(store.get_payments().is_empty());
    }

    #[tokio::test]
    async fn save_failure_is_infrastructure_error() {
        let store = Arc::new(MockPaymentStore::failing_save());
        let handler = handler(vec![order(42)], store, config());

        let err = handler.handle(cmd(42, false)).await.unwrap_err();
        assert!(matches!(err, PaymentError::Infrastructure(_)));
    }
}
