//! ResultURL notification validation.
//!
//! Validation is split in two so the caller can perform the payment lookup
//! asynchronously in between:
//!
//! 1. [`InboundNotificationValidator::authenticate`] checks payload shape,
//!    configuration and the password #2 signature.
//! 2. [`InboundNotificationValidator::reconcile`] checks the looked-up payment
//!    exists and its recorded amount equals `OutSum` exactly.
//!
//! [`InboundNotificationValidator::validate`] runs both with a synchronous
//! lookup. The outcome is deterministic for the same inputs, so replays of
//! the same notification get the same answer.

use tracing::{debug, error, info, warn};

use crate::domain::foundation::{parse_amount, InvoiceId};
use crate::domain::payment::{Payable, PaymentState};

use super::errors::NotificationError;
use super::gateway::PaymentGatewayConfig;
use super::notification::{acknowledgement, NotificationRecord, INV_ID, OUT_SUM, SIGNATURE_VALUE};
use super::signature::SignatureInput;

/// A notification whose shape and signature have been checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedNotification {
    pub out_sum: String,
    pub inv_id: String,
}

impl VerifiedNotification {
    /// The notified invoice id. Anything unparsable cannot match a payment.
    pub fn invoice_id(&self) -> Result<InvoiceId, NotificationError> {
        self.inv_id
            .parse()
            .map_err(|_| NotificationError::UnknownTransaction(self.inv_id.clone()))
    }
}

/// A fully validated notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Acceptance<T> {
    /// The payment (or order) the notification settles.
    pub subject: T,
    pub invoice_id: InvoiceId,
    /// Always [`PaymentState::Completed`].
    pub new_state: PaymentState,
    /// Response body for Robokassa, `OK<InvId>`.
    pub acknowledgement: String,
}

/// Validates ResultURL notifications for one shop.
pub struct InboundNotificationValidator<'a> {
    config: &'a PaymentGatewayConfig,
}

impl<'a> InboundNotificationValidator<'a> {
    pub fn new(config: &'a PaymentGatewayConfig) -> Self {
        Self { config }
    }

    /// Runs every check, looking the payment up with `lookup`.
    pub fn validate<T, F>(
        &self,
        record: &NotificationRecord,
        lookup: F,
        require_signature: bool,
    ) -> Result<Acceptance<T>, NotificationError>
    where
        T: Payable,
        F: FnOnce(InvoiceId) -> Option<T>,
    {
        let verified = self.authenticate(record, require_signature)?;
        let subject = match verified.invoice_id() {
            Ok(invoice_id) => lookup(invoice_id),
            Err(_) => None,
        };
        self.reconcile(&verified, subject)
    }

    /// Checks payload shape, configuration and signature.
    ///
    /// # Errors
    ///
    /// - `EmptyPayload` - no fields at all
    /// - `MissingFields` - `OutSum`/`InvId` absent, or `SignatureValue` when required
    /// - `Config` - merchant login not configured
    /// - `SignatureMismatch` - password #2 signature does not match
    pub fn authenticate(
        &self,
        record: &NotificationRecord,
        require_signature: bool,
    ) -> Result<VerifiedNotification, NotificationError> {
        let verified = self
            .check_authentic(record, require_signature)
            .map_err(|err| self.rejected(record.inv_id(), err))?;

        if self.config.logging {
            let shop_params: Vec<String> = record
                .shop_params()
                .map(|(name, value)| format!("{}={}", name, value))
                .collect();
            debug!(
                invoice_id = %verified.inv_id,
                shop_params = %shop_params.join("&"),
                "Robokassa notification authenticated"
            );
        }
        Ok(verified)
    }

    /// Matches the verified notification against the looked-up payment.
    ///
    /// # Errors
    ///
    /// - `UnknownTransaction` - `subject` is `None`
    /// - `AmountMismatch` - recorded amount differs from `OutSum`
    pub fn reconcile<T: Payable>(
        &self,
        verified: &VerifiedNotification,
        subject: Option<T>,
    ) -> Result<Acceptance<T>, NotificationError> {
        let acceptance = self
            .check_amount(verified, subject)
            .map_err(|err| self.rejected(Some(&verified.inv_id), err))?;

        info!(
            invoice_id = %acceptance.invoice_id,
            out_sum = %verified.out_sum,
            "Robokassa notification accepted"
        );
        Ok(acceptance)
    }

    fn check_authentic(
        &self,
        record: &NotificationRecord,
        require_signature: bool,
    ) -> Result<VerifiedNotification, NotificationError> {
        if record.is_empty() {
            return Err(NotificationError::EmptyPayload);
        }

        let mut required = vec![OUT_SUM, INV_ID];
        if require_signature {
            required.push(SIGNATURE_VALUE);
        }
        let missing: Vec<&'static str> = required
            .into_iter()
            .filter(|name| !record.contains(name))
            .collect();
        if !missing.is_empty() {
            return Err(NotificationError::MissingFields(missing));
        }

        if !self.config.has_merchant_login() {
            return Err(NotificationError::Config(
                "merchant login is not configured".to_string(),
            ));
        }

        let out_sum = record.out_sum().unwrap_or_default().to_string();
        let inv_id = record.inv_id().unwrap_or_default().to_string();

        if require_signature {
            let input = SignatureInput::inbound(&out_sum, &inv_id, &self.config.pass2);
            let provided = record.signature_value().unwrap_or_default();
            if !self.config.codec().verify(&input, provided) {
                return Err(NotificationError::SignatureMismatch);
            }
        }

        Ok(VerifiedNotification { out_sum, inv_id })
    }

    fn check_amount<T: Payable>(
        &self,
        verified: &VerifiedNotification,
        subject: Option<T>,
    ) -> Result<Acceptance<T>, NotificationError> {
        let subject =
            subject.ok_or_else(|| NotificationError::UnknownTransaction(verified.inv_id.clone()))?;

        let recorded = subject.recorded_amount();
        let mismatch = || NotificationError::AmountMismatch {
            expected: format!("{} {}", recorded.amount(), recorded.currency()),
            notified: verified.out_sum.clone(),
        };

        if !recorded
            .currency()
            .eq_ignore_ascii_case(&self.config.notification_currency)
        {
            return Err(mismatch());
        }
        let notified = parse_amount(&verified.out_sum).map_err(|_| mismatch())?;
        if notified != recorded.amount() {
            return Err(mismatch());
        }

        let invoice_id = subject.invoice_id();
        Ok(Acceptance {
            subject,
            invoice_id,
            new_state: PaymentState::Completed,
            acknowledgement: acknowledgement(&verified.inv_id),
        })
    }

    fn rejected(&self, inv_id: Option<&str>, err: NotificationError) -> NotificationError {
        let inv_id = inv_id.unwrap_or("-");
        if err.is_config_error() {
            error!(invoice_id = inv_id, error = %err, "Robokassa gateway misconfigured");
        } else if self.config.logging {
            warn!(invoice_id = inv_id, reason = err.reason(), error = %err, "Robokassa notification rejected");
        } else {
            debug!(invoice_id = inv_id, reason = err.reason(), "Robokassa notification rejected");
        }
        err
    }
}
