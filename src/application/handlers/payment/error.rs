//! Payment application errors.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | Notification | 400 (500 for configuration errors) |
//! | Request | 422 (500 for missing merchant login) |
//! | Validation | 400 |
//! | OrderNotFound | 404 |
//! | PaymentNotFound | 404 |
//! | Infrastructure | 500 |

use crate::domain::foundation::{DomainError, ErrorCode, InvoiceId, ValidationError};
use crate::domain::robokassa::{NotificationError, PaymentRequestError};

/// Errors returned by the payment command handlers.
#[derive(Debug)]
pub enum PaymentError {
    /// Robokassa notification rejected.
    Notification(NotificationError),

    /// Outbound payment request could not be built.
    Request(PaymentRequestError),

    /// Malformed input such as a non-numeric invoice id.
    Validation(ValidationError),

    /// No order exists for the invoice.
    OrderNotFound(InvoiceId),

    /// No payment exists for the invoice.
    PaymentNotFound(InvoiceId),

    /// Port failure.
    Infrastructure(String),
}

impl PaymentError {
    pub fn order_not_found(invoice_id: InvoiceId) -> Self {
        PaymentError::OrderNotFound(invoice_id)
    }

    pub fn payment_not_found(invoice_id: InvoiceId) -> Self {
        PaymentError::PaymentNotFound(invoice_id)
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        PaymentError::Infrastructure(message.into())
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            PaymentError::Notification(err) if err.is_config_error() => ErrorCode::InternalError,
            PaymentError::Notification(_) => ErrorCode::ValidationFailed,
            PaymentError::Request(PaymentRequestError::MissingMerchantLogin) => {
                ErrorCode::InternalError
            }
            PaymentError::Request(_) | PaymentError::Validation(_) => ErrorCode::ValidationFailed,
            PaymentError::OrderNotFound(_) => ErrorCode::OrderNotFound,
            PaymentError::PaymentNotFound(_) => ErrorCode::PaymentNotFound,
            PaymentError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    /// Returns a user-facing error message.
    pub fn message(&self) -> String {
        match self {
            PaymentError::Notification(err) => format!("Notification rejected: {}", err),
            PaymentError::Request(err) => format!("Cannot build payment request: {}", err),
            PaymentError::Validation(err) => err.to_string(),
            PaymentError::OrderNotFound(id) => format!("Order not found: {}", id),
            PaymentError::PaymentNotFound(id) => format!("Payment not found: {}", id),
            PaymentError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for PaymentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for PaymentError {}

impl From<NotificationError> for PaymentError {
    fn from(err: NotificationError) -> Self {
        PaymentError::Notification(err)
    }
}

impl From<PaymentRequestError> for PaymentError {
    fn from(err: PaymentRequestError) -> Self {
        PaymentError::Request(err)
    }
}

impl From<ValidationError> for PaymentError {
    fn from(err: ValidationError) -> Self {
        PaymentError::Validation(err)
    }
}

impl From<DomainError> for PaymentError {
    fn from(err: DomainError) -> Self {
        PaymentError::Infrastructure(err.to_string())
    }
}
