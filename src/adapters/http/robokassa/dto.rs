//! Data Transfer Objects for Robokassa HTTP endpoints.
//!
//! Notifications arrive form-encoded and are read into a plain field map;
//! these types cover the JSON and query-string surfaces.

use serde::{Deserialize, Serialize};

use crate::domain::payment::PaymentRecord;

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Query parameters of the checkout page.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CheckoutQuery {
    /// `test=1` forces a test-mode payment.
    #[serde(default)]
    pub test: Option<String>,
}

impl CheckoutQuery {
    pub fn is_test(&self) -> bool {
        matches!(self.test.as_deref(), Some("1") | Some("true"))
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Payment state as returned by the management endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PaymentResponse {
    pub invoice_id: u64,
    pub state: String,
    pub amount: String,
    pub currency: String,
    pub test: bool,
    pub updated_at: String,
}

impl From<PaymentRecord> for PaymentResponse {
    fn from(payment: PaymentRecord) -> Self {
        Self {
            invoice_id: payment.invoice_id.value(),
            state: payment.state.to_string(),
            amount: payment.amount.to_out_sum(),
            currency: payment.amount.currency().to_string(),
            test: payment.test,
            updated_at: payment.updated_at.to_rfc3339(),
        }
    }
}

/// Standard error response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    /// Error code for programmatic handling.
    pub error_code: String,
    /// Human-readable error message.
    pub message: String,
}

impl ErrorResponse {
    pub fn new(error_code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error_code: error_code.into(),
            message: message.into(),
        }
    }
}
