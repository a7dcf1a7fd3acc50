//! Notification rejection reasons.
//!
//! Every variant except `Config` is caused by the incoming request and is
//! answered with 400. `Config` means the shop itself is misconfigured.

use axum::http::StatusCode;
use thiserror::Error;

/// Why a ResultURL notification was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotificationError {
    /// The notification carried no fields at all.
    #[error("Empty notification payload")]
    EmptyPayload,

    /// Required fields were absent.
    #[error("Missing fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),

    /// Operator misconfiguration (merchant login unset, bad algorithm).
    #[error("Configuration error: {0}")]
    Config(String),

    /// Recomputed signature differs from `SignatureValue`.
    #[error("Signature mismatch")]
    SignatureMismatch,

    /// No payment is recorded for the notified `InvId`.
    #[error("Unknown transaction: {0}")]
    UnknownTransaction(String),

    /// Notified `OutSum` differs from the recorded amount.
    #[error("Amount mismatch: expected {expected}, notified {notified}")]
    AmountMismatch { expected: String, notified: String },
}

impl NotificationError {
    /// Short machine-readable reason, used in logs.
    pub fn reason(&self) -> &'static str {
        match self {
            NotificationError::EmptyPayload => "empty_payload",
            NotificationError::MissingFields(_) => "missing_fields",
            NotificationError::Config(_) => "config_error",
            NotificationError::SignatureMismatch => "signature_mismatch",
            NotificationError::UnknownTransaction(_) => "unknown_transaction",
            NotificationError::AmountMismatch { .. } => "amount_mismatch",
        }
    }

    /// True for operator misconfiguration, which should alert rather than
    /// be treated as a routine rejection.
    pub fn is_config_error(&self) -> bool {
        matches!(self, NotificationError::Config(_))
    }

    /// Maps the rejection to the status returned to Robokassa.
    pub fn status_code(&self) -> StatusCode {
        match self {
            NotificationError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ══════════════════════════════════════════════════════════════
    // Display Tests
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn missing_fields_lists_names() {
        let err = NotificationError::MissingFields(vec!["OutSum", "SignatureValue"]);
        assert_eq!(format!("{}", err), "Missing fields: OutSum, SignatureValue");
    }

    #[test]
    fn amount_mismatch_shows_both_amounts() {
        let err = NotificationError::AmountMismatch {
            expected: "100.00 RUB".to_string(),
            notified: "100.01".to_string(),
        };
        assert_eq!(
            format!("{}", err),
            "Amount mismatch: expected 100.00 RUB, notified 100.01"
        );
    }

    #[test]
    fn unknown_transaction_shows_invoice() {
        let err = NotificationError::UnknownTransaction("77".to_string());
        assert_eq!(format!("{}", err), "Unknown transaction: 77");
    }

    // ══════════════════════════════════════════════════════════════
    // Status Code Tests
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn request_caused_rejections_are_bad_request() {
        let errors = [
            NotificationError::EmptyPayload,
            NotificationError::MissingFields(vec!["InvId"]),
            NotificationError::SignatureMismatch,
            NotificationError::UnknownTransaction("1".to_string()),
            NotificationError::AmountMismatch {
                expected: "1.00 RUB".to_string(),
                notified: "2.00".to_string(),
            },
        ];
        for err in errors {
            assert_eq!(err.status_code(), StatusCode::BAD_REQUEST, "{}", err);
            assert!(!err.is_config_error());
        }
    }

    #[test]
    fn config_error_is_server_error() {
        let err = NotificationError::Config("merchant login is not set".to_string());
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.is_config_error());
        assert_eq!(err.reason(), "config_error");
    }
}
