//! Payment state as owned by the order/payment store.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// Lifecycle state of a Robokassa payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentState {
    /// Redirect issued, waiting for the ResultURL notification.
    Pending,

    /// Notification verified and amount reconciled.
    Completed,

    /// Provider reported a failed payment.
    AuthorizationVoided,

    /// Payment cancelled outside the notification path.
    AuthorizationExpired,
}

impl PaymentState {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentState::Pending => "pending",
            PaymentState::Completed => "completed",
            PaymentState::AuthorizationVoided => "authorization_voided",
            PaymentState::AuthorizationExpired => "authorization_expired",
        }
    }

    /// Returns true once the payment has settled successfully.
    pub fn is_completed(&self) -> bool {
        matches!(self, PaymentState::Completed)
    }

    /// State applied by an externally-triggered cancellation. Always succeeds.
    pub fn cancelled() -> Self {
        PaymentState::AuthorizationExpired
    }
}

impl fmt::Display for PaymentState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome reported by the provider outside the notification path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RemoteStatus {
    Success,
    Fail,
}

impl FromStr for RemoteStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "success" => Ok(RemoteStatus::Success),
            "fail" => Ok(RemoteStatus::Fail),
            other => Err(ValidationError::invalid_format(
                "remote_status",
                format!("unknown status '{}'", other),
            )),
        }
    }
}

impl From<RemoteStatus> for PaymentState {
    fn from(status: RemoteStatus) -> Self {
        match status {
            RemoteStatus::Success => PaymentState::Completed,
            RemoteStatus::Fail => PaymentState::AuthorizationVoided,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_success_maps_to_completed() {
        assert_eq!(PaymentState::from(RemoteStatus::Success), PaymentState::Completed);
    }

    #[test]
    fn remote_fail_maps_to_voided() {
        assert_eq!(
            PaymentState::from(RemoteStatus::Fail),
            PaymentState::AuthorizationVoided
        );
    }

    #[test]
    fn remote_status_parses_known_values_only() {
        assert_eq!("success".parse::<RemoteStatus>().unwrap(), RemoteStatus::Success);
        assert_eq!("fail".parse::<RemoteStatus>().unwrap(), RemoteStatus::Fail);
        assert!("SUCCESS".parse::<RemoteStatus>().is_err());
        assert!("refunded".parse::<RemoteStatus>().is_err());
    }

    #[test]
    fn cancellation_expires_authorization() {
        assert_eq!(PaymentState::cancelled(), PaymentState::AuthorizationExpired);
    }

    #[test]
    fn serializes_as_snake_case() {
        let json = serde_json::to_string(&PaymentState::AuthorizationVoided).unwrap();
        assert_eq!(json, "\"authorization_voided\"");
        assert_eq!(PaymentState::AuthorizationExpired.to_string(), "authorization_expired");
    }

    #[test]
    fn only_completed_is_completed() {
        assert!(PaymentState::Completed.is_completed());
        assert!(!PaymentState::Pending.is_completed());
        assert!(!PaymentState::AuthorizationVoided.is_completed());
        assert!(!PaymentState::AuthorizationExpired.is_completed());
    }
}
