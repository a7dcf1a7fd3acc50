//! Strongly-typed identifier value objects.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ValidationError;

/// Invoice identifier shared between the merchant and Robokassa (`InvId`).
///
/// The shop uses the order number as the invoice id, so one invoice
/// identifies both the order and its payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct InvoiceId(u64);

impl InvoiceId {
    /// Creates an InvoiceId, rejecting zero (Robokassa reserves it).
    pub fn new(id: u64) -> Result<Self, ValidationError> {
        if id == 0 {
            return Err(ValidationError::invalid_format(
                "InvId",
                "invoice id must be positive",
            ));
        }
        Ok(Self(id))
    }

    /// Returns the numeric value.
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl TryFrom<u64> for InvoiceId {
    type Error = ValidationError;

    fn try_from(id: u64) -> Result<Self, Self::Error> {
        Self::new(id)
    }
}

impl From<InvoiceId> for u64 {
    fn from(id: InvoiceId) -> Self {
        id.0
    }
}

impl fmt::Display for InvoiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for InvoiceId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id = s
            .trim()
            .parse::<u64>()
            .map_err(|_| ValidationError::invalid_format("InvId", "not an unsigned integer"))?;
        Self::new(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_numeric_invoice_id() {
        let id: InvoiceId = "42".parse().unwrap();
        assert_eq!(id.value(), 42);
        assert_eq!(id.to_string(), "42");
    }

    #[test]
    fn rejects_zero() {
        assert!(InvoiceId::new(0).is_err());
        assert!("0".parse::<InvoiceId>().is_err());
    }

    #[test]
    fn rejects_non_numeric() {
        assert!("42abc".parse::<InvoiceId>().is_err());
        assert!("-1".parse::<InvoiceId>().is_err());
        assert!("".parse::<InvoiceId>().is_err());
    }

    #[test]
    fn serializes_transparently() {
        let id = InvoiceId::new(7).unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "7");
        assert_eq!(serde_json::from_str::<InvoiceId>("7").unwrap(), id);
    }

    #[test]
    fn deserialization_rejects_zero() {
        assert!(serde_json::from_str::<InvoiceId>("0").is_err());
    }
}
