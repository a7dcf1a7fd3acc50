//! Money value object.
//!
//! Amounts are exact decimals. Equality is exact (scale-insensitive:
//! `250.0 == 250.00`), never a tolerance comparison.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ValidationError;

/// An amount in a specific currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawMoney")]
pub struct Money {
    amount: Decimal,
    currency: String,
}

/// Unchecked wire shape, validated through [`Money::new`].
#[derive(Deserialize)]
struct RawMoney {
    amount: Decimal,
    currency: String,
}

impl TryFrom<RawMoney> for Money {
    type Error = ValidationError;

    fn try_from(raw: RawMoney) -> Result<Self, Self::Error> {
        Money::new(raw.amount, raw.currency)
    }
}

impl Money {
    /// Creates a Money value. Currency must be a 3-letter ISO 4217 code.
    pub fn new(amount: Decimal, currency: impl Into<String>) -> Result<Self, ValidationError> {
        let currency = currency.into().to_ascii_uppercase();
        if currency.len() != 3 || !currency.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(ValidationError::invalid_format(
                "currency",
                "expected ISO 4217 code",
            ));
        }
        if amount.is_sign_negative() {
            return Err(ValidationError::invalid_format(
                "amount",
                "amount cannot be negative",
            ));
        }
        Ok(Self { amount, currency })
    }

    /// Parses an amount string such as `"250.00"`.
    pub fn parse(amount: &str, currency: impl Into<String>) -> Result<Self, ValidationError> {
        Self::new(parse_amount(amount)?, currency)
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    /// Formats the amount with exactly two decimal places and `.` separator.
    pub fn to_out_sum(&self) -> String {
        format_two_places(self.amount)
    }

    /// The amount as sent in `OutSum`: rounded to kopecks.
    pub fn rounded_to_out_sum(&self) -> Money {
        Self {
            amount: round_two_places(self.amount),
            currency: self.currency.clone(),
        }
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.to_out_sum(), self.currency)
    }
}

/// Parses a plain decimal amount. Rejects blanks, signs and exponents.
pub fn parse_amount(raw: &str) -> Result<Decimal, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::empty_field("amount"));
    }
    if !trimmed.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return Err(ValidationError::invalid_format(
            "amount",
            "expected digits with optional '.' separator",
        ));
    }
    Decimal::from_str(trimmed)
        .map_err(|e| ValidationError::invalid_format("amount", e.to_string()))
}

/// Rounds half away from zero to two decimal places.
pub fn round_two_places(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Rounds half away from zero and pads to two decimal places.
pub fn format_two_places(amount: Decimal) -> String {
    let mut rounded = round_two_places(amount);
    rounded.rescale(2);
    rounded.to_string()
}
