//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers and error types
//! that form the vocabulary of the payment domain.

mod errors;
mod ids;
mod money;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::InvoiceId;
pub use money::{format_two_places, parse_amount, round_two_places, Money};
