//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors)
//! - `payment` - Payment state, payment records and order snapshots
//! - `robokassa` - Robokassa signing, payment requests and notification validation

pub mod foundation;
pub mod payment;
pub mod robokassa;
