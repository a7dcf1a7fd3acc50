//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `http` - Axum routes for Robokassa callbacks and checkout
//! - `storage` - In-memory payment store and order reader

pub mod http;
pub mod storage;

pub use http::{robokassa_router, RobokassaAppState};
pub use storage::{InMemoryOrderReader, InMemoryPaymentStore};
