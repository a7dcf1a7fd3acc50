//! HTTP adapters - REST API implementations.

pub mod robokassa;

pub use robokassa::{robokassa_router, RobokassaAppState};
