//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `PaymentStore` - Payment records and their state, by invoice id
//! - `OrderReader` - Order snapshots supplied by the order system

mod order_reader;
mod payment_store;

pub use order_reader::OrderReader;
pub use payment_store::PaymentStore;
