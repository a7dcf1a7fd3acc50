//! Storage Adapters
//!
//! In-memory implementations of the `PaymentStore` and `OrderReader` ports.
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::storage::{InMemoryOrderReader, InMemoryPaymentStore};
//!
//! let payments = InMemoryPaymentStore::new();
//! let orders = InMemoryOrderReader::from_json_file("orders.json").await?;
//! ```

mod in_memory_order_reader;
mod in_memory_payment_store;

pub use in_memory_order_reader::InMemoryOrderReader;
pub use in_memory_payment_store::InMemoryPaymentStore;
