//! Payment domain module.
//!
//! Order snapshots, payment records and the payment state they move through.
//!
//! # Module Structure
//!
//! - `state` - PaymentState and provider-reported RemoteStatus
//! - `record` - PaymentRecord and the Payable abstraction
//! - `order` - OrderSnapshot / OrderItem read model

mod order;
mod record;
mod state;

pub use order::{OrderItem, OrderSnapshot};
pub use record::{Payable, PaymentRecord};
pub use state::{PaymentState, RemoteStatus};
