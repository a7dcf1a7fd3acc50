//! Payment command handlers.
//!
//! - `StartCheckoutHandler` - signed redirect + pending payment
//! - `HandleResultNotificationHandler` - ResultURL validation and completion
//! - `CancelPaymentHandler` - cancellation to `authorization_expired`
//! - `ApplyRemoteStatusHandler` - `success` / `fail` outcome mapping

mod apply_remote_status;
mod cancel_payment;
mod error;
mod handle_result_notification;
mod start_checkout;

pub use apply_remote_status::{ApplyRemoteStatusCommand, ApplyRemoteStatusHandler};
pub use cancel_payment::{CancelPaymentCommand, CancelPaymentHandler};
pub use error::PaymentError;
pub use handle_result_notification::{
    HandleResultNotificationCommand, HandleResultNotificationHandler,
    HandleResultNotificationResult,
};
pub use start_checkout::{StartCheckoutCommand, StartCheckoutHandler, StartCheckoutResult};
