//! Application handlers.
//!
//! Command handlers that orchestrate domain operations.

pub mod payment;

pub use payment::{
    ApplyRemoteStatusCommand, ApplyRemoteStatusHandler, CancelPaymentCommand,
    CancelPaymentHandler, HandleResultNotificationCommand, HandleResultNotificationHandler,
    HandleResultNotificationResult, PaymentError, StartCheckoutCommand, StartCheckoutHandler,
    StartCheckoutResult,
};
