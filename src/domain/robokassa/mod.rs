//! Robokassa protocol: signatures, outbound payment requests and
//! ResultURL notification validation.
//!
//! Everything here is synchronous and free of I/O. Lookups and persistence
//! go through the ports.

mod errors;
mod fiscal;
mod gateway;
mod notification;
mod receipt;
mod request;
mod signature;
mod validator;

pub use errors::NotificationError;
pub use fiscal::{Country, PaymentMethod, PaymentObject, TaxSystem, VatRate};
pub use gateway::{PaymentGatewayConfig, DEFAULT_NOTIFICATION_CURRENCY};
pub use notification::{acknowledgement, NotificationRecord};
pub use receipt::{ReceiptItem, ReceiptPayload};
pub use request::{field, OutboundRequestBuilder, PaymentRequest, PaymentRequestError, RedirectMode};
pub use signature::{
    digest, digest_named, equals_case_insensitive, shop_label_field, DigestAlgorithm,
    SignatureCodec, SignatureError, SignatureInput, SHOP_LABEL, SHOP_LABEL_PARAM,
};
pub use validator::{Acceptance, InboundNotificationValidator, VerifiedNotification};
