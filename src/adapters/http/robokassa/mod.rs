//! HTTP adapter for Robokassa endpoints.
//!
//! - `POST /robokassa/result` - ResultURL notification, answers `OK<InvId>`
//! - `GET /robokassa/checkout/:invoice_id` - Hand the buyer over to Robokassa
//! - `GET /robokassa/status` - SuccessURL / FailURL landing redirect
//! - `POST /robokassa/payments/:invoice_id/cancel` - Cancel a payment
//! - `POST /robokassa/payments/:invoice_id/status/:remote` - Apply `success` / `fail`

pub mod dto;
pub mod handlers;
pub mod render;
pub mod routes;

pub use handlers::{BuyerContext, RobokassaApiError, RobokassaAppState};
pub use routes::robokassa_router;
