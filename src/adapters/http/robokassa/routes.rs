//! Axum router configuration for Robokassa endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    apply_remote_status, cancel_payment, checkout, handle_result_notification,
    handle_result_notification_query, status_page, RobokassaAppState,
};

/// Create the Robokassa callback router.
///
/// # Routes
///
/// ## Provider Callbacks (no auth, signature verified)
/// - `POST /result` - ResultURL notification (form-encoded)
/// - `GET /result` - ResultURL notification (query string)
///
/// ## Buyer Endpoints
/// - `GET /checkout/:invoice_id` - Redirect form or widget page
/// - `GET|POST /status` - SuccessURL / FailURL landing
pub fn callback_routes() -> Router<RobokassaAppState> {
    Router::new()
        .route(
            "/result",
            post(handle_result_notification).get(handle_result_notification_query),
        )
        .route("/checkout/:invoice_id", get(checkout))
        .route("/status", get(status_page).post(status_page))
}

/// Create the payment management router.
///
/// # Routes
/// - `POST /:invoice_id/cancel` - Cancel to `authorization_expired`
/// - `POST /:invoice_id/status/:remote` - Apply `success` / `fail`
pub fn payment_routes() -> Router<RobokassaAppState> {
    Router::new()
        .route("/:invoice_id/cancel", post(cancel_payment))
        .route("/:invoice_id/status/:remote", post(apply_remote_status))
}

/// Create the complete Robokassa router, suitable for mounting at `/robokassa`.
///
/// # Example
///
/// ```ignore
/// let app = Router::new()
///     .nest("/robokassa", robokassa_router())
///     .with_state(app_state);
/// ```
pub fn robokassa_router() -> Router<RobokassaAppState> {
    Router::new()
        .merge(callback_routes())
        .nest("/payments", payment_routes())
}
