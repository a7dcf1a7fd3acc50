//! HTTP handlers for Robokassa endpoints.
//!
//! These handlers connect Axum routes to the payment command handlers.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::extract::rejection::FormRejection;
use axum::extract::{Form, Json, Path, Query, State};
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use tracing::warn;

use crate::application::handlers::payment::{
    ApplyRemoteStatusCommand, ApplyRemoteStatusHandler, CancelPaymentCommand,
    CancelPaymentHandler, HandleResultNotificationCommand, HandleResultNotificationHandler,
    PaymentError, StartCheckoutCommand, StartCheckoutHandler,
};
use crate::domain::foundation::{DomainError, InvoiceId, ValidationError};
use crate::domain::payment::RemoteStatus;
use crate::domain::robokassa::{NotificationError, PaymentGatewayConfig};
use crate::ports::{OrderReader, PaymentStore};

use super::dto::{CheckoutQuery, ErrorResponse, PaymentResponse};
use super::render::checkout_page;

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared state for the Robokassa routes.
#[derive(Clone)]
pub struct RobokassaAppState {
    pub payment_store: Arc<dyn PaymentStore>,
    pub order_reader: Arc<dyn OrderReader>,
    pub gateway: Arc<PaymentGatewayConfig>,
    /// Where anonymous buyers land after paying.
    pub base_url: String,
}

impl RobokassaAppState {
    pub fn start_checkout_handler(&self) -> StartCheckoutHandler {
        StartCheckoutHandler::new(
            self.order_reader.clone(),
            self.payment_store.clone(),
            self.gateway.clone(),
        )
    }

    pub fn result_notification_handler(&self) -> HandleResultNotificationHandler {
        HandleResultNotificationHandler::new(self.payment_store.clone(), self.gateway.clone())
    }

    pub fn cancel_payment_handler(&self) -> CancelPaymentHandler {
        CancelPaymentHandler::new(self.payment_store.clone())
    }

    pub fn apply_remote_status_handler(&self) -> ApplyRemoteStatusHandler {
        ApplyRemoteStatusHandler::new(self.payment_store.clone())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Request Context
// ════════════════════════════════════════════════════════════════════════════════

/// Identity of the buyer returning from Robokassa, if known.
///
/// Set by the fronting site through the `X-User-Id` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuyerContext {
    pub user_id: Option<String>,
}

impl<S> axum::extract::FromRequestParts<S> for BuyerContext
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut Parts,
        _state: &'life1 S,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            let user_id = parts
                .headers
                .get("X-User-Id")
                .and_then(|v| v.to_str().ok())
                .map(str::trim)
                .filter(|id| !id.is_empty() && id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'))
                .map(str::to_string);

            Ok(BuyerContext { user_id })
        })
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Robokassa Callbacks
// ════════════════════════════════════════════════════════════════════════════════

/// POST /robokassa/result - ResultURL notification (form-encoded)
///
/// Answers `OK<InvId>` on acceptance; rejections get an empty body.
/// A body that is not a readable form is rejected like an empty one.
pub async fn handle_result_notification(
    State(state): State<RobokassaAppState>,
    form: Result<Form<BTreeMap<String, String>>, FormRejection>,
) -> Result<impl IntoResponse, RobokassaApiError> {
    match form {
        Ok(Form(fields)) => process_notification(&state, fields).await,
        Err(rejection) => {
            warn!(
                status = %rejection.status(),
                error = %rejection.body_text(),
                "Unreadable Robokassa notification body"
            );
            Err(PaymentError::from(NotificationError::EmptyPayload).into())
        }
    }
}

/// GET /robokassa/result - ResultURL notification sent with the GET method
pub async fn handle_result_notification_query(
    State(state): State<RobokassaAppState>,
    Query(fields): Query<BTreeMap<String, String>>,
) -> Result<impl IntoResponse, RobokassaApiError> {
    process_notification(&state, fields).await
}

async fn process_notification(
    state: &RobokassaAppState,
    fields: BTreeMap<String, String>,
) -> Result<String, RobokassaApiError> {
    let handler = state.result_notification_handler();
    let cmd = HandleResultNotificationCommand {
        fields,
        require_signature: true,
    };

    let result = handler.handle(cmd).await?;
    Ok(result.acknowledgement)
}

/// GET /robokassa/status - SuccessURL / FailURL landing page
pub async fn status_page(
    State(state): State<RobokassaAppState>,
    buyer: BuyerContext,
) -> Redirect {
    match buyer.user_id {
        Some(user_id) => Redirect::to(&format!("/user/{}/orders", user_id)),
        None => Redirect::to(&state.base_url),
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Checkout
// ════════════════════════════════════════════════════════════════════════════════

/// GET /robokassa/checkout/:invoice_id - Page handing the buyer over to Robokassa
pub async fn checkout(
    State(state): State<RobokassaAppState>,
    Path(invoice_id): Path<String>,
    Query(query): Query<CheckoutQuery>,
) -> Result<impl IntoResponse, RobokassaApiError> {
    let handler = state.start_checkout_handler();
    let cmd = StartCheckoutCommand {
        invoice_id: parse_invoice_id(&invoice_id)?,
        test_mode: query.is_test(),
    };

    let result = handler.handle(cmd).await?;
    Ok(Html(checkout_page(&result.request)))
}

// ════════════════════════════════════════════════════════════════════════════════
// Payment Management
// ════════════════════════════════════════════════════════════════════════════════

/// POST /robokassa/payments/:invoice_id/cancel - Cancel a payment
pub async fn cancel_payment(
    State(state): State<RobokassaAppState>,
    Path(invoice_id): Path<String>,
) -> Result<impl IntoResponse, RobokassaApiError> {
    let handler = state.cancel_payment_handler();
    let cmd = CancelPaymentCommand {
        invoice_id: parse_invoice_id(&invoice_id)?,
    };

    let payment = handler.handle(cmd).await?;
    Ok(Json(PaymentResponse::from(payment)))
}

/// POST /robokassa/payments/:invoice_id/status/:remote - Apply `success` or `fail`
pub async fn apply_remote_status(
    State(state): State<RobokassaAppState>,
    Path((invoice_id, remote)): Path<(String, String)>,
) -> Result<impl IntoResponse, RobokassaApiError> {
    let handler = state.apply_remote_status_handler();
    let cmd = ApplyRemoteStatusCommand {
        invoice_id: parse_invoice_id(&invoice_id)?,
        status: remote.parse::<RemoteStatus>().map_err(PaymentError::from)?,
    };

    let payment = handler.handle(cmd).await?;
    Ok(Json(PaymentResponse::from(payment)))
}

fn parse_invoice_id(raw: &str) -> Result<InvoiceId, RobokassaApiError> {
    raw.parse::<InvoiceId>()
        .map_err(|e: ValidationError| RobokassaApiError(PaymentError::from(e)))
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type that converts payment errors to HTTP responses.
///
/// Notification rejections are answered with an empty body so nothing about
/// the check that failed is revealed to the caller.
#[derive(Debug)]
pub struct RobokassaApiError(PaymentError);

impl From<PaymentError> for RobokassaApiError {
    fn from(err: PaymentError) -> Self {
        Self(err)
    }
}

impl From<DomainError> for RobokassaApiError {
    fn from(err: DomainError) -> Self {
        Self(PaymentError::from(err))
    }
}

impl IntoResponse for RobokassaApiError {
    fn into_response(self) -> Response {
        use crate::domain::robokassa::PaymentRequestError;

        let (status, error_code) = match &self.0 {
            PaymentError::Notification(err) => return err.status_code().into_response(),
            PaymentError::Request(PaymentRequestError::MissingMerchantLogin) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "GATEWAY_MISCONFIGURED")
            }
            PaymentError::Request(_) => (StatusCode::UNPROCESSABLE_ENTITY, "INVALID_ORDER"),
            PaymentError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_FAILED"),
            PaymentError::OrderNotFound(_) => (StatusCode::NOT_FOUND, "ORDER_NOT_FOUND"),
            PaymentError::PaymentNotFound(_) => (StatusCode::NOT_FOUND, "PAYMENT_NOT_FOUND"),
            PaymentError::Infrastructure(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
            }
        };

        let body = ErrorResponse::new(error_code, self.0.message());
        (status, Json(body)).into_response()
    }
}
