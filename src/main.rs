//! Robokassa gateway server.
//!
//! Serves the Robokassa endpoints under `/robokassa` backed by in-memory
//! storage. Orders are preloaded from `SERVER__ORDERS_FILE` when set.

use std::sync::Arc;
use std::time::Duration;

use axum::{routing::get, Json, Router};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use robokassa_gateway::adapters::http::robokassa::{robokassa_router, RobokassaAppState};
use robokassa_gateway::adapters::storage::{InMemoryOrderReader, InMemoryPaymentStore};
use robokassa_gateway::config::AppConfig;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));
    if config.is_production() {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    config.validate()?;

    let order_reader = match &config.server.orders_file {
        Some(path) => {
            tracing::info!(path = %path, "Loading orders");
            InMemoryOrderReader::from_json_file(path).await?
        }
        None => {
            tracing::warn!("No orders file configured, checkout will find no orders");
            InMemoryOrderReader::new()
        }
    };

    let gateway = config.robokassa.gateway();
    tracing::info!(
        merchant_login = %gateway.merchant_login,
        algorithm = gateway.algorithm.as_str(),
        endpoint = gateway.country.endpoint(),
        test_mode = gateway.test_mode,
        "Robokassa gateway configured"
    );

    let state = RobokassaAppState {
        payment_store: Arc::new(InMemoryPaymentStore::new()),
        order_reader: Arc::new(order_reader),
        gateway: Arc::new(gateway),
        base_url: config.server.base_url.clone(),
    };

    let app = Router::new()
        .route("/health", get(health))
        .nest("/robokassa", robokassa_router())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )));

    let addr = config.server.socket_addr()?;
    tracing::info!("Robokassa gateway listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION")
    }))
}
