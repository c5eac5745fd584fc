//! Verdura payments service entry point.
//!
//! Wires configuration, the Postgres pool, the Razorpay client and the HTTP
//! router together, then serves until shutdown.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use sqlx::postgres::PgPoolOptions;
use axum::http::HeaderValue;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use verdura_payments::adapters::http::payments::{payments_router, PaymentsAppState};
use verdura_payments::adapters::postgres::{PostgresInventoryReserver, PostgresOrderRepository};
use verdura_payments::adapters::razorpay::{RazorpayClient, RazorpayConfig};
use verdura_payments::config::AppConfig;
use verdura_payments::domain::payment::SignatureVerifier;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    init_tracing(&config);

    tracing::info!(
        environment = ?config.server.environment,
        test_mode = config.gateway.is_test_mode(),
        "Starting verdura-payments"
    );

    let pool = PgPoolOptions::new()
        .min_connections(config.database.min_connections)
        .max_connections(config.database.max_connections)
        .acquire_timeout(config.database.acquire_timeout())
        .idle_timeout(config.database.idle_timeout())
        .max_lifetime(config.database.max_lifetime())
        .connect(&config.database.url)
        .await?;

    let gateway_config = RazorpayConfig::new(
        config.gateway.key_id.clone(),
        config.gateway.key_secret.clone(),
    )
    .with_base_url(config.gateway.api_base_url.clone());

    let state = PaymentsAppState {
        order_repository: Arc::new(PostgresOrderRepository::new(pool.clone())),
        inventory_reserver: Arc::new(PostgresInventoryReserver::new(pool)),
        payment_gateway: Arc::new(RazorpayClient::new(gateway_config)),
        checkout_verifier: Arc::new(SignatureVerifier::new(config.gateway.key_secret.clone())),
        webhook_verifier: Arc::new(SignatureVerifier::new(config.gateway.webhook_secret.clone())),
    };

    let app = Router::new()
        .nest("/api", payments_router())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(cors_layer(&config));

    let addr = config.server.socket_addr();
    tracing::info!(%addr, "Listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.server.log_level.clone()));

    if config.is_production() {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

fn cors_layer(config: &AppConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .server
        .cors_origins_list()
        .iter()
        .filter_map(|o| o.parse().ok())
        .collect();

    if origins.is_empty() {
        CorsLayer::permissive()
    } else {
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(tower_http::cors::Any)
            .allow_headers(tower_http::cors::Any)
    }
}
