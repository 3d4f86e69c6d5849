//! Gateway server setup
//!
//! Provides the HTTP + WebSocket routes and the server runner.

pub mod alert;
mod handler;
mod middleware;
mod state;

pub use handler::gateway_handler;
pub use middleware::REQUEST_ID_HEADER;
pub use state::GatewayState;

use axum::{
    routing::{get, post},
    Router,
};
use relay_common::{AppConfig, AppError, AppResult, ConfigError};
use relay_core::SystemClock;
use std::net::SocketAddr;
use tokio::net::TcpListener;

/// Create the gateway router
///
/// The WebSocket is served on `/` as well as `/ws` so clients can connect
/// to the bare host.
pub fn create_router() -> Router<GatewayState> {
    Router::new()
        .route("/", get(gateway_handler))
        .route("/ws", get(gateway_handler))
        .route("/alert", post(alert::post_alert))
        .route("/ping", get(alert::ping))
        .route("/health", get(health_check))
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

/// Build the complete application
pub fn create_app(state: GatewayState) -> Router {
    let router = middleware::apply_middleware(create_router(), &state.config().cors);
    router.with_state(state)
}

/// Run the gateway server on an already bound listener
pub async fn run_server(app: Router, listener: TcpListener) -> AppResult<()> {
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(AppError::server)
}

/// Run the complete gateway server with configuration
pub async fn run(config: AppConfig) -> AppResult<()> {
    let address = config.server.address();
    let addr: SocketAddr = address
        .parse()
        .map_err(|_| ConfigError::InvalidValue("RELAY_HOST", address))?;

    let state = GatewayState::new(config, SystemClock::shared());

    tracing::info!(
        window = %state.relay().alert_window(),
        "Initial alert window"
    );

    let app = create_app(state);

    tracing::info!("Starting relay on {}", addr);
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::bind(addr, e))?;
    tracing::info!("Relay listening on ws://{} (alerts: POST http://{}/alert)", addr, addr);

    run_server(app, listener).await
}

/// Resolve on Ctrl-C
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
