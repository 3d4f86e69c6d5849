//! Relay Gateway entry point
//!
//! Run with:
//! ```bash
//! cargo run -p relay-gateway
//! ```
//!
//! Configuration is loaded from environment variables.

use relay_common::{try_init_tracing_with_config, AppConfig, AppResult, TracingConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    // Run the server
    if let Err(e) = run().await {
        error!(error = %e, code = e.error_code(), "Relay failed");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run() -> AppResult<()> {
    // Load configuration
    let config = AppConfig::from_env()?;

    // Initialize tracing
    if let Err(e) = try_init_tracing_with_config(TracingConfig::for_environment(config.app.env)) {
        eprintln!("Warning: Failed to initialize tracing: {e}");
    }

    info!(
        name = %config.app.name,
        env = ?config.app.env,
        port = config.server.port,
        "Configuration loaded"
    );

    relay_gateway::run(config).await
}
