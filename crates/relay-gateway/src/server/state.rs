//! Gateway state
//!
//! Application state for the gateway server.

use crate::relay::Relay;
use relay_common::AppConfig;
use relay_core::SharedClock;
use std::sync::Arc;

/// Gateway application state
///
/// Holds all shared dependencies for the gateway server.
#[derive(Clone)]
pub struct GatewayState {
    /// Relay coordinator (window, gesture state, connections)
    relay: Arc<Relay>,
    /// Application configuration
    config: Arc<AppConfig>,
}

impl GatewayState {
    /// Create a new gateway state
    pub fn new(config: AppConfig, clock: SharedClock) -> Self {
        let relay = Relay::new_shared(&config.relay, clock);
        Self {
            relay,
            config: Arc::new(config),
        }
    }

    /// Get the relay
    pub fn relay(&self) -> &Relay {
        &self.relay
    }

    /// Get the application configuration
    pub fn config(&self) -> &AppConfig {
        &self.config
    }
}

impl std::fmt::Debug for GatewayState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayState")
            .field("relay", &self.relay)
            .field("config", &"AppConfig")
            .finish()
    }
}
