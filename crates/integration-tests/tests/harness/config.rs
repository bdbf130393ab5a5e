//! Programmatic configuration builder for integration tests

use std::net::SocketAddr;

use errorizer_config::{Config, HealthConfig, ServerConfig};
use serde_json::Value;

/// Builder for constructing test configurations
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new builder listening on an ephemeral local port
    pub fn new() -> Self {
        Self {
            config: Config {
                server: ServerConfig {
                    listen_address: Some(SocketAddr::from(([127, 0, 0, 1], 0))),
                    health: HealthConfig::default(),
                },
                telemetry: None,
                errors: None,
            },
        }
    }

    /// Set the raw `[errors]` table
    pub fn with_errors(mut self, errors: Value) -> Self {
        self.config.errors = Some(errors);
        self
    }

    /// Serve the health check on a different path
    pub fn with_health_path(mut self, path: &str) -> Self {
        self.config.server.health.path = path.to_owned();
        self
    }

    /// Disable health endpoint
    pub fn without_health(mut self) -> Self {
        self.config.server.health.enabled = false;
        self
    }

    /// Build the final config
    pub fn build(self) -> Config {
        self.config
    }
}
