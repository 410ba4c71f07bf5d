//! Programmatic configuration builder for integration tests

use std::net::SocketAddr;

use secrecy::SecretString;
use tryon_config::{AllowedOrigins, Config, CorsConfig};
use tryon_core::InstructionStrategy;

/// Builder for constructing test configurations
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new builder with a credential and a loopback listen address
    pub fn new() -> Self {
        let mut config = Config::default();
        config.server.listen_address = Some(SocketAddr::from(([127, 0, 0, 1], 0)));
        config.gateway.api_key = Some(SecretString::from("test-key"));

        Self { config }
    }

    /// Point the gateway at a mock upstream
    pub fn with_upstream(mut self, base_url: &str) -> Self {
        self.config.gateway.base_url = base_url.parse().expect("valid URL");
        self
    }

    /// Run without an upstream credential
    pub fn without_credential(mut self) -> Self {
        self.config.gateway.api_key = None;
        self
    }

    /// Mount the try-on endpoint elsewhere
    pub fn with_path(mut self, path: &str) -> Self {
        path.clone_into(&mut self.config.gateway.path);
        self
    }

    /// Set the combined image size limit
    pub fn with_max_payload_bytes(mut self, limit: usize) -> Self {
        self.config.gateway.max_payload_bytes = limit;
        self
    }

    /// Use a different built-in instruction family
    pub fn with_strategy(mut self, strategy: InstructionStrategy) -> Self {
        self.config.instructions.strategy = strategy;
        self
    }

    /// Allow the given browser origins
    pub fn with_cors_origins(mut self, origins: &[&str]) -> Self {
        self.config.server.cors = Some(CorsConfig {
            origins: AllowedOrigins::List(origins.iter().map(|&o| o.to_owned()).collect()),
            max_age: Some(600),
        });
        self
    }

    /// Disable health endpoint
    pub fn without_health(mut self) -> Self {
        self.config.server.health.enabled = false;
        self
    }

    /// Build the final config
    pub fn build(self) -> Config {
        self.config.validate().expect("valid test config");
        self.config
    }
}
