#![allow(clippy::must_use_candidate)]

pub mod cors;
mod env;
pub mod gateway;
pub mod health;
pub mod instructions;
mod loader;
pub mod server;
pub mod telemetry;

use serde::Deserialize;

pub use cors::*;
pub use gateway::*;
pub use health::*;
pub use instructions::*;
pub use server::*;
pub use telemetry::{ExportProtocol, ExporterConfig, LogFormat, TelemetryConfig};

/// Top-level try-on gateway configuration
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Upstream model and credential configuration
    #[serde(default)]
    pub gateway: GatewayConfig,
    /// Instruction wording per category
    #[serde(default)]
    pub instructions: InstructionsConfig,
    /// Logging and telemetry configuration
    #[serde(default)]
    pub telemetry: Option<TelemetryConfig>,
}
