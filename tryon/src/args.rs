use std::path::PathBuf;

use clap::Parser;

/// Virtual try-on gateway
#[derive(Debug, Parser)]
#[command(name = "tryon", about = "Image synthesis gateway for virtual try-on")]
pub struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "tryon.toml", env = "TRYON_CONFIG")]
    pub config: PathBuf,

    /// Override the listen address
    #[arg(long, env = "TRYON_LISTEN")]
    pub listen: Option<std::net::SocketAddr>,

    /// Log filter directive, e.g. `info` or `tryon_gateway=debug`
    #[arg(long, default_value = "info", env = "TRYON_LOG")]
    pub log: String,
}
