use std::path::PathBuf;

use clap::Parser;

/// Errorizer sample server
#[derive(Debug, Parser)]
#[command(name = "errorizer", about = "Sample server translating raised errors into JSON error responses")]
pub struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "errorizer.toml", env = "ERRORIZER_CONFIG")]
    pub config: PathBuf,

    /// Override the listen address
    #[arg(long, env = "ERRORIZER_LISTEN")]
    pub listen: Option<std::net::SocketAddr>,
}
