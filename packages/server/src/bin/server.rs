//! Chaguan chat relay server.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin chaguan-server -- --port 5000 --config config.json
//! ```

use std::path::PathBuf;

use chaguan_server::{ServerOptions, config::AppConfig};
use chaguan_shared::logger::setup_logger;
use clap::Parser;

#[derive(Debug, Parser)]
#[command(version, about = "Single-room chat relay server")]
struct Cli {
    /// Address to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Port to listen on
    #[arg(short, long, default_value_t = 5000)]
    port: u16,

    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Default log level when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), &cli.log_level);

    let config = match AppConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    let options = ServerOptions {
        host: cli.host,
        port: cli.port,
        config,
    };

    // Run the server
    if let Err(e) = chaguan_server::run(options).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
