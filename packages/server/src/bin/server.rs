//! Batched-broadcast WebSocket chat server.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin murmur-server -- --port 8000 --static-dir ./static
//! ```

use clap::Parser;
use murmur_server::{Args, ServerConfig, ServerError};
use murmur_shared::logger::setup_logger;

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), &args.log_level);

    // Run the server
    if let Err(e) = run(&args).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

async fn run(args: &Args) -> Result<(), ServerError> {
    let config = ServerConfig::from_args(args)?;
    murmur_server::run(config).await
}
