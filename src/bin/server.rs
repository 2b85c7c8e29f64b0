//! Room-scoped WebSocket chat relay server.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin chat-relay-server
//! ```

use clap::Parser;

use chat_relay::{config::ServerConfig, logger::setup_logger};

#[tokio::main]
async fn main() {
    let config = ServerConfig::parse();

    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "debug");

    // Run the server
    if let Err(e) = chat_relay::run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
