//! Parlor chat relay.
//!
//! Keeps the last messages in memory, replays them to each new connection and
//! fans out chat messages and typing notifications.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin parlor-server
//! cargo run --bin parlor-server -- --host 0.0.0.0 --port 3000 --history-capacity 500
//! ```

use clap::Parser;

use parlor_server::{domain::HISTORY_CAPACITY, ui::Server};
use parlor_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "parlor-server")]
#[command(about = "WebSocket chat relay with bounded history", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "8080")]
    port: u16,

    /// Number of messages kept for newly connecting clients
    #[arg(long, default_value_t = HISTORY_CAPACITY, value_parser = parse_capacity)]
    history_capacity: usize,
}

fn parse_capacity(value: &str) -> Result<usize, String> {
    match value.parse::<usize>() {
        Ok(0) => Err("history capacity must be at least 1".to_string()),
        Ok(capacity) => Ok(capacity),
        Err(e) => Err(e.to_string()),
    }
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_CRATE_NAME"), "debug", &["tower_http"]);

    let args = Args::parse();

    let server = Server::with_in_memory_store(args.history_capacity);
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
