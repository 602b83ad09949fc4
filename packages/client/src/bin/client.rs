//! Terminal client for the Parlor chat relay.
//!
//! Asks for a display name and avatar (unless given as flags), then shows the
//! relay's recent history and live messages. Every keystroke tells the others
//! you are typing.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin parlor-client -- --name alice --avatar 🐱
//! cargo run --bin parlor-client -- -u ws://127.0.0.1:9000 -n bob -a 2
//! ```

use std::time::Duration;

use clap::Parser;

use parlor_client::{ClientConfig, run_client, ui::prompt_profile};
use parlor_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "parlor-client")]
#[command(about = "Terminal client for the Parlor chat relay", long_about = None)]
struct Args {
    /// Relay WebSocket URL
    #[arg(short = 'u', long, default_value = "ws://localhost:8080")]
    url: String,

    /// Display name (asked interactively when omitted)
    #[arg(short = 'n', long)]
    name: Option<String>,

    /// Avatar glyph or its number in the menu (asked interactively when omitted)
    #[arg(short = 'a', long)]
    avatar: Option<String>,

    /// Reconnection attempts after a dropped connection (0 disables reconnection)
    #[arg(long, default_value_t = 0)]
    max_reconnect_attempts: u32,

    /// Seconds to wait between reconnection attempts
    #[arg(long, default_value_t = 5)]
    reconnect_interval_secs: u64,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_CRATE_NAME"), "warn", &[]);

    let Args {
        url,
        name,
        avatar,
        max_reconnect_attempts,
        reconnect_interval_secs,
    } = Args::parse();

    let profile = match tokio::task::spawn_blocking(move || prompt_profile(name, avatar)).await {
        Ok(Ok(profile)) => profile,
        Ok(Err(e)) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
        Err(e) => {
            tracing::error!("Profile prompt failed: {}", e);
            std::process::exit(1);
        }
    };

    let config = ClientConfig {
        url,
        profile,
        max_reconnect_attempts,
        reconnect_interval: Duration::from_secs(reconnect_interval_secs),
    };

    if let Err(e) = run_client(config).await {
        tracing::error!("Client error: {}", e);
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
