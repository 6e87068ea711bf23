//! Terminal meeting client.
//!
//! Joins a meeting over WebSocket and drives the meeting room from the
//! prompt: plain lines are chat messages, slash commands control reactions,
//! camera, microphone and screen sharing (`/help` lists them).
//! Automatically reconnects on disconnection (max 5 attempts with 5 second interval).
//!
//! Run with:
//! ```not_rust
//! cargo run --bin huddle-client -- --meeting-id 123-456-7890 --name Alice
//! cargo run --bin huddle-client -- -m 1234567890 -n Bob --user-id bob-laptop
//! ```

use clap::Parser;
use huddle_client::room::MeetingConfig;
use huddle_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "huddle-client")]
#[command(about = "Terminal client for Huddle meetings", long_about = None)]
struct Args {
    /// Meeting ID to join (dashes allowed)
    #[arg(short = 'm', long)]
    meeting_id: String,

    /// Display name shown to other participants
    #[arg(short = 'n', long)]
    name: String,

    /// Stable user ID (random if omitted)
    #[arg(long)]
    user_id: Option<String>,

    /// WebSocket server URL
    #[arg(short = 'u', long, default_value = "ws://127.0.0.1:8080/ws")]
    url: String,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();

    let user_id = args
        .user_id
        .unwrap_or_else(|| format!("user-{:08x}", rand::random::<u32>()));
    let config = match MeetingConfig::new(&args.meeting_id, user_id, args.name) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = huddle_client::run_client(args.url, config).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
