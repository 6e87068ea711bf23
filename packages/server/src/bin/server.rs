//! Huddle meeting server.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin huddle-server
//! cargo run --bin huddle-server -- --host 0.0.0.0 --port 3000 --max-participants 20
//! ```

use clap::Parser;
use huddle_server::{app::build_server, infrastructure::repository::RoomSettings};
use huddle_shared::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "huddle-server")]
#[command(about = "Meeting server with real-time chat, reactions and media status", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "8080")]
    port: u16,

    /// Maximum number of participants per meeting room
    #[arg(long, default_value = "100")]
    max_participants: usize,

    /// Number of chat messages kept per room for late joiners
    #[arg(long, default_value = "500")]
    history_limit: usize,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "debug");

    let args = Args::parse();

    let server = build_server(RoomSettings {
        participant_capacity: args.max_participants,
        message_capacity: args.history_limit,
    });
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
