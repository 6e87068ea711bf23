//! UI layer: axum router, request handlers and shutdown handling.

mod handler;
mod server;
mod signal;
pub mod state;

pub use server::Server;
pub use state::AppState;
