//! Shared utilities for the Huddle meeting server and client.
//!
//! - `logger`: tracing subscriber setup
//! - `time`: clock abstraction and timestamp formatting
//! - `protocol`: real-time channel events exchanged over WebSocket

pub mod logger;
pub mod protocol;
pub mod time;
