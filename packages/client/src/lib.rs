//! Meeting client library for Huddle.
//!
//! - `chrome`: page decoration behavior (tooltips, alerts, fade-in, forms, busy buttons)
//! - `room`: the meeting room controller and the seams it is driven through
//! - `terminal`: a terminal front-end that runs the controller over a WebSocket

pub mod chrome;
pub mod error;
pub mod room;
pub mod terminal;

pub use terminal::run_client;
