//! Meeting server library for Huddle.
//!
//! Serves the real-time meeting channel over WebSocket (roster, chat,
//! reactions, camera/microphone status) and a small HTTP API for starting,
//! scheduling and looking up meetings.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

// composition root
pub mod app;
