//! Data Transfer Objects (DTOs) for the meeting server.
//!
//! - `http`: HTTP API request/response DTOs
//! - `conversion`: domain → DTO conversions (HTTP and WebSocket)
//!
//! WebSocket event DTOs are shared with the client in `huddle_shared::protocol`.

pub mod conversion;
pub mod http;
