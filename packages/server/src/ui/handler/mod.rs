//! Request handlers.

mod http;
mod websocket;

pub use http::{
    get_meeting_detail, get_user_history, get_user_stats, health_check, join_meeting,
    schedule_meeting, start_meeting,
};
pub use websocket::websocket_handler;
