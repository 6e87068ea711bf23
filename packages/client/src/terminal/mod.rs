//! Terminal front-end for the meeting room.
//!
//! Drives a `MeetingRoom` over a WebSocket connection: server events come in
//! through a reader task, user input comes from a rustyline thread as chat
//! text or slash commands, and the room renders to stdout.

mod command;
pub mod domain;
pub mod formatter;
mod runner;
mod session;
mod ui;
mod view;

pub use command::{Command, parse_command};
pub use runner::run_client;
pub use session::{build_connect_url, run_client_session};
pub use view::TerminalView;
