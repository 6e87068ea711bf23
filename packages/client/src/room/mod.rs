//! Meeting room controller.
//!
//! `MeetingRoom` owns the local session state and is driven from three sides:
//! server events (`handle_server_event`), user actions (`send_message`,
//! `toggle_camera`, ...) and a one-second `tick`. It talks to the outside world
//! only through the `EventChannel`, `MediaDevices` and `RoomView` seams.

pub mod channel;
pub mod config;
pub mod controller;
pub mod media;
pub mod render;
pub mod view;

pub use channel::{EventChannel, QueuedChannel};
pub use config::MeetingConfig;
pub use controller::{MeetingRoom, QUICK_REACTIONS, REACTION_LIFETIME_MS};
pub use media::{
    MediaDevices, MediaStream, MediaTrack, SyntheticMediaDevices, SyntheticTrack, TrackKind,
};
pub use render::{format_elapsed, render_message};
pub use view::{
    ChatEntry, ControlState, FloatingReaction, HeadlessView, Notice, NoticeKind, Preview,
    RemoteParticipant, RoomView,
};
