//! Domain layer: entities, value objects and the interfaces the usecases depend on.

pub mod entity;
pub mod error;
pub mod factory;
pub mod message_pusher;
pub mod repository;
pub mod value_object;

pub use entity::{
    ChatMessage, Meeting, MeetingHistoryEntry, MeetingRole, MeetingStats, MeetingStatus,
    MediaKind, Participant, Reaction, Room, Session,
};
pub use error::{MessagePushError, RepositoryError, ValueObjectError};
pub use factory::MeetingIdFactory;
pub use message_pusher::{MessagePusher, PusherChannel};
pub use repository::{HistoryRepository, MeetingRepository, RoomRepository};
pub use value_object::{
    Emoji, MeetingId, MeetingTitle, MessageContent, SessionId, Timestamp, UserId, UserName,
};
