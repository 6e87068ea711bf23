//! Repository 実装
//!
//! - `inmemory`: HashMap / Vec をインメモリ DB として使う実装
//! - 将来的に: `sqlite` など

pub mod inmemory;

pub use inmemory::{
    InMemoryHistoryRepository, InMemoryMeetingRepository, InMemoryRoomRepository, RoomSettings,
};
