//! InMemory Repository 実装
//!
//! プロセスの生存期間だけデータを保持します（永続化はしない）。

mod history;
mod meeting;
mod room;

pub use history::InMemoryHistoryRepository;
pub use meeting::InMemoryMeetingRepository;
pub use room::{InMemoryRoomRepository, RoomSettings};
