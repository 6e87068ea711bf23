//! UseCase 層
//!
//! WebSocket / HTTP ハンドラから呼ばれるアプリケーションロジック。
//! Repository と MessagePusher の trait にのみ依存し、具体的な実装には依存しない。

mod connect_session;
mod disconnect_session;
mod error;
mod join_meeting;
mod leave_meeting;
mod meeting_history;
mod resolve_meeting;
mod send_message;
mod send_reaction;
mod start_meeting;
mod toggle_media;

pub use connect_session::ConnectSessionUseCase;
pub use disconnect_session::DisconnectSessionUseCase;
pub use error::{JoinMeetingError, ParticipationError, ResolveMeetingError, StartMeetingError};
pub use join_meeting::{JoinMeetingUseCase, JoinOutcome};
pub use leave_meeting::{Departure, LeaveMeetingUseCase};
pub use meeting_history::{HISTORY_LIMIT, MeetingHistoryUseCase};
pub use resolve_meeting::ResolveMeetingUseCase;
pub use send_message::{PostedMessage, SendMessageUseCase};
pub use send_reaction::{PostedReaction, SendReactionUseCase};
pub use start_meeting::StartMeetingUseCase;
pub use toggle_media::{MediaToggled, ToggleMediaUseCase};
