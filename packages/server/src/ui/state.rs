//! Shared application state handed to every handler.

use std::sync::Arc;

use crate::{
    domain::MessagePusher,
    usecase::{
        ConnectSessionUseCase, DisconnectSessionUseCase, JoinMeetingUseCase, LeaveMeetingUseCase,
        MeetingHistoryUseCase, ResolveMeetingUseCase, SendMessageUseCase, SendReactionUseCase,
        StartMeetingUseCase, ToggleMediaUseCase,
    },
};

pub struct AppState {
    // WebSocket
    pub connect_session_usecase: Arc<ConnectSessionUseCase>,
    pub disconnect_session_usecase: Arc<DisconnectSessionUseCase>,
    pub join_meeting_usecase: Arc<JoinMeetingUseCase>,
    pub leave_meeting_usecase: Arc<LeaveMeetingUseCase>,
    pub send_message_usecase: Arc<SendMessageUseCase>,
    pub send_reaction_usecase: Arc<SendReactionUseCase>,
    pub toggle_media_usecase: Arc<ToggleMediaUseCase>,
    // HTTP
    pub start_meeting_usecase: Arc<StartMeetingUseCase>,
    pub resolve_meeting_usecase: Arc<ResolveMeetingUseCase>,
    pub meeting_history_usecase: Arc<MeetingHistoryUseCase>,
    /// 各セッションへのイベント送信に使う
    pub message_pusher: Arc<dyn MessagePusher>,
}
