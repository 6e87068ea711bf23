//! Composition root: wires repositories, pusher and usecases into a `Server`.

use std::sync::Arc;

use huddle_shared::time::{Clock, SystemClock};

use crate::{
    infrastructure::{
        message_pusher::WebSocketMessagePusher,
        repository::{
            InMemoryHistoryRepository, InMemoryMeetingRepository, InMemoryRoomRepository,
            RoomSettings,
        },
    },
    ui::{AppState, Server},
    usecase::{
        ConnectSessionUseCase, DisconnectSessionUseCase, JoinMeetingUseCase, LeaveMeetingUseCase,
        MeetingHistoryUseCase, ResolveMeetingUseCase, SendMessageUseCase, SendReactionUseCase,
        StartMeetingUseCase, ToggleMediaUseCase,
    },
};

/// Build a server backed by in-memory storage and the system clock
pub fn build_server(settings: RoomSettings) -> Server {
    build_server_with_clock(settings, Arc::new(SystemClock))
}

/// Build a server with an explicit clock
pub fn build_server_with_clock(settings: RoomSettings, clock: Arc<dyn Clock>) -> Server {
    // Initialize dependencies in order:
    // 1. Repositories
    // 2. MessagePusher
    // 3. UseCases
    // 4. AppState / Server

    // 1. Create Repositories (in-memory database)
    let meetings = Arc::new(InMemoryMeetingRepository::new());
    let rooms = Arc::new(InMemoryRoomRepository::new(settings));
    let history = Arc::new(InMemoryHistoryRepository::new());
    tracing::debug!(
        "Rooms hold up to {} participants and {} messages",
        settings.participant_capacity,
        settings.message_capacity
    );

    // 2. Create MessagePusher (WebSocket implementation)
    let message_pusher = Arc::new(WebSocketMessagePusher::new());

    // 3. Create UseCases
    let state = AppState {
        connect_session_usecase: Arc::new(ConnectSessionUseCase::new(
            message_pusher.clone(),
            clock.clone(),
        )),
        disconnect_session_usecase: Arc::new(DisconnectSessionUseCase::new(
            rooms.clone(),
            message_pusher.clone(),
        )),
        join_meeting_usecase: Arc::new(JoinMeetingUseCase::new(
            meetings.clone(),
            rooms.clone(),
            clock.clone(),
        )),
        leave_meeting_usecase: Arc::new(LeaveMeetingUseCase::new(rooms.clone())),
        send_message_usecase: Arc::new(SendMessageUseCase::new(rooms.clone(), clock.clone())),
        send_reaction_usecase: Arc::new(SendReactionUseCase::new(rooms.clone(), clock.clone())),
        toggle_media_usecase: Arc::new(ToggleMediaUseCase::new(rooms.clone())),
        start_meeting_usecase: Arc::new(StartMeetingUseCase::new(
            meetings.clone(),
            history.clone(),
            clock.clone(),
        )),
        resolve_meeting_usecase: Arc::new(ResolveMeetingUseCase::new(
            meetings.clone(),
            history.clone(),
            rooms,
            clock,
        )),
        meeting_history_usecase: Arc::new(MeetingHistoryUseCase::new(meetings, history)),
        message_pusher,
    };

    // 4. Create the server
    Server::new(state)
}
