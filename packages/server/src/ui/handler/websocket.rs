//! WebSocket connection handlers.
//!
//! One connection is one session. Inbound frames are `ClientEvent`s, outbound
//! frames are `ServerEvent`s pushed through the `MessagePusher`.

use std::sync::Arc;

use axum::{
    extract::{
        Query, State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    http::StatusCode,
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use huddle_shared::protocol::{ClientEvent, ErrorNotice, NewMessage, NewReaction, ServerEvent};
use serde::Deserialize;
use thiserror::Error;
use tokio::sync::mpsc;

use crate::{
    domain::{Emoji, MediaKind, MeetingId, MessageContent, Session, SessionId, UserId, UserName},
    infrastructure::dto::conversion::{
        chat_history_event, media_toggled_event, message_sent_event, user_joined_event,
        user_left_event,
    },
    ui::state::AppState,
    usecase::{Departure, JoinMeetingError, ParticipationError},
};

/// Query parameters for WebSocket connection
#[derive(Debug, Deserialize)]
pub struct ConnectQuery {
    pub user_id: String,
    pub user_name: String,
}

/// Inbound event that could not be applied; reported back as an `error` event
#[derive(Debug, Error)]
enum EventError {
    #[error("Invalid message data")]
    Malformed,

    #[error("Invalid meeting ID")]
    InvalidMeetingId,

    #[error("Message must not be empty")]
    EmptyMessage,

    #[error("Invalid reaction")]
    InvalidEmoji,

    #[error(transparent)]
    Join(#[from] JoinMeetingError),

    #[error(transparent)]
    Participation(#[from] ParticipationError),
}

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    Query(query): Query<ConnectQuery>,
) -> Result<impl IntoResponse, StatusCode> {
    // Convert String -> Domain Model
    let (user_id, user_name) = match (
        UserId::try_from(query.user_id.clone()),
        UserName::try_from(query.user_name.clone()),
    ) {
        (Ok(id), Ok(name)) => (id, name),
        _ => {
            tracing::warn!(
                "Rejecting connection with invalid user '{}' / '{}'",
                query.user_id,
                query.user_name
            );
            return Err(StatusCode::BAD_REQUEST);
        }
    };

    // Create a channel for this session to receive messages
    let (tx, rx) = mpsc::unbounded_channel();

    // register_client is called inside the UseCase
    let session = state
        .connect_session_usecase
        .execute(user_id, user_name, tx)
        .await;
    tracing::info!(
        "User '{}' connected (session {})",
        session.user_name,
        session.id
    );

    Ok(ws.on_upgrade(move |socket| handle_socket(socket, state, session, rx)))
}

/// Spawns a task that forwards pushed events from `rx` to the WebSocket sink.
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: futures_util::stream::SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    })
}

async fn handle_socket(
    socket: WebSocket,
    state: Arc<AppState>,
    session: Session,
    rx: mpsc::UnboundedReceiver<String>,
) {
    let (sender, mut receiver) = socket.split();

    let mut send_task = pusher_loop(rx, sender);

    let state_clone = state.clone();
    let session_clone = session.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::error!("WebSocket error: {}", e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    tracing::debug!("Received from session {}: {}", session_clone.id, text);
                    let result = match serde_json::from_str::<ClientEvent>(&text) {
                        Ok(event) => handle_client_event(&state_clone, &session_clone, event).await,
                        Err(e) => {
                            tracing::warn!("Failed to parse client event: {}", e);
                            Err(EventError::Malformed)
                        }
                    };

                    if let Err(e) = result {
                        tracing::warn!(
                            "Rejected event from '{}': {}",
                            session_clone.user_name,
                            e
                        );
                        let notice = ServerEvent::Error(ErrorNotice {
                            message: e.to_string(),
                        });
                        push_event(&state_clone, &session_clone.id, &notice).await;
                    }
                }
                Message::Close(_) => {
                    tracing::info!("User '{}' requested close", session_clone.user_name);
                    break;
                }
                // Ping/pong is handled automatically by the WebSocket protocol
                _ => {}
            }
        }
    });

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    let departures = state.disconnect_session_usecase.execute(&session).await;
    for departure in departures {
        announce_departure(&state, departure).await;
    }
    tracing::info!(
        "User '{}' disconnected (session {})",
        session.user_name,
        session.id
    );
}

async fn handle_client_event(
    state: &AppState,
    session: &Session,
    event: ClientEvent,
) -> Result<(), EventError> {
    let meeting_id = MeetingId::new(event.meeting_id().to_string())
        .map_err(|_| EventError::InvalidMeetingId)?;

    match event {
        ClientEvent::JoinMeeting { .. } => {
            let outcome = state
                .join_meeting_usecase
                .execute(session, meeting_id)
                .await?;

            // 履歴は入室者にだけ、参加通知は入室者を含む全員に送る
            push_event(state, &session.id, &chat_history_event(outcome.history)).await;
            let recipients = outcome
                .participants
                .iter()
                .map(|p| p.session_id.clone())
                .collect();
            let joined = user_joined_event(&outcome.participant, &outcome.participants);
            broadcast_event(state, recipients, &joined).await;
        }
        ClientEvent::SendMessage { message, .. } => {
            let content = MessageContent::new(message).map_err(|_| EventError::EmptyMessage)?;
            let posted = state
                .send_message_usecase
                .execute(session, meeting_id, content)
                .await?;

            let event = ServerEvent::NewMessage(NewMessage::from(posted.message));
            broadcast_event(state, posted.recipients, &event).await;
            push_event(state, &session.id, &message_sent_event()).await;
        }
        ClientEvent::SendReaction { emoji, .. } => {
            let emoji = Emoji::new(emoji).map_err(|_| EventError::InvalidEmoji)?;
            let posted = state
                .send_reaction_usecase
                .execute(session, meeting_id, emoji)
                .await?;

            let event = ServerEvent::NewReaction(NewReaction::from(posted.reaction));
            broadcast_event(state, posted.recipients, &event).await;
        }
        ClientEvent::ToggleCamera { camera_on, .. } => {
            toggle_media(state, session, meeting_id, MediaKind::Camera, camera_on).await?;
        }
        ClientEvent::ToggleMicrophone { mic_on, .. } => {
            toggle_media(state, session, meeting_id, MediaKind::Microphone, mic_on).await?;
        }
        ClientEvent::LeaveMeeting { .. } => {
            let departure = state
                .leave_meeting_usecase
                .execute(session, meeting_id)
                .await?;
            announce_departure(state, departure).await;
        }
    }

    Ok(())
}

async fn toggle_media(
    state: &AppState,
    session: &Session,
    meeting_id: MeetingId,
    kind: MediaKind,
    on: bool,
) -> Result<(), EventError> {
    let toggled = state
        .toggle_media_usecase
        .execute(session, meeting_id, kind, on)
        .await?;

    let event = media_toggled_event(&toggled.participant, toggled.kind);
    broadcast_event(state, toggled.recipients, &event).await;
    Ok(())
}

async fn announce_departure(state: &AppState, departure: Departure) {
    let recipients = departure.recipients();
    if recipients.is_empty() {
        return;
    }
    let event = user_left_event(&departure.participant, &departure.remaining);
    broadcast_event(state, recipients, &event).await;
}

async fn push_event(state: &AppState, session_id: &SessionId, event: &ServerEvent) {
    let json = match serde_json::to_string(event) {
        Ok(json) => json,
        Err(e) => {
            tracing::error!("Failed to serialize server event: {}", e);
            return;
        }
    };
    if let Err(e) = state.message_pusher.push_to(session_id, &json).await {
        tracing::warn!("Failed to push event to session {}: {}", session_id, e);
    }
}

async fn broadcast_event(state: &AppState, recipients: Vec<SessionId>, event: &ServerEvent) {
    let json = match serde_json::to_string(event) {
        Ok(json) => json,
        Err(e) => {
            tracing::error!("Failed to serialize server event: {}", e);
            return;
        }
    };
    if let Err(e) = state.message_pusher.broadcast(recipients, &json).await {
        tracing::warn!("Failed to broadcast event: {}", e);
    }
}
