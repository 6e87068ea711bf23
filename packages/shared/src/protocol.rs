//! Real-time channel events exchanged between the meeting client and server.
//!
//! Every WebSocket text frame carries one JSON object tagged by `type`, e.g.
//!
//! ```json
//! {"type":"send-message","meeting_id":"1234567890","message":"hello"}
//! ```

use serde::{Deserialize, Serialize};

/// Events emitted by the meeting client
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ClientEvent {
    JoinMeeting { meeting_id: String },
    SendMessage { meeting_id: String, message: String },
    SendReaction { meeting_id: String, emoji: String },
    ToggleCamera { meeting_id: String, camera_on: bool },
    ToggleMicrophone { meeting_id: String, mic_on: bool },
    LeaveMeeting { meeting_id: String },
}

impl ClientEvent {
    /// Meeting the event is addressed to
    pub fn meeting_id(&self) -> &str {
        match self {
            Self::JoinMeeting { meeting_id }
            | Self::SendMessage { meeting_id, .. }
            | Self::SendReaction { meeting_id, .. }
            | Self::ToggleCamera { meeting_id, .. }
            | Self::ToggleMicrophone { meeting_id, .. }
            | Self::LeaveMeeting { meeting_id } => meeting_id,
        }
    }
}

/// Events pushed by the meeting server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ServerEvent {
    UserJoined(RosterChange),
    UserLeft(RosterChange),
    NewMessage(NewMessage),
    MessageSent(MessageSent),
    NewReaction(NewReaction),
    CameraToggled(CameraToggled),
    MicrophoneToggled(MicrophoneToggled),
    ChatHistory(ChatHistory),
    Error(ErrorNotice),
}

/// Participant entry of a roster push
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipantInfo {
    pub id: String,
    pub name: String,
    /// RFC 3339
    pub joined_at: String,
    pub camera: bool,
    pub microphone: bool,
}

/// Payload of `user-joined` / `user-left`: the full participant list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RosterChange {
    pub user_name: String,
    pub message: String,
    pub participants: Vec<ParticipantInfo>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewMessage {
    pub id: String,
    pub user_name: String,
    pub message: String,
    /// `HH:MM:SS`
    pub timestamp: String,
}

/// Delivery acknowledgement sent back to the sender only
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageSent {
    pub status: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewReaction {
    pub id: String,
    pub user_name: String,
    pub emoji: String,
    /// RFC 3339
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CameraToggled {
    pub user_id: String,
    pub user_name: String,
    pub camera_on: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MicrophoneToggled {
    pub user_id: String,
    pub user_name: String,
    pub mic_on: bool,
}

/// Stored chat message replayed to a joining participant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryMessage {
    pub user_name: String,
    pub message: String,
    /// RFC 3339
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatHistory {
    pub messages: Vec<HistoryMessage>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorNotice {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_event_uses_kebab_case_tag() {
        // テスト項目: クライアントイベントが kebab-case の type タグで直列化される
        // given (前提条件):
        let event = ClientEvent::ToggleMicrophone {
            meeting_id: "1234567890".to_string(),
            mic_on: false,
        };

        // when (操作):
        let json = serde_json::to_value(&event).unwrap();

        // then (期待する結果):
        assert_eq!(json["type"], "toggle-microphone");
        assert_eq!(json["meeting_id"], "1234567890");
        assert_eq!(json["mic_on"], false);
    }

    #[test]
    fn test_server_event_payload_is_inlined() {
        // テスト項目: サーバーイベントのペイロードが type と同じ階層に展開される
        // given (前提条件):
        let json = r#"{"type":"camera-toggled","user_id":"u1","user_name":"Alice","camera_on":true}"#;

        // when (操作):
        let event: ServerEvent = serde_json::from_str(json).unwrap();

        // then (期待する結果):
        assert_eq!(
            event,
            ServerEvent::CameraToggled(CameraToggled {
                user_id: "u1".to_string(),
                user_name: "Alice".to_string(),
                camera_on: true,
            })
        );
    }

    #[test]
    fn test_unknown_event_type_is_rejected() {
        // テスト項目: 未知のイベント種別はパースエラーになる
        // given (前提条件):
        let json = r#"{"type":"start-recording","meeting_id":"1234567890"}"#;

        // when (操作):
        let result = serde_json::from_str::<ClientEvent>(json);

        // then (期待する結果):
        assert!(result.is_err());
    }

    #[test]
    fn test_meeting_id_accessor() {
        // テスト項目: どのイベントからも meeting_id を取り出せる
        // given (前提条件):
        let event = ClientEvent::SendReaction {
            meeting_id: "0987654321".to_string(),
            emoji: "🎉".to_string(),
        };

        // when (操作):
        let meeting_id = event.meeting_id();

        // then (期待する結果):
        assert_eq!(meeting_id, "0987654321");
    }
}
