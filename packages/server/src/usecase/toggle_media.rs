//! UseCase: カメラ／マイク状態の切り替え

use std::sync::Arc;

use crate::domain::{MediaKind, MeetingId, Participant, RoomRepository, Session, SessionId};

use super::error::ParticipationError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaToggled {
    /// 更新後の参加者
    pub participant: Participant,
    pub kind: MediaKind,
    pub recipients: Vec<SessionId>,
}

pub struct ToggleMediaUseCase {
    rooms: Arc<dyn RoomRepository>,
}

impl ToggleMediaUseCase {
    pub fn new(rooms: Arc<dyn RoomRepository>) -> Self {
        Self { rooms }
    }

    /// 参加者の `kind` を `on` に設定し、Room 全員への通知先を返す
    pub async fn execute(
        &self,
        session: &Session,
        meeting_id: MeetingId,
        kind: MediaKind,
        on: bool,
    ) -> Result<MediaToggled, ParticipationError> {
        let participant = self
            .rooms
            .set_media(&meeting_id, &session.id, kind, on)
            .await
            .map_err(|_| ParticipationError::NotInMeeting(meeting_id.as_str().to_string()))?;

        tracing::debug!(
            "User '{}' set {:?} {} in meeting {}",
            session.user_name,
            kind,
            if on { "on" } else { "off" },
            meeting_id
        );

        let recipients = self
            .rooms
            .get_participants(&meeting_id)
            .await
            .into_iter()
            .map(|p| p.session_id)
            .collect();

        Ok(MediaToggled {
            participant,
            kind,
            recipients,
        })
    }
}
