//! UseCase: Meeting Room からの退室処理

use std::sync::Arc;

use crate::domain::{MeetingId, Participant, RoomRepository, Session, SessionId};

use super::error::ParticipationError;

/// 退室結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Departure {
    pub meeting_id: MeetingId,
    /// 退室した参加者
    pub participant: Participant,
    /// 残りの参加者（`user-left` の送信先）
    pub remaining: Vec<Participant>,
}

impl Departure {
    /// `user-left` を受け取るセッション
    pub fn recipients(&self) -> Vec<SessionId> {
        self.remaining
            .iter()
            .map(|p| p.session_id.clone())
            .collect()
    }
}

/// Meeting Room 退室のユースケース
pub struct LeaveMeetingUseCase {
    rooms: Arc<dyn RoomRepository>,
}

impl LeaveMeetingUseCase {
    pub fn new(rooms: Arc<dyn RoomRepository>) -> Self {
        Self { rooms }
    }

    /// 退室を実行
    ///
    /// # Errors
    ///
    /// セッションがその Room に参加していない場合は `NotInMeeting`
    pub async fn execute(
        &self,
        session: &Session,
        meeting_id: MeetingId,
    ) -> Result<Departure, ParticipationError> {
        let (participant, remaining) = self
            .rooms
            .remove_participant(&meeting_id, &session.id)
            .await
            .map_err(|_| ParticipationError::NotInMeeting(meeting_id.as_str().to_string()))?;

        tracing::info!("User '{}' left meeting {}", session.user_name, meeting_id);

        Ok(Departure {
            meeting_id,
            participant,
            remaining,
        })
    }
}
