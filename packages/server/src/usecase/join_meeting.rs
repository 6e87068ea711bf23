//! UseCase: Meeting Room への入室処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - JoinMeetingUseCase::execute() メソッド
//!
//! ### どのような状況を想定しているか
//! - 正常系：入室すると参加者リストとチャット履歴が返される
//! - 異常系：存在しない Meeting、人数制限超過
//! - エッジケース：同じユーザーが別セッションから入室する、全員退室後の再入室

use std::sync::Arc;

use huddle_shared::time::Clock;

use crate::domain::{
    ChatMessage, MeetingId, MeetingRepository, Participant, RepositoryError, RoomRepository,
    Session, Timestamp,
};

use super::error::JoinMeetingError;

/// 入室結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinOutcome {
    /// 入室した参加者
    pub participant: Participant,
    /// 入室後の参加者リスト（入室者を含む）
    pub participants: Vec<Participant>,
    /// 入室者にだけ送るチャット履歴（古い順）
    pub history: Vec<ChatMessage>,
}

/// Meeting Room 入室のユースケース
pub struct JoinMeetingUseCase {
    meetings: Arc<dyn MeetingRepository>,
    rooms: Arc<dyn RoomRepository>,
    clock: Arc<dyn Clock>,
}

impl JoinMeetingUseCase {
    pub fn new(
        meetings: Arc<dyn MeetingRepository>,
        rooms: Arc<dyn RoomRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            meetings,
            rooms,
            clock,
        }
    }

    /// 入室を実行
    ///
    /// # Returns
    ///
    /// * `Ok(JoinOutcome)` - 入室者・参加者リスト・チャット履歴
    /// * `Err(JoinMeetingError)` - Meeting が存在しない、または満員
    pub async fn execute(
        &self,
        session: &Session,
        meeting_id: MeetingId,
    ) -> Result<JoinOutcome, JoinMeetingError> {
        // 1. Meeting の存在確認
        if self.meetings.get_meeting(&meeting_id).await.is_none() {
            return Err(JoinMeetingError::MeetingNotFound(
                meeting_id.as_str().to_string(),
            ));
        }

        // 2. Room に参加者を追加
        let participant = Participant::from_session(session, Timestamp::new(self.clock.now_millis()));
        let participants = self
            .rooms
            .add_participant(&meeting_id, participant.clone())
            .await
            .map_err(|e| match e {
                RepositoryError::RoomCapacityExceeded => JoinMeetingError::RoomCapacityExceeded,
                _ => JoinMeetingError::MeetingNotFound(meeting_id.as_str().to_string()),
            })?;

        // 3. チャット履歴を取得
        let history = self.rooms.get_messages(&meeting_id).await;

        tracing::info!(
            "User '{}' joined meeting {} ({} participants)",
            session.user_name,
            meeting_id,
            participants.len()
        );

        Ok(JoinOutcome {
            participant,
            participants,
            history,
        })
    }
}
