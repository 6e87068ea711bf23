//! UseCase: ユーザーが入力した Meeting ID の解決
//!
//! ダッシュボードの「参加」フォームと Meeting 詳細 API から使われる。

use std::sync::Arc;

use huddle_shared::time::Clock;

use crate::domain::{
    HistoryRepository, Meeting, MeetingHistoryEntry, MeetingId, MeetingRepository, MeetingRole,
    Participant, RoomRepository, Timestamp, UserId,
};

use super::error::ResolveMeetingError;

pub struct ResolveMeetingUseCase {
    meetings: Arc<dyn MeetingRepository>,
    history: Arc<dyn HistoryRepository>,
    rooms: Arc<dyn RoomRepository>,
    clock: Arc<dyn Clock>,
}

impl ResolveMeetingUseCase {
    pub fn new(
        meetings: Arc<dyn MeetingRepository>,
        history: Arc<dyn HistoryRepository>,
        rooms: Arc<dyn RoomRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            meetings,
            history,
            rooms,
            clock,
        }
    }

    /// 入力された ID（`123-456-7890` 形式も可）の Meeting を探し、参加履歴に記録する
    pub async fn join(
        &self,
        user_id: UserId,
        raw_meeting_id: &str,
    ) -> Result<Meeting, ResolveMeetingError> {
        let meeting = self.find(raw_meeting_id).await?;

        self.history
            .add_entry(MeetingHistoryEntry {
                user_id,
                meeting_id: meeting.id.clone(),
                role: MeetingRole::Participant,
                meeting_title: meeting.title.clone(),
                host_name: meeting.host_name.clone(),
                joined_at: Timestamp::new(self.clock.now_millis()),
            })
            .await;

        Ok(meeting)
    }

    /// Meeting と現在の参加者
    pub async fn detail(
        &self,
        raw_meeting_id: &str,
    ) -> Result<(Meeting, Vec<Participant>), ResolveMeetingError> {
        let meeting = self.find(raw_meeting_id).await?;
        let participants = self.rooms.get_participants(&meeting.id).await;
        Ok((meeting, participants))
    }

    async fn find(&self, raw_meeting_id: &str) -> Result<Meeting, ResolveMeetingError> {
        let meeting_id = MeetingId::parse_user_input(raw_meeting_id)
            .map_err(|_| ResolveMeetingError::InvalidMeetingId)?;

        self.meetings
            .get_meeting(&meeting_id)
            .await
            .ok_or_else(|| ResolveMeetingError::MeetingNotFound(meeting_id.into_string()))
    }
}
