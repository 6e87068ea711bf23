//! UseCase: Meeting の開始・予約

use std::sync::Arc;

use huddle_shared::time::Clock;

use crate::domain::{
    HistoryRepository, Meeting, MeetingHistoryEntry, MeetingIdFactory, MeetingRepository,
    MeetingRole, MeetingStatus, MeetingTitle, RepositoryError, Timestamp, UserId, UserName,
};

use super::error::StartMeetingError;

/// 生成した ID が既存の Meeting と衝突した場合の再試行回数
const MAX_ID_ATTEMPTS: usize = 5;

/// Meeting 作成のユースケース
pub struct StartMeetingUseCase {
    meetings: Arc<dyn MeetingRepository>,
    history: Arc<dyn HistoryRepository>,
    clock: Arc<dyn Clock>,
}

impl StartMeetingUseCase {
    pub fn new(
        meetings: Arc<dyn MeetingRepository>,
        history: Arc<dyn HistoryRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            meetings,
            history,
            clock,
        }
    }

    /// 即時開始の Meeting を作成し、ホストの履歴に記録する
    pub async fn start(
        &self,
        host_id: UserId,
        host_name: UserName,
    ) -> Result<Meeting, StartMeetingError> {
        let meeting = self
            .create(host_id, host_name, None, None, MeetingStatus::Active)
            .await?;

        self.history
            .add_entry(MeetingHistoryEntry {
                user_id: meeting.host_id.clone(),
                meeting_id: meeting.id.clone(),
                role: MeetingRole::Host,
                meeting_title: meeting.title.clone(),
                host_name: meeting.host_name.clone(),
                joined_at: meeting.created_at,
            })
            .await;

        tracing::info!("Meeting {} started by '{}'", meeting.id, meeting.host_name);
        Ok(meeting)
    }

    /// 予約 Meeting を作成する（履歴には記録しない）
    pub async fn schedule(
        &self,
        host_id: UserId,
        host_name: UserName,
        title: MeetingTitle,
        scheduled_time: Option<String>,
    ) -> Result<Meeting, StartMeetingError> {
        let scheduled_time = scheduled_time.filter(|t| !t.trim().is_empty());
        let meeting = self
            .create(
                host_id,
                host_name,
                Some(title),
                scheduled_time,
                MeetingStatus::Scheduled,
            )
            .await?;

        tracing::info!(
            "Meeting {} scheduled by '{}' for {:?}",
            meeting.id,
            meeting.host_name,
            meeting.scheduled_time
        );
        Ok(meeting)
    }

    async fn create(
        &self,
        host_id: UserId,
        host_name: UserName,
        title: Option<MeetingTitle>,
        scheduled_time: Option<String>,
        status: MeetingStatus,
    ) -> Result<Meeting, StartMeetingError> {
        let created_at = Timestamp::new(self.clock.now_millis());

        for _ in 0..MAX_ID_ATTEMPTS {
            let id = MeetingIdFactory::generate().map_err(|_| StartMeetingError::IdAllocationFailed)?;
            let meeting = Meeting {
                title: title.clone().unwrap_or_else(|| MeetingTitle::default_for(&id)),
                id,
                host_id: host_id.clone(),
                host_name: host_name.clone(),
                scheduled_time: scheduled_time.clone(),
                created_at,
                status,
            };

            match self.meetings.create_meeting(meeting.clone()).await {
                Ok(()) => return Ok(meeting),
                Err(RepositoryError::DuplicateMeeting(id)) => {
                    tracing::debug!("Meeting ID {} already taken, retrying", id);
                }
                Err(e) => return Err(e.into()),
            }
        }

        Err(StartMeetingError::IdAllocationFailed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{infrastructure::repository::InMemoryMeetingRepository, usecase::test_support};

    fn host() -> (UserId, UserName) {
        (
            UserId::new("user-host".to_string()).unwrap(),
            UserName::new("host".to_string()).unwrap(),
        )
    }

    #[tokio::test]
    async fn test_start_creates_active_meeting_and_history() {
        // テスト項目: 開始した Meeting は active で、ホストの履歴に記録される
        // given (前提条件):
        let meetings = Arc::new(InMemoryMeetingRepository::new());
        let history = test_support::history();
        let usecase =
            StartMeetingUseCase::new(meetings.clone(), history.clone(), test_support::clock());
        let (host_id, host_name) = host();

        // when (操作):
        let meeting = usecase.start(host_id.clone(), host_name).await.unwrap();

        // then (期待する結果):
        assert_eq!(meeting.status, MeetingStatus::Active);
        assert_eq!(meeting.title.as_str(), format!("Meeting {}", meeting.id));
        assert!(meetings.get_meeting(&meeting.id).await.is_some());
        let entries = history.recent_entries(&host_id, 10).await;
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].role, MeetingRole::Host);
        assert_eq!(entries[0].joined_at, Timestamp::new(test_support::NOW));
    }

    #[tokio::test]
    async fn test_schedule_keeps_title_and_time() {
        // テスト項目: 予約した Meeting はタイトルと日時を保持し、履歴には記録されない
        // given (前提条件):
        let meetings = Arc::new(InMemoryMeetingRepository::new());
        let history = test_support::history();
        let usecase =
            StartMeetingUseCase::new(meetings.clone(), history.clone(), test_support::clock());
        let (host_id, host_name) = host();

        // when (操作):
        let meeting = usecase
            .schedule(
                host_id.clone(),
                host_name,
                MeetingTitle::new("Weekly sync".to_string()).unwrap(),
                Some("2023-01-02T10:00".to_string()),
            )
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(meeting.status, MeetingStatus::Scheduled);
        assert_eq!(meeting.title.as_str(), "Weekly sync");
        assert_eq!(meeting.scheduled_time.as_deref(), Some("2023-01-02T10:00"));
        assert_eq!(meetings.count_scheduled_by_host(&host_id).await, 1);
        assert!(history.recent_entries(&host_id, 10).await.is_empty());
    }

    #[tokio::test]
    async fn test_schedule_blank_time_is_none() {
        // テスト項目: 空の日時は未指定として扱う
        // given (前提条件):
        let usecase = StartMeetingUseCase::new(
            Arc::new(InMemoryMeetingRepository::new()),
            test_support::history(),
            test_support::clock(),
        );
        let (host_id, host_name) = host();

        // when (操作):
        let meeting = usecase
            .schedule(
                host_id,
                host_name,
                MeetingTitle::new("Standup".to_string()).unwrap(),
                Some("  ".to_string()),
            )
            .await
            .unwrap();

        // then (期待する結果):
        assert_eq!(meeting.scheduled_time, None);
    }
}
